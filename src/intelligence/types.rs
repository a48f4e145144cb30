use serde::{Deserialize, Serialize};

use crate::models::{RiskFactor, RiskLevel};

/// Aggregated risk for one document. Recomputed per input, never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall_risk_level: RiskLevel,
    /// In parameter check order.
    pub risk_factors: Vec<RiskFactor>,
    pub risk_factor_count: usize,
    pub recommendations: Vec<String>,
    /// More than two factors, or critical saturation on its own.
    pub requires_medical_attention: bool,
}
