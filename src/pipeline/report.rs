//! Serializable per-document results and the JSON results file.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{PROCESSOR_VERSION, TEXT_SAMPLE_CHARS};
use crate::intelligence::{RiskAssessment, VitalBands};
use crate::models::{Band, VitalType};
use crate::pipeline::extraction::ExtractedVitals;

use super::processor::ProcessingError;

// ---------------------------------------------------------------------------
// Vital parameters
// ---------------------------------------------------------------------------

/// One parameter as shown to the reader of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterReport {
    /// Canonical string, e.g. `"135/85 mmHg"`. `None` when not found.
    pub value: Option<String>,
    pub unit: String,
    pub normal_range: String,
    pub status: Band,
}

impl ParameterReport {
    fn build(vital: VitalType, vitals: &ExtractedVitals, bands: &VitalBands) -> Self {
        Self {
            value: vitals.canonical(vital),
            unit: vital.default_unit().to_string(),
            normal_range: vital.normal_range().to_string(),
            status: bands.get(vital),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalParameters {
    pub blood_pressure: ParameterReport,
    pub heart_rate: ParameterReport,
    pub glucose: ParameterReport,
    pub oxygen_saturation: ParameterReport,
    pub body_temperature: ParameterReport,
    pub weight: ParameterReport,
    pub height: ParameterReport,
    pub bmi: ParameterReport,
}

impl VitalParameters {
    pub fn build(vitals: &ExtractedVitals, bands: &VitalBands) -> Self {
        let p = |vital| ParameterReport::build(vital, vitals, bands);
        Self {
            blood_pressure: p(VitalType::BloodPressure),
            heart_rate: p(VitalType::HeartRate),
            glucose: p(VitalType::Glucose),
            oxygen_saturation: p(VitalType::Saturation),
            body_temperature: p(VitalType::Temperature),
            weight: p(VitalType::Weight),
            height: p(VitalType::Height),
            bmi: p(VitalType::Bmi),
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub total_parameters: usize,
    pub extracted_parameters: usize,
    /// Percentage rounded to one decimal.
    pub extraction_rate: f64,
}

impl ExtractionStats {
    pub fn from_vitals(vitals: &ExtractedVitals) -> Self {
        let total = VitalType::ALL.len();
        let extracted = vitals.present_count();
        let rate = extracted as f64 / total as f64 * 100.0;
        Self {
            total_parameters: total,
            extracted_parameters: extracted,
            extraction_rate: (rate * 10.0).round() / 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Document report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub report_id: Uuid,
    pub file_path: String,
    pub file_name: String,
    pub file_size_bytes: u64,
    /// Lowercase with leading dot (`".txt"`), empty when the name has none.
    pub file_extension: String,
    pub processing_timestamp: NaiveDateTime,
    pub processor_version: String,
}

impl DocumentMetadata {
    pub fn for_path(path: &Path, file_size_bytes: u64) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            file_path: path.display().to_string(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_size_bytes,
            file_extension: path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
                .unwrap_or_default(),
            processing_timestamp: chrono::Local::now().naive_local(),
            processor_version: PROCESSOR_VERSION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionInfo {
    pub total_parameters: usize,
    pub extracted_parameters: usize,
    pub extraction_rate_percent: f64,
    /// Lengths in characters, not bytes.
    pub text_length_raw: usize,
    pub text_length_cleaned: usize,
    pub processing_status: String,
}

impl ExtractionInfo {
    pub fn new(stats: ExtractionStats, raw: &str, cleaned: &str) -> Self {
        Self {
            total_parameters: stats.total_parameters,
            extracted_parameters: stats.extracted_parameters,
            extraction_rate_percent: stats.extraction_rate,
            text_length_raw: raw.chars().count(),
            text_length_cleaned: cleaned.chars().count(),
            processing_status: "success".into(),
        }
    }
}

/// Full result for one successfully processed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub metadata: DocumentMetadata,
    pub extraction_info: ExtractionInfo,
    pub vital_parameters: VitalParameters,
    pub risk_assessment: RiskAssessment,
    pub raw_text_sample: String,
    pub cleaned_text_sample: String,
}

/// Record left in the results for a file that could not be processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedDocument {
    pub file_path: String,
    pub timestamp: NaiveDateTime,
    /// Always `"error"`.
    pub status: String,
    pub error: String,
    pub parameters: serde_json::Map<String, serde_json::Value>,
}

impl FailedDocument {
    pub fn new(path: &Path, error: &ProcessingError) -> Self {
        Self {
            file_path: path.display().to_string(),
            timestamp: chrono::Local::now().naive_local(),
            status: "error".into(),
            error: error.to_string(),
            parameters: serde_json::Map::new(),
        }
    }
}

/// One entry of the results file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentOutcome {
    Processed(Box<DocumentReport>),
    Failed(FailedDocument),
}

impl DocumentOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed(_))
    }

    pub fn file_path(&self) -> &str {
        match self {
            Self::Processed(r) => &r.metadata.file_path,
            Self::Failed(f) => &f.file_path,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// First `TEXT_SAMPLE_CHARS` characters, with `"..."` appended when cut.
pub fn text_sample(text: &str) -> String {
    match text.char_indices().nth(TEXT_SAMPLE_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Write all outcomes as a pretty-printed JSON array.
pub fn write_results(results: &[DocumentOutcome], path: &Path) -> Result<(), ProcessingError> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), documents = results.len(), "Results written");
    Ok(())
}
