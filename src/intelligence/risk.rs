use crate::models::{Band, RiskFactor, RiskLevel, VitalType};

use super::classify::VitalBands;
use super::messages::MessageTemplates;
use super::types::RiskAssessment;

/// Bands of one parameter that raise a risk factor.
struct FactorRule {
    vital: VitalType,
    abnormal: &'static [Band],
    factor: RiskFactor,
}

/// Checked in this order; it is also the order of the factor list.
const FACTOR_RULES: &[FactorRule] = &[
    FactorRule {
        vital: VitalType::BloodPressure,
        abnormal: &[Band::HighStage1, Band::HighStage2],
        factor: RiskFactor::Hypertension,
    },
    FactorRule {
        vital: VitalType::HeartRate,
        abnormal: &[Band::Low, Band::High],
        factor: RiskFactor::AbnormalHeartRate,
    },
    FactorRule {
        vital: VitalType::Glucose,
        abnormal: &[Band::Prediabetes, Band::Diabetes],
        factor: RiskFactor::HighGlucose,
    },
    FactorRule {
        vital: VitalType::Saturation,
        abnormal: &[Band::Low, Band::Critical],
        factor: RiskFactor::LowSaturation,
    },
    FactorRule {
        vital: VitalType::Temperature,
        abnormal: &[Band::MildFever, Band::HighFever],
        factor: RiskFactor::Fever,
    },
    FactorRule {
        vital: VitalType::Bmi,
        abnormal: &[Band::Underweight, Band::Obese],
        factor: RiskFactor::AbnormalBmi,
    },
];

/// Factor count above which the level is high and attention is required.
const ATTENTION_FACTOR_COUNT: usize = 2;

/// Aggregate per-parameter bands into a risk assessment.
pub fn assess(bands: &VitalBands) -> RiskAssessment {
    let risk_factors: Vec<RiskFactor> = FACTOR_RULES
        .iter()
        .filter(|rule| rule.abnormal.contains(&bands.get(rule.vital)))
        .map(|rule| rule.factor)
        .collect();

    let count = risk_factors.len();
    let overall_risk_level = if !bands.any_present() {
        RiskLevel::Unknown
    } else {
        match count {
            0 => RiskLevel::Low,
            1..=ATTENTION_FACTOR_COUNT => RiskLevel::Moderate,
            _ => RiskLevel::High,
        }
    };

    let requires_medical_attention =
        count > ATTENTION_FACTOR_COUNT || bands.get(VitalType::Saturation) == Band::Critical;

    RiskAssessment {
        overall_risk_level,
        recommendations: recommendations(&risk_factors),
        risk_factor_count: count,
        risk_factors,
        requires_medical_attention,
    }
}

fn recommendations(factors: &[RiskFactor]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for line in factors
        .iter()
        .flat_map(|f| MessageTemplates::recommendations(*f).iter())
    {
        if !lines.iter().any(|l| l == line) {
            lines.push((*line).to_string());
        }
    }
    if lines.is_empty() {
        lines.push(MessageTemplates::routine_checks().to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;
    use crate::pipeline::extraction::ExtractedVitals;

    #[test]
    fn no_measurements_is_unknown_risk() {
        let risk = assess(&VitalBands::from_pairs(&[]));
        assert_eq!(risk.overall_risk_level, RiskLevel::Unknown);
        assert!(risk.risk_factors.is_empty());
        assert!(!risk.requires_medical_attention);
        assert_eq!(risk.recommendations, vec!["Continuare controlli regolari"]);
    }

    #[test]
    fn all_normal_is_low_risk() {
        let bands = VitalBands::from_pairs(&[
            (VitalType::BloodPressure, Band::Normal),
            (VitalType::HeartRate, Band::Normal),
            (VitalType::Saturation, Band::Normal),
        ]);
        let risk = assess(&bands);
        assert_eq!(risk.overall_risk_level, RiskLevel::Low);
        assert_eq!(risk.risk_factor_count, 0);
        assert_eq!(risk.recommendations, vec!["Continuare controlli regolari"]);
    }

    #[test]
    fn two_factors_are_moderate() {
        let bands = VitalBands::from_pairs(&[
            (VitalType::BloodPressure, Band::HighStage1),
            (VitalType::Glucose, Band::Prediabetes),
            (VitalType::Bmi, Band::Normal),
        ]);
        let risk = assess(&bands);
        assert_eq!(risk.overall_risk_level, RiskLevel::Moderate);
        assert_eq!(risk.risk_factors, vec![RiskFactor::Hypertension, RiskFactor::HighGlucose]);
        assert_eq!(
            risk.recommendations,
            vec![
                "Consultare un medico per la pressione alta",
                "Ridurre il consumo di sale",
                "Controllo diabetologico",
                "Monitoraggio glicemia regolare",
            ]
        );
        assert!(!risk.requires_medical_attention);
    }

    #[test]
    fn three_factors_are_high_and_need_attention() {
        let bands = VitalBands::from_pairs(&[
            (VitalType::Temperature, Band::HighFever),
            (VitalType::HeartRate, Band::High),
            (VitalType::Bmi, Band::Obese),
        ]);
        let risk = assess(&bands);
        assert_eq!(risk.overall_risk_level, RiskLevel::High);
        assert_eq!(risk.risk_factor_count, 3);
        // check order, not insertion order of the input
        assert_eq!(
            risk.risk_factors,
            vec![RiskFactor::AbnormalHeartRate, RiskFactor::Fever, RiskFactor::AbnormalBmi]
        );
        assert!(risk.requires_medical_attention);
    }

    #[test]
    fn critical_saturation_alone_escalates() {
        let bands = VitalBands::from_pairs(&[(VitalType::Saturation, Band::Critical)]);
        let risk = assess(&bands);
        assert_eq!(risk.overall_risk_level, RiskLevel::Moderate);
        assert_eq!(risk.risk_factors, vec![RiskFactor::LowSaturation]);
        assert!(risk.requires_medical_attention);
    }

    #[test]
    fn low_saturation_does_not_escalate_alone() {
        let bands = VitalBands::from_pairs(&[(VitalType::Saturation, Band::Low)]);
        assert!(!assess(&bands).requires_medical_attention);
    }

    #[test]
    fn weight_alone_is_low_not_unknown() {
        let vitals = ExtractedVitals {
            weight: Some(Measurement::single(74.0, 0)),
            ..Default::default()
        };
        let risk = assess(&VitalBands::classify_all(&vitals));
        assert_eq!(risk.overall_risk_level, RiskLevel::Low);
        assert_eq!(risk.risk_factor_count, 0);
        assert_eq!(risk.recommendations, vec!["Continuare controlli regolari"]);
    }

    #[test]
    fn non_abnormal_bands_are_ignored() {
        let bands = VitalBands::from_pairs(&[
            (VitalType::BloodPressure, Band::Elevated),
            (VitalType::Glucose, Band::Low),
            (VitalType::Temperature, Band::Low),
            (VitalType::Bmi, Band::Overweight),
        ]);
        let risk = assess(&bands);
        assert!(risk.risk_factors.is_empty());
        assert_eq!(risk.overall_risk_level, RiskLevel::Low);
    }
}
