//! Per-parameter extraction cascades.
//!
//! Within each list, label-anchored patterns come first and bare-number
//! fallbacks last: a bare `NN kg` may belong to something other than the patient.

use serde::{Deserialize, Serialize};

use crate::models::{Measurement, VitalType};

use super::cascade::{Cascade, Plausibility, ValueReading};
use super::derived::compute_bmi;

pub const BLOOD_PRESSURE_PATTERNS: &[&str] = &[
    r"(?i)(?:pressione|pa|press)\s*[:\s]*(\d{2,3})\s*/\s*(\d{2,3})\s*mmhg",
    r"(?i)(\d{2,3})\s*/\s*(\d{2,3})\s*mmhg",
    r"(?i)(?:pressione|pa)\s*[:\s]*(\d{2,3})\s*/\s*(\d{2,3})",
    r"(?i)(?:sistolica|sist)\s*[:\s]*(\d{2,3}).*?(?:diastolica|diast)\s*[:\s]*(\d{2,3})",
];

pub const HEART_RATE_PATTERNS: &[&str] = &[
    r"(?i)(?:frequenza|fc|freq)\s*[:\s]*(\d{2,3})\s*bpm",
    r"(?i)(\d{2,3})\s*bpm",
    r"(?i)(?:frequenza|fc|battiti)\s*[:\s]*(\d{2,3})",
    r"(?i)(?:polso|pulse)\s*[:\s]*(\d{2,3})",
];

pub const GLUCOSE_PATTERNS: &[&str] = &[
    r"(?i)(?:glicemia|glucosio|gluc)\s*[:\s]*(\d{2,3})\s*mg/dl",
    r"(?i)(?:glicemia|glucosio)\s*[:\s]*(\d{2,3})",
    r"(?i)glucose?\s*:?\s*(\d{2,3})\s*mg/dl",
    r"(?i)bg\s*:?\s*(\d{2,3})",
];

pub const SATURATION_PATTERNS: &[&str] = &[
    r"(?i)(?:saturazione|sat|spo2)\s*[:\s]*(\d{2,3})\s*%",
    r"(?i)spo2\s*[:\s]*(\d{2,3})",
    r"(?i)(?:saturazione|ossigenazione)\s*[:\s]*(\d{2,3})",
    r"(?i)o2\s*[:\s]*(\d{2,3})\s*%",
];

pub const TEMPERATURE_PATTERNS: &[&str] = &[
    r"(?i)(?:temperatura|temp|febbre)\s*[:\s]*(\d{2,3}\.?\d?)\s*°c",
    r"(?i)(?:temperatura|temp)\s*[:\s]*(\d{2,3}\.?\d?)",
    r"(?i)(\d{2,3}\.\d)\s*°c",
    r"(?i)(?:febbre|fever)\s*[:\s]*(\d{2,3}\.?\d?)",
];

pub const WEIGHT_PATTERNS: &[&str] = &[
    r"(?i)(?:peso|weight|wt)\s*[:\s]*(\d{2,3}\.?\d?)\s*kg",
    r"(?i)(?:peso|weight)\s*[:\s]*(\d{2,3}\.?\d?)",
    r"(?i)(\d{2,3}\.?\d?)\s*kg(?:\s|$)",
    r"(?i)body\s*weight\s*[:\s]*(\d{2,3}\.?\d?)",
];

pub const HEIGHT_PATTERNS: &[&str] = &[
    r"(?i)(?:altezza|height|ht)\s*[:\s]*(\d{3})\s*cm",
    r"(?i)(?:altezza|height)\s*[:\s]*(\d{3})",
    r"(?i)(\d{3})\s*cm(?:\s|$)",
    r"(?i)(?:statura|tall)\s*[:\s]*(\d{3})",
    r"(?i)(\d)\.\d{2}\s*m",
];

/// Values found in one document. `None` means not found or not plausible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedVitals {
    pub blood_pressure: Option<Measurement>,
    pub heart_rate: Option<Measurement>,
    pub glucose: Option<Measurement>,
    pub saturation: Option<Measurement>,
    pub temperature: Option<Measurement>,
    pub weight: Option<Measurement>,
    pub height: Option<Measurement>,
    pub bmi: Option<Measurement>,
}

impl ExtractedVitals {
    pub fn get(&self, vital: VitalType) -> Option<&Measurement> {
        self.slot(vital).as_ref()
    }

    pub fn set(&mut self, vital: VitalType, value: Option<Measurement>) {
        *self.slot_mut(vital) = value;
    }

    /// Canonical string for `vital`, if present.
    pub fn canonical(&self, vital: VitalType) -> Option<String> {
        self.get(vital).map(|m| m.canonical(vital))
    }

    /// Number of parameters present, BMI included.
    pub fn present_count(&self) -> usize {
        VitalType::ALL
            .iter()
            .filter(|v| self.get(**v).is_some())
            .count()
    }

    /// Fill in the derived metrics from the primary readings.
    pub fn with_derived(mut self) -> Self {
        self.bmi = compute_bmi(self.weight.as_ref(), self.height.as_ref());
        self
    }

    fn slot(&self, vital: VitalType) -> &Option<Measurement> {
        match vital {
            VitalType::BloodPressure => &self.blood_pressure,
            VitalType::HeartRate => &self.heart_rate,
            VitalType::Glucose => &self.glucose,
            VitalType::Saturation => &self.saturation,
            VitalType::Temperature => &self.temperature,
            VitalType::Weight => &self.weight,
            VitalType::Height => &self.height,
            VitalType::Bmi => &self.bmi,
        }
    }

    fn slot_mut(&mut self, vital: VitalType) -> &mut Option<Measurement> {
        match vital {
            VitalType::BloodPressure => &mut self.blood_pressure,
            VitalType::HeartRate => &mut self.heart_rate,
            VitalType::Glucose => &mut self.glucose,
            VitalType::Saturation => &mut self.saturation,
            VitalType::Temperature => &mut self.temperature,
            VitalType::Weight => &mut self.weight,
            VitalType::Height => &mut self.height,
            VitalType::Bmi => &mut self.bmi,
        }
    }
}

/// Runs the seven primary cascades over normalized text.
#[derive(Debug, Clone)]
pub struct VitalExtractor {
    cascades: Vec<Cascade>,
}

impl Default for VitalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl VitalExtractor {
    pub fn new() -> Self {
        let cascade = |vital, patterns, plausibility, reading| {
            Cascade::new(vital, patterns, plausibility, reading)
                .expect("Invalid vital extraction regex pattern")
        };

        Self {
            cascades: vec![
                cascade(
                    VitalType::BloodPressure,
                    BLOOD_PRESSURE_PATTERNS,
                    Plausibility::pair(70.0..=250.0, 40.0..=150.0),
                    ValueReading::Captured,
                ),
                cascade(
                    VitalType::HeartRate,
                    HEART_RATE_PATTERNS,
                    Plausibility::single(40.0..=200.0),
                    ValueReading::Captured,
                ),
                cascade(
                    VitalType::Glucose,
                    GLUCOSE_PATTERNS,
                    Plausibility::single(50.0..=500.0),
                    ValueReading::Captured,
                ),
                cascade(
                    VitalType::Saturation,
                    SATURATION_PATTERNS,
                    Plausibility::single(70.0..=100.0),
                    ValueReading::Captured,
                ),
                cascade(
                    VitalType::Temperature,
                    TEMPERATURE_PATTERNS,
                    Plausibility::single(35.0..=42.0),
                    ValueReading::Captured,
                ),
                cascade(
                    VitalType::Weight,
                    WEIGHT_PATTERNS,
                    Plausibility::single(20.0..=300.0),
                    ValueReading::Captured,
                ),
                cascade(
                    VitalType::Height,
                    HEIGHT_PATTERNS,
                    Plausibility::single(100.0..=250.0),
                    ValueReading::MetresOrCentimetres,
                ),
            ],
        }
    }

    /// Cascade used for `vital`. BMI has none: it is derived.
    pub fn cascade(&self, vital: VitalType) -> Option<&Cascade> {
        self.cascades.iter().find(|c| c.vital() == vital)
    }

    /// Extract a single parameter from normalized text.
    pub fn extract(&self, vital: VitalType, normalized: &str) -> Option<Measurement> {
        self.cascade(vital)?.extract(normalized)
    }

    /// Extract every primary parameter. BMI is left empty; see
    /// [`ExtractedVitals::with_derived`].
    pub fn extract_all(&self, normalized: &str) -> ExtractedVitals {
        let mut vitals = ExtractedVitals::default();
        for cascade in &self.cascades {
            vitals.set(cascade.vital(), cascade.extract(normalized));
        }
        vitals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(vital: VitalType, text: &str) -> Option<String> {
        VitalExtractor::new()
            .extract(vital, text)
            .map(|m| m.canonical(vital))
    }

    #[test]
    fn blood_pressure_variants() {
        assert_eq!(
            extract(VitalType::BloodPressure, "pressione 120/80 mmhg"),
            Some("120/80 mmHg".into())
        );
        assert_eq!(
            extract(VitalType::BloodPressure, "pressione: 135/85 mmHg"),
            Some("135/85 mmHg".into())
        );
        assert_eq!(extract(VitalType::BloodPressure, "press. 110/70"), None);
        assert_eq!(
            extract(VitalType::BloodPressure, "pressione 110/70 polso 62"),
            Some("110/70 mmHg".into())
        );
        assert_eq!(
            extract(VitalType::BloodPressure, "sistolica 140 diastolica 90"),
            Some("140/90 mmHg".into())
        );
    }

    #[test]
    fn blood_pressure_both_values_gated() {
        assert_eq!(extract(VitalType::BloodPressure, "pressione 260/80 mmhg"), None);
        assert_eq!(extract(VitalType::BloodPressure, "pressione 120/30 mmhg"), None);
    }

    #[test]
    fn labelled_pressure_preferred_over_bare_reading() {
        // both strategy 1 and 2 match; the label-anchored one is listed first
        let text = "controllo 150/95 mmhg poi pressione 120/80 mmhg";
        assert_eq!(extract(VitalType::BloodPressure, text), Some("120/80 mmHg".into()));
    }

    #[test]
    fn heart_rate_variants() {
        assert_eq!(extract(VitalType::HeartRate, "frequenza 75 bpm"), Some("75 bpm".into()));
        assert_eq!(extract(VitalType::HeartRate, "frequenza: 68 bpm"), Some("68 bpm".into()));
        assert_eq!(extract(VitalType::HeartRate, "polso 82 bpm"), Some("82 bpm".into()));
        assert_eq!(extract(VitalType::HeartRate, "pulse 90"), Some("90 bpm".into()));
        assert_eq!(extract(VitalType::HeartRate, "frequenza 30 bpm"), None);
    }

    #[test]
    fn glucose_variants() {
        assert_eq!(extract(VitalType::Glucose, "glicemia 95 mg/dL"), Some("95 mg/dL".into()));
        assert_eq!(extract(VitalType::Glucose, "glicemia 110"), Some("110 mg/dL".into()));
        assert_eq!(extract(VitalType::Glucose, "glucose: 102 mg/dl"), Some("102 mg/dL".into()));
        assert_eq!(extract(VitalType::Glucose, "bg: 88"), Some("88 mg/dL".into()));
        assert_eq!(extract(VitalType::Glucose, "glicemia 40"), None);
    }

    #[test]
    fn saturation_variants() {
        assert_eq!(extract(VitalType::Saturation, "saturazione 98%"), Some("98%".into()));
        assert_eq!(extract(VitalType::Saturation, "SpO2: 96%"), Some("96%".into()));
        assert_eq!(extract(VitalType::Saturation, "saturazione 99"), Some("99%".into()));
        assert_eq!(extract(VitalType::Saturation, "saturazione 120%"), None);
    }

    #[test]
    fn temperature_variants() {
        assert_eq!(extract(VitalType::Temperature, "temperatura 36.7°C"), Some("36.7°C".into()));
        assert_eq!(extract(VitalType::Temperature, "temperatura: 37.1"), Some("37.1°C".into()));
        assert_eq!(extract(VitalType::Temperature, "assente (36.4°C)"), Some("36.4°C".into()));
        assert_eq!(extract(VitalType::Temperature, "temperatura 45.0°C"), None);
    }

    #[test]
    fn weight_variants() {
        assert_eq!(extract(VitalType::Weight, "peso 74 kg"), Some("74 kg".into()));
        assert_eq!(extract(VitalType::Weight, "peso corporeo: 65.5 kg "), Some("65.5 kg".into()));
        assert_eq!(extract(VitalType::Weight, "peso: 58"), Some("58 kg".into()));
        assert_eq!(extract(VitalType::Weight, "peso 15 kg"), None);
    }

    #[test]
    fn height_variants() {
        assert_eq!(extract(VitalType::Height, "altezza 179 cm"), Some("179 cm".into()));
        assert_eq!(extract(VitalType::Height, "statura: 165 cm"), Some("165 cm".into()));
        assert_eq!(extract(VitalType::Height, "alto 1.75 m"), Some("175 cm".into()));
        assert_eq!(extract(VitalType::Height, "altezza 300 cm"), None);
    }

    #[test]
    fn out_of_range_values_never_surface() {
        let text = "pressione 300/200 mmhg frequenza 250 bpm glicemia 600 mg/dl \
                    saturazione 50% temperatura 44.0°c peso 400 kg altezza 260 cm";
        let vitals = VitalExtractor::new().extract_all(text);
        assert_eq!(vitals, ExtractedVitals::default());
    }

    #[test]
    fn extract_all_leaves_bmi_to_derivation() {
        let vitals = VitalExtractor::new().extract_all("peso 74 kg altezza 179 cm");
        assert!(vitals.bmi.is_none());
        let vitals = vitals.with_derived();
        assert_eq!(vitals.canonical(VitalType::Bmi), Some("23.1".into()));
        assert_eq!(vitals.present_count(), 3);
    }

    #[test]
    fn bmi_has_no_cascade() {
        assert!(VitalExtractor::new().cascade(VitalType::Bmi).is_none());
    }
}
