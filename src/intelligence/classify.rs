use serde::{Deserialize, Serialize};

use crate::models::{Band, Measurement, VitalType};
use crate::pipeline::extraction::ExtractedVitals;

// ---------------------------------------------------------------------------
// Threshold tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Bound {
    Below(f64),
    AtMost(f64),
}

impl Bound {
    fn admits(self, value: f64) -> bool {
        match self {
            Bound::Below(limit) => value < limit,
            Bound::AtMost(limit) => value <= limit,
        }
    }
}

/// Condition on (primary, secondary). Two-value rules never match a
/// single-value measurement.
#[derive(Debug, Clone, Copy)]
enum Rule {
    Value(Bound),
    Both(Bound, Bound),
    Either(Bound, Bound),
    Otherwise,
}

impl Rule {
    fn admits(self, m: &Measurement) -> bool {
        match self {
            Rule::Value(bound) => bound.admits(m.value_primary),
            Rule::Both(a, b) => m
                .value_secondary
                .is_some_and(|s| a.admits(m.value_primary) && b.admits(s)),
            Rule::Either(a, b) => m
                .value_secondary
                .is_some_and(|s| a.admits(m.value_primary) || b.admits(s)),
            Rule::Otherwise => true,
        }
    }
}

struct BandRule {
    band: Band,
    rule: Rule,
}

const fn band(band: Band, rule: Rule) -> BandRule {
    BandRule { band, rule }
}

/// The elevated/high_stage1 edge is order dependent (125/85 is neither
/// "≤129 and ≤80" nor obviously stage 1); first match in this order decides.
const BLOOD_PRESSURE_BANDS: &[BandRule] = &[
    band(Band::Low, Rule::Either(Bound::Below(90.0), Bound::Below(60.0))),
    band(Band::Normal, Rule::Both(Bound::AtMost(120.0), Bound::AtMost(80.0))),
    band(Band::Elevated, Rule::Both(Bound::AtMost(129.0), Bound::AtMost(80.0))),
    band(Band::HighStage1, Rule::Either(Bound::AtMost(139.0), Bound::AtMost(89.0))),
    band(Band::HighStage2, Rule::Otherwise),
];

const HEART_RATE_BANDS: &[BandRule] = &[
    band(Band::Low, Rule::Value(Bound::Below(60.0))),
    band(Band::Normal, Rule::Value(Bound::AtMost(100.0))),
    band(Band::High, Rule::Otherwise),
];

const GLUCOSE_BANDS: &[BandRule] = &[
    band(Band::Low, Rule::Value(Bound::Below(70.0))),
    band(Band::Normal, Rule::Value(Bound::AtMost(100.0))),
    band(Band::Prediabetes, Rule::Value(Bound::AtMost(125.0))),
    band(Band::Diabetes, Rule::Otherwise),
];

const SATURATION_BANDS: &[BandRule] = &[
    band(Band::Critical, Rule::Value(Bound::Below(90.0))),
    band(Band::Low, Rule::Value(Bound::Below(95.0))),
    band(Band::Normal, Rule::Otherwise),
];

const TEMPERATURE_BANDS: &[BandRule] = &[
    band(Band::Low, Rule::Value(Bound::Below(36.1))),
    band(Band::Normal, Rule::Value(Bound::AtMost(37.2))),
    band(Band::MildFever, Rule::Value(Bound::AtMost(38.0))),
    band(Band::HighFever, Rule::Otherwise),
];

const BMI_BANDS: &[BandRule] = &[
    band(Band::Underweight, Rule::Value(Bound::Below(18.5))),
    band(Band::Normal, Rule::Value(Bound::Below(25.0))),
    band(Band::Overweight, Rule::Value(Bound::Below(30.0))),
    band(Band::Obese, Rule::Otherwise),
];

/// Weight and height only feed BMI and have no table.
fn bands_for(vital: VitalType) -> &'static [BandRule] {
    match vital {
        VitalType::BloodPressure => BLOOD_PRESSURE_BANDS,
        VitalType::HeartRate => HEART_RATE_BANDS,
        VitalType::Glucose => GLUCOSE_BANDS,
        VitalType::Saturation => SATURATION_BANDS,
        VitalType::Temperature => TEMPERATURE_BANDS,
        VitalType::Bmi => BMI_BANDS,
        VitalType::Weight | VitalType::Height => &[],
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Map a measurement to its clinical band. Absent → `Unknown`.
pub fn classify(vital: VitalType, measurement: Option<&Measurement>) -> Band {
    let Some(m) = measurement else {
        return Band::Unknown;
    };
    bands_for(vital)
        .iter()
        .find(|r| r.rule.admits(m))
        .map_or(Band::Unknown, |r| r.band)
}

/// Classify a canonical string such as `"135/85 mmHg"`.
/// Absent or blank → `Unknown`; unparsable → `Invalid`.
pub fn classify_canonical(vital: VitalType, canonical: Option<&str>) -> Band {
    if bands_for(vital).is_empty() {
        return Band::Unknown;
    }
    match canonical.map(str::trim) {
        None | Some("") => Band::Unknown,
        Some(s) => match Measurement::parse_canonical(vital, s) {
            Some(m) => classify(vital, Some(&m)),
            None => Band::Invalid,
        },
    }
}

/// Band per parameter for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalBands {
    entries: Vec<(VitalType, Band)>,
    /// Some value was found, weight and height included.
    any_present: bool,
}

impl VitalBands {
    pub fn classify_all(vitals: &ExtractedVitals) -> Self {
        Self {
            entries: VitalType::ALL
                .iter()
                .map(|v| (*v, classify(*v, vitals.get(*v))))
                .collect(),
            any_present: vitals.present_count() > 0,
        }
    }

    /// Build from explicit bands; parameters not listed are `Unknown`.
    /// A listed band other than `Unknown` counts as a present value.
    pub fn from_pairs(pairs: &[(VitalType, Band)]) -> Self {
        Self {
            entries: VitalType::ALL
                .iter()
                .map(|v| {
                    let band = pairs
                        .iter()
                        .rev()
                        .find(|(p, _)| p == v)
                        .map_or(Band::Unknown, |(_, b)| *b);
                    (*v, band)
                })
                .collect(),
            any_present: pairs.iter().any(|(_, b)| *b != Band::Unknown),
        }
    }

    pub fn get(&self, vital: VitalType) -> Band {
        self.entries
            .iter()
            .find(|(v, _)| *v == vital)
            .map_or(Band::Unknown, |(_, b)| *b)
    }

    /// True when the document had at least one value, classified or not.
    pub fn any_present(&self) -> bool {
        self.any_present
    }
}
