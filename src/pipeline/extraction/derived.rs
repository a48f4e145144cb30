use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Measurement, VitalType};

static RE_LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)").expect("Invalid number regex"));

/// Body-mass index from weight (kg) and height (cm), rounded to one decimal.
/// Absent unless both inputs are present.
pub fn compute_bmi(
    weight: Option<&Measurement>,
    height: Option<&Measurement>,
) -> Option<Measurement> {
    let weight_kg = weight?.value_primary;
    let height_m = height?.value_primary / 100.0;
    if weight_kg <= 0.0 || height_m <= 0.0 {
        return None;
    }

    let bmi = weight_kg / (height_m * height_m);
    Some(Measurement::single((bmi * 10.0).round() / 10.0, 1))
}

/// String form of [`compute_bmi`]: takes canonical strings such as `"74 kg"`
/// and `"179 cm"` and returns e.g. `"23.1"`. Any parse failure is `None`.
pub fn compute_bmi_canonical(weight: Option<&str>, height: Option<&str>) -> Option<String> {
    let weight = Measurement::single(leading_number(weight?)?, 0);
    let height = Measurement::single(leading_number(height?)?, 0);
    compute_bmi(Some(&weight), Some(&height)).map(|m| m.canonical(VitalType::Bmi))
}

fn leading_number(s: &str) -> Option<f64> {
    RE_LEADING_NUMBER
        .captures(s)?
        .get(1)?
        .as_str()
        .parse::<f64>()
        .ok()
}
