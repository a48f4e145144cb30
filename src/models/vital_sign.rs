use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Type of vital sign parameter, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalType {
    BloodPressure,
    HeartRate,
    Glucose,
    Saturation,
    Temperature,
    Weight,
    Height,
    Bmi,
}

impl VitalType {
    /// All parameters in the order they are reported and checked.
    pub const ALL: [VitalType; 8] = [
        VitalType::BloodPressure,
        VitalType::HeartRate,
        VitalType::Glucose,
        VitalType::Saturation,
        VitalType::Temperature,
        VitalType::Weight,
        VitalType::Height,
        VitalType::Bmi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VitalType::BloodPressure => "blood_pressure",
            VitalType::HeartRate => "heart_rate",
            VitalType::Glucose => "glucose",
            VitalType::Saturation => "saturation",
            VitalType::Temperature => "temperature",
            VitalType::Weight => "weight",
            VitalType::Height => "height",
            VitalType::Bmi => "bmi",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "blood_pressure" => Some(VitalType::BloodPressure),
            "heart_rate" => Some(VitalType::HeartRate),
            "glucose" => Some(VitalType::Glucose),
            "saturation" => Some(VitalType::Saturation),
            "temperature" => Some(VitalType::Temperature),
            "weight" => Some(VitalType::Weight),
            "height" => Some(VitalType::Height),
            "bmi" => Some(VitalType::Bmi),
            _ => None,
        }
    }

    /// Fixed unit for this parameter.
    pub fn default_unit(self) -> &'static str {
        match self {
            VitalType::BloodPressure => "mmHg",
            VitalType::HeartRate => "bpm",
            VitalType::Glucose => "mg/dL",
            VitalType::Saturation => "%",
            VitalType::Temperature => "°C",
            VitalType::Weight => "kg",
            VitalType::Height => "cm",
            VitalType::Bmi => "kg/m²",
        }
    }

    /// Reference range shown next to the value in reports.
    pub fn normal_range(self) -> &'static str {
        match self {
            VitalType::BloodPressure => "90-120/60-80 mmHg",
            VitalType::HeartRate => "60-100 bpm",
            VitalType::Glucose => "70-100 mg/dL (fasting)",
            VitalType::Saturation => "95-100%",
            VitalType::Temperature => "36.1-37.2°C",
            VitalType::Weight => "varies by height/age",
            VitalType::Height => "varies by age/gender",
            VitalType::Bmi => "18.5-24.9",
        }
    }
}

static RE_CANONICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)(?:\s*/\s*(\d+(?:\.\d+)?))?\s*(.*?)\s*$")
        .expect("Invalid canonical value regex")
});

/// A validated vital sign value.
///
/// Kept numeric end to end; the canonical string (`"135/85 mmHg"`, `"36.7°C"`)
/// only exists at the output boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value_primary: f64,
    pub value_secondary: Option<f64>, // diastolic for blood_pressure
    /// Decimal places used when rendering.
    pub precision: u8,
}

impl Measurement {
    pub fn single(value: f64, precision: u8) -> Self {
        Self {
            value_primary: value,
            value_secondary: None,
            precision,
        }
    }

    pub fn pair(primary: f64, secondary: f64) -> Self {
        Self {
            value_primary: primary,
            value_secondary: Some(secondary),
            precision: 0,
        }
    }

    /// Render as the canonical `<value><unit>` string for `vital`.
    pub fn canonical(&self, vital: VitalType) -> String {
        let p = self.precision as usize;
        let primary = format!("{:.*}", p, self.value_primary);
        match vital {
            VitalType::BloodPressure => match self.value_secondary {
                Some(dia) => format!("{}/{:.*} mmHg", primary, p, dia),
                None => format!("{} mmHg", primary),
            },
            VitalType::Saturation => format!("{}%", primary),
            VitalType::Temperature => format!("{}°C", primary),
            VitalType::Bmi => primary,
            other => format!("{} {}", primary, other.default_unit()),
        }
    }

    /// Parse a canonical string back into a measurement.
    ///
    /// Accepts the leading number (or `sys/dia` pair for blood pressure)
    /// followed by nothing or the parameter's own unit. Anything else is `None`.
    pub fn parse_canonical(vital: VitalType, s: &str) -> Option<Self> {
        let caps = RE_CANONICAL.captures(s)?;
        let primary_token = caps.get(1)?.as_str();
        let primary = primary_token.parse::<f64>().ok()?;
        let secondary = match caps.get(2) {
            Some(m) => Some(m.as_str().parse::<f64>().ok()?),
            None => None,
        };

        let unit = caps.get(3).map_or("", |m| m.as_str());
        if !unit.is_empty() && !unit.eq_ignore_ascii_case(vital.default_unit()) {
            return None;
        }

        match (vital, secondary) {
            (VitalType::BloodPressure, Some(dia)) => Some(Self::pair(primary, dia)),
            (VitalType::BloodPressure, None) | (_, Some(_)) => None,
            (_, None) => Some(Self::single(primary, decimal_places(primary_token))),
        }
    }
}

/// Number of digits after the decimal point in a numeric token.
pub fn decimal_places(token: &str) -> u8 {
    token
        .split_once('.')
        .map_or(0, |(_, frac)| frac.len().min(u8::MAX as usize) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vital_type_round_trip() {
        for vital in VitalType::ALL {
            assert_eq!(VitalType::from_str(vital.as_str()), Some(vital));
        }
        assert_eq!(VitalType::from_str("pulse"), None);
    }

    #[test]
    fn canonical_strings() {
        assert_eq!(
            Measurement::pair(135.0, 85.0).canonical(VitalType::BloodPressure),
            "135/85 mmHg"
        );
        assert_eq!(Measurement::single(76.0, 0).canonical(VitalType::HeartRate), "76 bpm");
        assert_eq!(Measurement::single(102.0, 0).canonical(VitalType::Glucose), "102 mg/dL");
        assert_eq!(Measurement::single(96.0, 0).canonical(VitalType::Saturation), "96%");
        assert_eq!(Measurement::single(36.7, 1).canonical(VitalType::Temperature), "36.7°C");
        assert_eq!(Measurement::single(65.5, 1).canonical(VitalType::Weight), "65.5 kg");
        assert_eq!(Measurement::single(179.0, 0).canonical(VitalType::Height), "179 cm");
        assert_eq!(Measurement::single(23.1, 1).canonical(VitalType::Bmi), "23.1");
    }

    #[test]
    fn precision_is_preserved() {
        assert_eq!(Measurement::single(37.0, 1).canonical(VitalType::Temperature), "37.0°C");
    }

    #[test]
    fn parse_canonical_accepts_own_unit() {
        let bp = Measurement::parse_canonical(VitalType::BloodPressure, "135/85 mmHg").unwrap();
        assert_eq!(bp.value_primary, 135.0);
        assert_eq!(bp.value_secondary, Some(85.0));

        let t = Measurement::parse_canonical(VitalType::Temperature, "36.7°C").unwrap();
        assert_eq!(t.value_primary, 36.7);
        assert_eq!(t.precision, 1);

        let bmi = Measurement::parse_canonical(VitalType::Bmi, "23.1").unwrap();
        assert_eq!(bmi.value_primary, 23.1);
    }

    #[test]
    fn parse_canonical_rejects_garbage() {
        assert!(Measurement::parse_canonical(VitalType::HeartRate, "fast").is_none());
        assert!(Measurement::parse_canonical(VitalType::HeartRate, "76 kg").is_none());
        assert!(Measurement::parse_canonical(VitalType::BloodPressure, "135 mmHg").is_none());
        assert!(Measurement::parse_canonical(VitalType::Glucose, "120/80").is_none());
    }

    #[test]
    fn decimal_places_counts_fraction() {
        assert_eq!(decimal_places("74"), 0);
        assert_eq!(decimal_places("36.7"), 1);
        assert_eq!(decimal_places("1.75"), 2);
    }
}
