use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a label does not name any variant of a string-backed enum.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde uses the same string as `as_str`.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// Clinical severity bucket assigned to a parameter value.
    ///
    /// `Unknown` marks an absent value, `Invalid` a value that could not be parsed.
    Band {
        Unknown => "unknown",
        Invalid => "invalid",
        Low => "low",
        Normal => "normal",
        Elevated => "elevated",
        HighStage1 => "high_stage1",
        HighStage2 => "high_stage2",
        High => "high",
        Prediabetes => "prediabetes",
        Diabetes => "diabetes",
        Critical => "critical",
        MildFever => "mild_fever",
        HighFever => "high_fever",
        Underweight => "underweight",
        Overweight => "overweight",
        Obese => "obese",
    }
);

impl Band {
    /// True when the band carries a measured value (neither absent nor unparsable).
    pub fn is_measured(&self) -> bool {
        !matches!(self, Self::Unknown | Self::Invalid)
    }
}

str_enum!(
    /// Overall risk level derived from the number of risk factors.
    RiskLevel {
        Unknown => "unknown",
        Low => "low",
        Moderate => "moderate",
        High => "high",
    }
);

str_enum!(
    /// Abnormal finding surfaced by the risk aggregator. Labels follow the
    /// wording used in the source reports.
    RiskFactor {
        Hypertension => "Ipertensione",
        AbnormalHeartRate => "Frequenza cardiaca anomala",
        HighGlucose => "Glicemia elevata",
        LowSaturation => "Saturazione ossigeno bassa",
        Fever => "Febbre",
        AbnormalBmi => "BMI anomalo",
    }
);
