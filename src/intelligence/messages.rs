use crate::models::RiskFactor;

/// Recommendation text per risk factor, in the language of the source reports.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Recommendation lines for one factor, in display order.
    pub fn recommendations(factor: RiskFactor) -> &'static [&'static str] {
        match factor {
            RiskFactor::Hypertension => &[
                "Consultare un medico per la pressione alta",
                "Ridurre il consumo di sale",
            ],
            RiskFactor::AbnormalHeartRate => &["Controllo cardiologico"],
            RiskFactor::HighGlucose => &[
                "Controllo diabetologico",
                "Monitoraggio glicemia regolare",
            ],
            RiskFactor::LowSaturation => &["Consulenza medica urgente"],
            RiskFactor::Fever => &["Monitoraggio temperatura", "Idratazione adeguata"],
            RiskFactor::AbnormalBmi => &["Consulenza nutrizionale"],
        }
    }

    /// Emitted when no factor applies.
    pub fn routine_checks() -> &'static str {
        "Continuare controlli regolari"
    }
}
