pub mod classify;
pub mod messages;
pub mod risk;
pub mod types;

pub use classify::{classify, classify_canonical, VitalBands};
pub use messages::MessageTemplates;
pub use risk::assess;
pub use types::RiskAssessment;
