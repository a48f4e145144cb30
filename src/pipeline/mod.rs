pub mod extraction;
pub mod source;
pub mod report;
pub mod processor;

pub use processor::{DocumentProcessor, ProcessingError, VitalAnalysis, VitalsEngine};
pub use report::{write_results, DocumentOutcome, DocumentReport, FailedDocument};
pub use source::{is_supported, PlainTextSource, TextSource};
