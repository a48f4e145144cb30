//! Document processing orchestrator.
//!
//! Drives one document through the pipeline:
//! read text → clean → normalize → extract → derive → classify → assess → report.
//!
//! Text acquisition goes through the `TextSource` trait so the orchestrator
//! stays testable without touching the filesystem, and so an OCR collaborator
//! can be plugged in later.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::intelligence::{assess, RiskAssessment, VitalBands};
use crate::pipeline::extraction::{
    sanitize_extracted_text, ExtractedVitals, Normalizer, VitalExtractor,
};

use super::report::{
    text_sample, DocumentMetadata, DocumentOutcome, DocumentReport, ExtractionInfo,
    ExtractionStats, FailedDocument, VitalParameters,
};
use super::source::{PlainTextSource, TextSource};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur around the core: reading inputs and writing results.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Input is neither a file nor a directory: {}", .0.display())]
    InvalidInput(PathBuf),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Everything the core derives from one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalAnalysis {
    pub vitals: ExtractedVitals,
    pub bands: VitalBands,
    pub risk: RiskAssessment,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Pure text-to-assessment core. Holds only immutable tables, so one
/// instance can be shared across threads.
#[derive(Debug, Default)]
pub struct VitalsEngine {
    normalizer: Normalizer,
    extractor: VitalExtractor,
}

impl VitalsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom synonym tables.
    pub fn with_normalizer(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            extractor: VitalExtractor::new(),
        }
    }

    /// Normalize, extract every parameter and derive BMI.
    pub fn extract(&self, text: &str) -> ExtractedVitals {
        let normalized = self.normalizer.normalize(text);
        self.extractor.extract_all(&normalized).with_derived()
    }

    /// Full analysis of one text. Never fails; missing data shows up as
    /// absent values and `unknown` bands.
    pub fn analyze(&self, text: &str) -> VitalAnalysis {
        let vitals = self.extract(text);
        let bands = VitalBands::classify_all(&vitals);
        let risk = assess(&bands);
        tracing::debug!(
            extracted = vitals.present_count(),
            risk_level = %risk.overall_risk_level,
            factors = risk.risk_factor_count,
            "Text analyzed"
        );
        VitalAnalysis {
            vitals,
            bands,
            risk,
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Turns files into `DocumentReport`s.
///
/// Pure pipeline logic with trait-based DI. Does NOT write result files;
/// that belongs to the caller (see `report::write_results`).
pub struct DocumentProcessor {
    engine: VitalsEngine,
    source: Box<dyn TextSource + Send + Sync>,
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new(VitalsEngine::new(), Box::new(PlainTextSource))
    }
}

impl DocumentProcessor {
    pub fn new(engine: VitalsEngine, source: Box<dyn TextSource + Send + Sync>) -> Self {
        Self { engine, source }
    }

    /// Full pipeline for one file.
    ///
    /// 1. Read recognized text through the source
    /// 2. Clean OCR noise
    /// 3. Analyze (normalize, extract, derive, classify, assess)
    /// 4. Assemble the report with metadata and text samples
    pub fn process_file(&self, path: &Path) -> Result<DocumentReport, ProcessingError> {
        let raw = self.source.read_text(path)?;
        let file_size_bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        if raw.trim().is_empty() {
            tracing::warn!(path = %path.display(), "No text found in document");
        }

        let cleaned = sanitize_extracted_text(&raw);
        let analysis = self.engine.analyze(&cleaned);
        let stats = ExtractionStats::from_vitals(&analysis.vitals);

        tracing::info!(
            path = %path.display(),
            extracted = stats.extracted_parameters,
            risk_level = %analysis.risk.overall_risk_level,
            "Processing complete"
        );

        Ok(DocumentReport {
            metadata: DocumentMetadata::for_path(path, file_size_bytes),
            extraction_info: ExtractionInfo::new(stats, &raw, &cleaned),
            vital_parameters: VitalParameters::build(&analysis.vitals, &analysis.bands),
            risk_assessment: analysis.risk,
            raw_text_sample: text_sample(&raw),
            cleaned_text_sample: text_sample(&cleaned),
        })
    }

    /// Every accepted file directly inside `dir`, sorted by name.
    ///
    /// A file that fails becomes a `Failed` entry; the batch goes on.
    pub fn process_directory(&self, dir: &Path) -> Result<Vec<DocumentOutcome>, ProcessingError> {
        if !dir.is_dir() {
            return Err(ProcessingError::InputNotFound(dir.to_path_buf()));
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && self.source.accepts(p))
            .collect();
        files.sort();

        if files.is_empty() {
            tracing::warn!(dir = %dir.display(), "No supported files in directory");
            return Ok(Vec::new());
        }
        tracing::info!(dir = %dir.display(), files = files.len(), "Processing directory");

        Ok(files
            .into_iter()
            .map(|path| match self.process_file(&path) {
                Ok(report) => DocumentOutcome::Processed(Box::new(report)),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to process document, continuing"
                    );
                    DocumentOutcome::Failed(FailedDocument::new(&path, &e))
                }
            })
            .collect())
    }

    /// Single file or directory, decided by what `path` is.
    pub fn process_path(&self, path: &Path) -> Result<Vec<DocumentOutcome>, ProcessingError> {
        if !path.exists() {
            return Err(ProcessingError::InputNotFound(path.to_path_buf()));
        }
        if path.is_file() {
            let report = self.process_file(path)?;
            Ok(vec![DocumentOutcome::Processed(Box::new(report))])
        } else if path.is_dir() {
            self.process_directory(path)
        } else {
            Err(ProcessingError::InvalidInput(path.to_path_buf()))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
