//! Text acquisition. The pipeline only sees recognized text; where it comes
//! from (a text file today, an OCR engine tomorrow) sits behind `TextSource`.

use std::path::Path;

use crate::config::SUPPORTED_EXTENSIONS;

use super::processor::ProcessingError;

/// Produces the recognized text of one input file.
pub trait TextSource {
    fn read_text(&self, path: &Path) -> Result<String, ProcessingError>;

    /// Whether this source can read `path`, judged by name only.
    fn accepts(&self, path: &Path) -> bool {
        is_supported(path)
    }
}

/// Reads already-recognized text from UTF-8 files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn read_text(&self, path: &Path) -> Result<String, ProcessingError> {
        if !path.exists() {
            return Err(ProcessingError::InputNotFound(path.to_path_buf()));
        }
        if !self.accepts(path) {
            return Err(ProcessingError::UnsupportedFormat(path.to_path_buf()));
        }
        Ok(std::fs::read_to_string(path)?)
    }
}

/// True when the extension of `path` is in `SUPPORTED_EXTENSIONS`, any case.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_extensions_ignore_case() {
        assert!(is_supported(Path::new("referto.txt")));
        assert!(is_supported(Path::new("REFERTO.TXT")));
        assert!(is_supported(Path::new("a/b/c.text")));
        assert!(!is_supported(Path::new("scan.pdf")));
        assert!(!is_supported(Path::new("noext")));
    }

    #[test]
    fn reads_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.txt");
        std::fs::write(&path, "PA 120/80 mmHg").unwrap();
        assert_eq!(PlainTextSource.read_text(&path).unwrap(), "PA 120/80 mmHg");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlainTextSource
            .read_text(&dir.path().join("missing.txt"))
            .unwrap_err();
        assert!(matches!(err, ProcessingError::InputNotFound(_)));
    }

    #[test]
    fn other_extension_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        std::fs::write(&path, [0u8, 1, 2]).unwrap();
        let err = PlainTextSource.read_text(&path).unwrap_err();
        assert!(matches!(err, ProcessingError::UnsupportedFormat(_)));
    }
}
