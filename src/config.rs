/// Application-level constants
pub const APP_NAME: &str = "vitalscan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version stamped into every document report.
pub const PROCESSOR_VERSION: &str = "1.0";

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV_VAR: &str = "VITALSCAN_LOG";

/// Extensions (lowercase, no dot) accepted by the plain-text source.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text"];

/// Characters of raw/cleaned text kept in a report sample.
pub const TEXT_SAMPLE_CHARS: usize = 500;

/// Filter used when `VITALSCAN_LOG` is unset or unparsable.
pub fn default_log_filter() -> &'static str {
    "vitalscan=info,vitalscan_lib=info"
}
