pub mod config;
pub mod models;
pub mod pipeline;
pub mod intelligence;

use tracing_subscriber::EnvFilter;

pub use pipeline::{DocumentProcessor, ProcessingError, VitalAnalysis, VitalsEngine};

/// Install the global tracing subscriber, logging to stderr.
///
/// The filter comes from `VITALSCAN_LOG`, falling back to
/// `config::default_log_filter()`. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(config::LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
