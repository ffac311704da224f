mod config;
pub use config::{LogFormat, LogLevel, LoggerConfig};

mod error;
pub use error::LoggerError;

mod init;

/// Initializes the global tracing subscriber with the given configuration.
///
/// Call once from `main` before any request handling starts; a second call
/// fails with [`LoggerError::AlreadyInitialized`]. All `tracing` macros
/// (`info!`, `warn!`, ...) route through the installed subscriber afterwards.
pub fn init_logger(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    match cfg.format {
        LogFormat::Text => init::logger_text(cfg),
        LogFormat::Json => init::logger_json(cfg),
        LogFormat::Journald => init::logger_journald(cfg),
    }
}
