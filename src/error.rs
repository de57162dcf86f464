use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Startup failures. Any of these stops the process before it serves.
#[derive(Debug, Error)]
pub enum AppError {
    // ------------------- Config / CLI -------------------
    #[error("missing required environment variable: {key}")]
    MissingEnv { key: &'static str },

    #[error("invalid configuration: {msg}")]
    Config { msg: String },

    #[error("could not load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("unknown time zone {name:?}: {reason}")]
    TimeZone { name: String, reason: String },

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}
