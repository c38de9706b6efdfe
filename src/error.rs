//! Error types for query building and dispatch

use thiserror::Error;

/// Result type for query operations
pub type Result<T> = std::result::Result<T, QueryError>;

/// Query builder errors
///
/// Only failures raised before a request leaves the process (or by the
/// transport or the config loader) live here. Everything the service answers with is
/// reported through [`crate::Status`] instead.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unknown domain: {0}")]
    UnknownDomain(String),

    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Unknown selector: {0}")]
    UnknownSelector(String),

    #[error("Unknown data format: {0}")]
    UnknownFormat(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
