//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a rule table from loading at all.
///
/// Individual malformed entries are not errors: they are logged and dropped
/// while the rest of the table loads.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rule file could not be read
    #[error("Failed to read rule file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON syntax error, or a TOML document that could not be converted
    #[error("Invalid JSON rule table: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML rule table: {0}")]
    Toml(#[from] toml::de::Error),

    /// Only `.json` and `.toml` rule files are understood
    #[error("Unsupported rule file format: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("Rule table must map container names to transitions, found {0}")]
    NotAMapping(&'static str),
}
