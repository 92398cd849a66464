//! Loading and freezing the transition rule table.
//!
//! Rules are read once from JSON or TOML, normalised, and frozen into an
//! immutable [`RuleTable`] that is then passed explicitly to the checker.
//!
//! ```toml
//! ["*"]
//! "* -> resolved" = ["CF.Category"]
//!
//! [Helpdesk]
//! "* -> resolved" = ["TimeWorked", "CF.Resolution"]
//! "open -> stalled" = "Content"
//! ```

pub mod error;
pub mod normalize;
pub mod settings;

pub use error::ConfigError;
pub use settings::CheckerSettings;

use crate::core::RuleTable;
use serde_json::Value;
use std::path::Path;

impl RuleTable {
    /// Normalise and freeze an already-parsed rule document.
    pub fn from_json_value(document: &Value) -> Result<Self, ConfigError> {
        Ok(Self::freeze(normalize::normalize(document)?))
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let document: Value = serde_json::from_str(source)?;
        Self::from_json_value(&document)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let document: toml::Value = toml::from_str(source)?;
        Self::from_json_value(&serde_json::to_value(document)?)
    }

    /// Load a `.json` or `.toml` rule file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&source),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&source),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}
