//! Field violations reported back to the host.

use thiserror::Error;

/// A required field that blocks the transition.
///
/// `Display` renders the message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldViolation {
    #[error("{label} is required when changing Status to {status}")]
    Required { label: String, status: String },

    /// The host validator rejected the submitted value's format.
    #[error("{label}: {message}")]
    Invalid { label: String, message: String },
}

impl FieldViolation {
    /// Human label of the offending field.
    pub fn label(&self) -> &str {
        match self {
            Self::Required { label, .. } | Self::Invalid { label, .. } => label,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}
