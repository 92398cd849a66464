//! Checker settings.

use serde::{Deserialize, Serialize};

/// Host conventions the checker needs to read submitted forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerSettings {
    /// Record type embedded in custom-field submission keys.
    #[serde(default = "default_object_type")]
    pub object_type: String,

    /// Submitted key carrying the target status.
    #[serde(default = "default_status_field")]
    pub status_field: String,
}

fn default_object_type() -> String {
    "RT::Ticket".to_string()
}

fn default_status_field() -> String {
    "Status".to_string()
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            object_type: default_object_type(),
            status_field: default_status_field(),
        }
    }
}
