//! Field references named by transition rules.
//!
//! A rule lists the fields that must carry a value before a ticket may
//! enter a status. Two classes exist: a fixed set of built-in core fields
//! and user-defined custom fields, written `CF.<name>` in configuration.

use crate::host::Ticket;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking a custom field in raw configuration (matched case-insensitively).
pub const CUSTOM_FIELD_PREFIX: &str = "CF.";

/// Built-in ticket fields that transition rules may require.
///
/// Any other core name found in configuration is unsupported and is
/// dropped while the rule table is normalised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoreField {
    Content,
    TimeWorked,
    TimeTaken,
}

/// Reads the accumulated value of a core field from an existing ticket.
pub type AccumulatedValue = fn(&dyn Ticket) -> i64;

impl CoreField {
    pub const ALL: [CoreField; 3] = [Self::Content, Self::TimeWorked, Self::TimeTaken];

    /// Configuration name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Self::Content => "Content",
            Self::TimeWorked => "TimeWorked",
            Self::TimeTaken => "TimeTaken",
        }
    }

    /// Parse a configuration name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Key under which an update form submits this field.
    ///
    /// Time taken is entered through the same box as time worked on update
    /// forms, so both map to `UpdateTimeWorked`.
    pub fn update_key(self) -> &'static str {
        match self {
            Self::Content => "UpdateContent",
            Self::TimeWorked | Self::TimeTaken => "UpdateTimeWorked",
        }
    }

    /// Key under which the field is submitted. Creation forms use the bare name.
    pub fn submission_key(self, updating: bool) -> &'static str {
        if updating {
            self.update_key()
        } else {
            self.name()
        }
    }

    /// Human label, e.g. `TimeWorked` becomes `Time Worked`.
    pub fn label(self) -> String {
        humanize_field_name(self.name())
    }

    /// Accessor for fields that reflect state accumulated on the ticket.
    ///
    /// A non-zero accumulated value satisfies the requirement even when the
    /// form submits nothing. Only time worked accumulates.
    pub fn accumulated(self) -> Option<AccumulatedValue> {
        match self {
            Self::TimeWorked => Some(ticket_time_worked as AccumulatedValue),
            Self::Content | Self::TimeTaken => None,
        }
    }
}

impl fmt::Display for CoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field named by a transition rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldReference {
    Core(CoreField),
    /// Custom field by bare name, prefix already stripped.
    Custom(String),
}

impl FieldReference {
    /// Parse a raw configuration entry.
    ///
    /// `CF.Name` and `CF.{Name}` (prefix in any case) yield a custom field.
    /// A supported core name yields a core field. Anything else, including
    /// a bare `CF.` prefix, yields `None`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transition_mandates::core::{CoreField, FieldReference};
    ///
    /// assert_eq!(
    ///     FieldReference::parse("TimeWorked"),
    ///     Some(FieldReference::Core(CoreField::TimeWorked))
    /// );
    /// assert_eq!(
    ///     FieldReference::parse("cf.{Root Cause}"),
    ///     Some(FieldReference::Custom("Root Cause".to_string()))
    /// );
    /// assert_eq!(FieldReference::parse("Owner"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        match strip_custom_prefix(raw) {
            Some(rest) => {
                let name = rest
                    .strip_prefix('{')
                    .and_then(|inner| inner.strip_suffix('}'))
                    .unwrap_or(rest)
                    .trim();
                (!name.is_empty()).then(|| Self::Custom(name.to_string()))
            }
            None => CoreField::from_name(raw).map(Self::Core),
        }
    }

}

impl fmt::Display for FieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core(field) => write!(f, "{field}"),
            Self::Custom(name) => write!(f, "{CUSTOM_FIELD_PREFIX}{name}"),
        }
    }
}

fn ticket_time_worked(ticket: &dyn Ticket) -> i64 {
    ticket.time_worked()
}

fn strip_custom_prefix(raw: &str) -> Option<&str> {
    let head = raw.get(..CUSTOM_FIELD_PREFIX.len())?;
    if head.eq_ignore_ascii_case(CUSTOM_FIELD_PREFIX) {
        Some(&raw[CUSTOM_FIELD_PREFIX.len()..])
    } else {
        None
    }
}

/// Insert a space at every lowercase-to-uppercase boundary.
pub fn humanize_field_name(name: &str) -> String {
    let mut label = String::with_capacity(name.len() + 2);
    let mut previous_lower = false;
    for ch in name.chars() {
        if previous_lower && ch.is_uppercase() {
            label.push(' ');
        }
        previous_lower = ch.is_lowercase();
        label.push(ch);
    }
    label
}
