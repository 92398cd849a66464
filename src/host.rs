//! Interfaces to the ticketing host.
//!
//! The checker never touches storage, forms or localisation directly. It
//! reads the ticket and queue through these traits and defers custom-field
//! format validation to a [`FieldValidator`].

use crate::enforcement::SubmittedValues;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub type CustomFieldId = u64;

/// Failures reported by host collaborators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("custom field catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("queue '{0}' not found")]
    QueueNotFound(String),
}

/// A custom field definition as the host describes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldDescriptor {
    pub id: CustomFieldId,
    pub name: String,
}

impl CustomFieldDescriptor {
    pub fn new(id: CustomFieldId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Ordered collection of custom fields applicable to a ticket or queue.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldCatalog {
    fields: Vec<CustomFieldDescriptor>,
}

impl CustomFieldCatalog {
    pub fn new(fields: Vec<CustomFieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Keep only fields whose name matches one of `names`, ignoring case.
    /// Catalog order is preserved.
    pub fn restrict_to<S: AsRef<str>>(&self, names: &[S]) -> Self {
        let fields = self
            .fields
            .iter()
            .filter(|field| {
                names
                    .iter()
                    .any(|name| name.as_ref().to_lowercase() == field.name.to_lowercase())
            })
            .cloned()
            .collect();
        Self { fields }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomFieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<CustomFieldDescriptor> for CustomFieldCatalog {
    fn from_iter<I: IntoIterator<Item = CustomFieldDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Read access to a ticket that already exists.
pub trait Ticket {
    fn id(&self) -> u64;

    fn status(&self) -> &str;

    fn queue_name(&self) -> &str;

    /// Total time worked so far.
    fn time_worked(&self) -> i64;

    /// Custom fields applicable to this ticket.
    fn custom_fields(&self) -> Result<CustomFieldCatalog, HostError>;

    /// Number of values currently stored on this ticket for `field`.
    fn stored_value_count(&self, field: &CustomFieldDescriptor) -> usize;
}

/// Read access to the queue a new ticket is being created in.
pub trait Queue {
    fn name(&self) -> &str;

    /// Custom fields that tickets in this queue carry.
    fn ticket_custom_fields(&self) -> Result<CustomFieldCatalog, HostError>;
}

/// Outcome of the host's pattern validation of submitted custom-field values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorReport {
    pub all_valid: bool,
    pub messages: HashMap<CustomFieldId, String>,
}

impl ValidatorReport {
    pub fn valid() -> Self {
        Self {
            all_valid: true,
            messages: HashMap::new(),
        }
    }

    pub fn invalid(messages: HashMap<CustomFieldId, String>) -> Self {
        Self {
            all_valid: false,
            messages,
        }
    }

    /// Message for `field`, only when validation failed overall.
    pub fn failure_for(&self, field: CustomFieldId) -> Option<&str> {
        if self.all_valid {
            return None;
        }
        self.messages.get(&field).map(String::as_str)
    }
}

/// Host-side validation of submitted custom-field values.
pub trait FieldValidator {
    /// Validate the values submitted for `catalog` under keys starting
    /// with `prefix`.
    fn validate(
        &self,
        catalog: &CustomFieldCatalog,
        prefix: &str,
        submitted: &SubmittedValues,
    ) -> ValidatorReport;
}

/// Validator that accepts everything, for hosts without format rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl FieldValidator for AcceptAll {
    fn validate(
        &self,
        _catalog: &CustomFieldCatalog,
        _prefix: &str,
        _submitted: &SubmittedValues,
    ) -> ValidatorReport {
        ValidatorReport::valid()
    }
}
