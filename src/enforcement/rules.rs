//! Mandatory-field enforcement for a single transition attempt.

use crate::config::CheckerSettings;
use crate::core::{CoreField, RuleTable};
use crate::enforcement::context::{Subject, TransitionRequest};
use crate::enforcement::violations::FieldViolation;
use crate::host::{
    CustomFieldCatalog, CustomFieldDescriptor, FieldValidator, HostError, ValidatorReport,
};
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, error};

/// Outcome of checking one field.
pub type FieldCheck = Validation<(), NonEmptyVec<FieldViolation>>;

/// Guards status transitions against missing required fields.
///
/// The checker is stateless per call: it resolves the fields required for
/// the attempted transition, then checks core fields followed by custom
/// fields, accumulating every violation in evaluation order.
pub struct MandatoryFieldChecker<V: FieldValidator> {
    rules: Arc<RuleTable>,
    validator: V,
    settings: CheckerSettings,
}

impl<V: FieldValidator> MandatoryFieldChecker<V> {
    pub fn new(rules: Arc<RuleTable>, validator: V) -> Self {
        Self {
            rules,
            validator,
            settings: CheckerSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: CheckerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &CheckerSettings {
        &self.settings
    }

    /// Violations blocking `request`, in reporting order.
    ///
    /// An empty list means the transition may proceed.
    pub fn check(&self, request: &TransitionRequest<'_>) -> Vec<FieldViolation> {
        match self.enforce(request) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(violations) => violations.iter().cloned().collect(),
        }
    }

    /// Check `request`, accumulating ALL violations.
    pub fn enforce(&self, request: &TransitionRequest<'_>) -> FieldCheck {
        let required = self.rules.resolve(
            request.effective_container(),
            request.effective_from(),
            request.to,
        );
        if required.is_empty() {
            return Validation::success(());
        }

        let status = self.target_status(request);
        let mut checks: Vec<FieldCheck> = required
            .core
            .iter()
            .map(|field| check_core_field(*field, request, status))
            .collect();

        if !required.custom.is_empty() {
            checks.extend(self.check_custom_fields(&required.custom, request, status));
        }

        let outcome = Validation::all_vec(checks).map(|_| ());
        debug!(
            revision = %self.rules.revision(),
            to = request.to,
            blocked = outcome.is_failure(),
            "checked mandatory fields"
        );
        outcome
    }

    /// Status named in violation messages.
    fn target_status<'a>(&self, request: &TransitionRequest<'a>) -> &'a str {
        request
            .submitted
            .non_empty(&self.settings.status_field)
            .unwrap_or(request.to)
    }

    /// Key prefix under which the form submits custom-field values.
    pub fn submission_prefix(&self, request: &TransitionRequest<'_>) -> String {
        let id = request
            .ticket()
            .map(|ticket| ticket.id().to_string())
            .unwrap_or_default();
        format!("Object-{}-{id}-CustomField-", self.settings.object_type)
    }

    fn check_custom_fields(
        &self,
        names: &[String],
        request: &TransitionRequest<'_>,
        status: &str,
    ) -> Vec<FieldCheck> {
        let catalog = match custom_field_catalog(request) {
            Ok(catalog) => catalog.restrict_to(names),
            Err(err) => {
                error!(
                    error = %err,
                    container = request.effective_container().unwrap_or_default(),
                    "cannot load custom fields; skipping custom field requirements"
                );
                return Vec::new();
            }
        };

        let prefix = self.submission_prefix(request);
        let report = self.validator.validate(&catalog, &prefix, request.submitted);

        catalog
            .iter()
            .map(|field| check_custom_field(field, &prefix, &report, request, status))
            .collect()
    }
}

fn custom_field_catalog(request: &TransitionRequest<'_>) -> Result<CustomFieldCatalog, HostError> {
    match request.subject {
        Subject::Existing(ticket) => ticket.custom_fields(),
        Subject::New { queue: Some(queue) } => queue.ticket_custom_fields(),
        Subject::New { queue: None } => Err(HostError::CatalogUnavailable(
            "no queue supplied for new ticket".to_string(),
        )),
    }
}

fn check_core_field(field: CoreField, request: &TransitionRequest<'_>, status: &str) -> FieldCheck {
    let key = field.submission_key(request.is_update());
    if request.submitted.non_empty(key).is_some() {
        return Validation::success(());
    }

    let accumulated = field
        .accumulated()
        .zip(request.ticket())
        .map(|(read, ticket)| read(ticket))
        .unwrap_or(0);
    if accumulated != 0 {
        return Validation::success(());
    }

    Validation::fail(FieldViolation::Required {
        label: field.label(),
        status: status.to_string(),
    })
}

fn check_custom_field(
    field: &CustomFieldDescriptor,
    prefix: &str,
    report: &ValidatorReport,
    request: &TransitionRequest<'_>,
    status: &str,
) -> FieldCheck {
    if let Some(message) = report.failure_for(field.id) {
        return Validation::fail(FieldViolation::Invalid {
            label: field.name.clone(),
            message: message.to_string(),
        });
    }

    let base = format!("{prefix}{}", field.id);
    if submitted_custom_value(request, &base).is_some() {
        return Validation::success(());
    }

    // Some field types, dates for instance, are not resubmitted when unchanged.
    let stored = request
        .ticket()
        .is_some_and(|ticket| ticket.stored_value_count(field) > 0);
    if stored {
        return Validation::success(());
    }

    Validation::fail(FieldViolation::Required {
        label: field.name.clone(),
        status: status.to_string(),
    })
}

/// Submitted value for a custom field, honouring the multi-value form convention.
fn submitted_custom_value<'a>(request: &TransitionRequest<'a>, base: &str) -> Option<&'a str> {
    let submitted = request.submitted;
    let values_key = format!("{base}-Values");
    if submitted.contains(&format!("{values_key}-Magic")) && submitted.contains(&values_key) {
        submitted.non_empty(&values_key)
    } else {
        submitted.non_empty(&format!("{base}-Value"))
    }
}
