//! End-to-end transition checks against in-memory host collaborators.

use std::collections::HashMap;
use std::sync::Arc;
use transition_mandates::enforcement::{
    FieldViolation, MandatoryFieldChecker, SubmittedValues, TransitionRequest,
};
use transition_mandates::host::{
    AcceptAll, CustomFieldCatalog, CustomFieldDescriptor, FieldValidator, HostError, Queue,
    Ticket, ValidatorReport,
};
use transition_mandates::{CheckerSettings, RuleTable};

const RULES: &str = r#"{
    "Helpdesk": {"* -> resolved": ["TimeWorked", "CF.Resolution"]},
    "*": {"* -> resolved": ["CF.Category"]}
}"#;

fn catalog() -> CustomFieldCatalog {
    [
        CustomFieldDescriptor::new(1, "Category"),
        CustomFieldDescriptor::new(2, "Resolution"),
        CustomFieldDescriptor::new(3, "Due Date"),
    ]
    .into_iter()
    .collect()
}

struct MemoryTicket {
    id: u64,
    status: String,
    queue: String,
    time_worked: i64,
    stored: HashMap<u64, usize>,
}

impl MemoryTicket {
    fn new(queue: &str, status: &str) -> Self {
        Self {
            id: 1001,
            status: status.to_string(),
            queue: queue.to_string(),
            time_worked: 0,
            stored: HashMap::new(),
        }
    }
}

impl Ticket for MemoryTicket {
    fn id(&self) -> u64 {
        self.id
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn queue_name(&self) -> &str {
        &self.queue
    }

    fn time_worked(&self) -> i64 {
        self.time_worked
    }

    fn custom_fields(&self) -> Result<CustomFieldCatalog, HostError> {
        Ok(catalog())
    }

    fn stored_value_count(&self, field: &CustomFieldDescriptor) -> usize {
        self.stored.get(&field.id).copied().unwrap_or(0)
    }
}

struct MemoryQueue {
    name: String,
    available: bool,
}

impl Queue for MemoryQueue {
    fn name(&self) -> &str {
        &self.name
    }

    fn ticket_custom_fields(&self) -> Result<CustomFieldCatalog, HostError> {
        if self.available {
            Ok(catalog())
        } else {
            Err(HostError::QueueNotFound(self.name.clone()))
        }
    }
}

/// Rejects any submitted single value that is not all uppercase.
struct UppercaseOnly;

impl FieldValidator for UppercaseOnly {
    fn validate(
        &self,
        catalog: &CustomFieldCatalog,
        prefix: &str,
        submitted: &SubmittedValues,
    ) -> ValidatorReport {
        let messages: HashMap<u64, String> = catalog
            .iter()
            .filter(|field| {
                submitted
                    .get(&format!("{prefix}{}-Value", field.id))
                    .is_some_and(|value| value != value.to_uppercase())
            })
            .map(|field| (field.id, "Input must be uppercase".to_string()))
            .collect();

        if messages.is_empty() {
            ValidatorReport::valid()
        } else {
            ValidatorReport::invalid(messages)
        }
    }
}

fn checker<V: FieldValidator>(validator: V) -> MandatoryFieldChecker<V> {
    let rules = RuleTable::from_json_str(RULES).expect("rules load");
    MandatoryFieldChecker::new(Arc::new(rules), validator)
}

fn messages(violations: &[FieldViolation]) -> Vec<String> {
    violations.iter().map(FieldViolation::message).collect()
}

#[test]
fn helpdesk_resolution_reports_time_worked_then_resolution() {
    let ticket = MemoryTicket::new("Helpdesk", "open");
    let submitted = SubmittedValues::from_iter([("Status", "resolved")]);
    let request = TransitionRequest::update(&ticket, "resolved", &submitted);

    assert_eq!(
        messages(&checker(AcceptAll).check(&request)),
        vec![
            "Time Worked is required when changing Status to resolved",
            "Resolution is required when changing Status to resolved",
        ]
    );
}

#[test]
fn other_queue_falls_back_to_default_rules() {
    let ticket = MemoryTicket::new("Support", "open");
    let submitted = SubmittedValues::from_iter([("Status", "resolved")]);
    let request = TransitionRequest::update(&ticket, "resolved", &submitted);

    assert_eq!(
        messages(&checker(AcceptAll).check(&request)),
        vec!["Category is required when changing Status to resolved"]
    );
}

#[test]
fn satisfied_requirements_allow_the_transition() {
    let mut ticket = MemoryTicket::new("Helpdesk", "open");
    ticket.time_worked = 45;
    let submitted = SubmittedValues::from_iter([
        ("Status", "resolved"),
        ("Object-RT::Ticket-1001-CustomField-2-Value", "FIXED"),
    ]);
    let request = TransitionRequest::update(&ticket, "resolved", &submitted);

    assert!(checker(UppercaseOnly).check(&request).is_empty());
}

#[test]
fn stored_custom_value_counts_without_resubmission() {
    let mut ticket = MemoryTicket::new("Support", "open");
    ticket.stored.insert(1, 2);
    let submitted = SubmittedValues::new();
    let request = TransitionRequest::update(&ticket, "resolved", &submitted);

    assert!(checker(AcceptAll).check(&request).is_empty());
}

#[test]
fn zero_is_a_submitted_value() {
    let ticket = MemoryTicket::new("Helpdesk", "open");
    let submitted = SubmittedValues::from_iter([
        ("UpdateTimeWorked", "0"),
        ("Object-RT::Ticket-1001-CustomField-2-Value", "DONE"),
    ]);
    let request = TransitionRequest::update(&ticket, "resolved", &submitted);

    assert!(checker(AcceptAll).check(&request).is_empty());
}

#[test]
fn format_failure_replaces_required_message() {
    let ticket = MemoryTicket::new("Helpdesk", "open");
    let submitted = SubmittedValues::from_iter([
        ("UpdateTimeWorked", "10"),
        ("Object-RT::Ticket-1001-CustomField-2-Value", "fixed"),
    ]);
    let request = TransitionRequest::update(&ticket, "resolved", &submitted);

    let violations = checker(UppercaseOnly).check(&request);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].label(), "Resolution");
    assert_eq!(violations[0].message(), "Resolution: Input must be uppercase");
}

#[test]
fn creation_checks_bare_keys_against_the_queue() {
    let queue = MemoryQueue {
        name: "Helpdesk".to_string(),
        available: true,
    };
    let submitted = SubmittedValues::from_iter([("Status", "resolved"), ("UpdateTimeWorked", "5")]);
    let request = TransitionRequest::create(&queue, "new", "resolved", &submitted);

    let violations = checker(AcceptAll).check(&request);
    let labels: Vec<_> = violations.iter().map(FieldViolation::label).collect();
    assert_eq!(labels, vec!["Time Worked", "Resolution"]);
}

#[test]
fn unavailable_catalog_lets_custom_fields_through() {
    let queue = MemoryQueue {
        name: "Helpdesk".to_string(),
        available: false,
    };
    let submitted = SubmittedValues::from_iter([("TimeWorked", "5")]);
    let request = TransitionRequest::create(&queue, "new", "resolved", &submitted);

    assert!(checker(AcceptAll).check(&request).is_empty());
}

#[test]
fn staying_in_the_same_status_needs_nothing() {
    let ticket = MemoryTicket::new("Helpdesk", "resolved");
    let submitted = SubmittedValues::new();
    let request = TransitionRequest::update(&ticket, "resolved", &submitted);

    assert!(checker(AcceptAll).check(&request).is_empty());
}

#[test]
fn custom_object_type_changes_submission_keys() {
    let ticket = MemoryTicket::new("Support", "open");
    let submitted =
        SubmittedValues::from_iter([("Object-Ticket-1001-CustomField-1-Value", "Hardware")]);
    let request = TransitionRequest::update(&ticket, "resolved", &submitted);

    let settings = CheckerSettings {
        object_type: "Ticket".to_string(),
        ..CheckerSettings::default()
    };
    assert!(checker(AcceptAll)
        .with_settings(settings)
        .check(&request)
        .is_empty());
    assert_eq!(checker(AcceptAll).check(&request).len(), 1);
}
