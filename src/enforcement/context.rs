//! Inputs to a single transition check.

use crate::host::{Queue, Ticket};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flat mapping of submitted form keys to values for one attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmittedValues {
    values: HashMap<String, String>,
}

impl SubmittedValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The value under `key`, if present and non-empty.
    ///
    /// This is the only sufficiency test applied to submissions: `"0"` is a
    /// value, `""` is not.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SubmittedValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// What the transition applies to.
#[derive(Clone, Copy)]
pub enum Subject<'a> {
    /// An existing ticket being updated.
    Existing(&'a dyn Ticket),
    /// A ticket being created, in `queue` when the host could supply it.
    New { queue: Option<&'a dyn Queue> },
}

/// One attempted status change.
///
/// For an existing ticket the ticket's own queue and status take
/// precedence over `container` and `from`.
#[derive(Clone, Copy)]
pub struct TransitionRequest<'a> {
    pub subject: Subject<'a>,
    pub container: Option<&'a str>,
    pub from: &'a str,
    pub to: &'a str,
    pub submitted: &'a SubmittedValues,
}

impl<'a> TransitionRequest<'a> {
    /// Status change on an existing ticket.
    pub fn update(ticket: &'a dyn Ticket, to: &'a str, submitted: &'a SubmittedValues) -> Self {
        Self {
            subject: Subject::Existing(ticket),
            container: Some(ticket.queue_name()),
            from: ticket.status(),
            to,
            submitted,
        }
    }

    /// Creation of a ticket in `queue`, starting from `from`.
    pub fn create(
        queue: &'a dyn Queue,
        from: &'a str,
        to: &'a str,
        submitted: &'a SubmittedValues,
    ) -> Self {
        Self {
            subject: Subject::New { queue: Some(queue) },
            container: Some(queue.name()),
            from,
            to,
            submitted,
        }
    }

    pub fn ticket(&self) -> Option<&'a dyn Ticket> {
        match self.subject {
            Subject::Existing(ticket) => Some(ticket),
            Subject::New { .. } => None,
        }
    }

    pub fn is_update(&self) -> bool {
        self.ticket().is_some()
    }

    pub fn effective_container(&self) -> Option<&'a str> {
        match self.subject {
            Subject::Existing(ticket) => Some(ticket.queue_name()),
            Subject::New { queue } => self.container.or_else(|| queue.map(|q| q.name())),
        }
    }

    pub fn effective_from(&self) -> &'a str {
        match self.subject {
            Subject::Existing(ticket) => ticket.status(),
            Subject::New { .. } => self.from,
        }
    }
}
