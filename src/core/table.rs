//! The frozen rule table and required-field resolution.

use super::field::{CoreField, FieldReference};
use super::transition::{MatchTier, TransitionPattern, WILDCARD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Required fields per transition pattern for one container.
///
/// Entries keep configuration order. Re-inserting a pattern replaces its
/// field list in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionMap {
    rules: Vec<(TransitionPattern, Vec<FieldReference>)>,
}

impl TransitionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(
        &mut self,
        pattern: TransitionPattern,
        fields: Vec<FieldReference>,
    ) -> Option<Vec<FieldReference>> {
        match self.rules.iter_mut().find(|(existing, _)| *existing == pattern) {
            Some((_, slot)) => Some(std::mem::replace(slot, fields)),
            None => {
                self.rules.push((pattern, fields));
                None
            }
        }
    }

    /// Fields listed under exactly this pattern.
    pub fn get(&self, pattern: &TransitionPattern) -> Option<&[FieldReference]> {
        self.rules
            .iter()
            .find(|(existing, _)| existing == pattern)
            .map(|(_, fields)| fields.as_slice())
    }

    /// First configured list for `from -> to` in [`MatchTier::PRECEDENCE`] order.
    ///
    /// A present but empty list still wins over lower tiers.
    pub fn lookup(&self, from: &str, to: &str) -> Option<&[FieldReference]> {
        MatchTier::PRECEDENCE.into_iter().find_map(|tier| {
            self.rules
                .iter()
                .find(|(pattern, _)| tier.matches(pattern, from, to))
                .map(|(_, fields)| fields.as_slice())
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Required fields for one transition, split by field class.
///
/// Each list keeps the order the fields were configured in, which is also
/// the order violations are reported in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedFields {
    pub core: Vec<CoreField>,
    pub custom: Vec<String>,
}

impl ResolvedFields {
    pub fn partition(fields: &[FieldReference]) -> Self {
        let mut resolved = Self::default();
        for field in fields {
            match field {
                FieldReference::Core(core) => resolved.core.push(*core),
                FieldReference::Custom(name) => resolved.custom.push(name.clone()),
            }
        }
        resolved
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.custom.is_empty()
    }
}

/// Immutable mapping from container name to its transition rules.
///
/// The `*` container supplies rules for containers without an entry of
/// their own. A table is built once (see [`crate::config`] and
/// [`crate::enforcement::RuleTableBuilder`]) and never changes afterwards,
/// so it can be shared freely between concurrent checks.
#[derive(Clone, Debug)]
pub struct RuleTable {
    containers: HashMap<String, TransitionMap>,
    revision: Uuid,
    loaded_at: DateTime<Utc>,
}

impl RuleTable {
    pub(crate) fn freeze(containers: HashMap<String, TransitionMap>) -> Self {
        let table = Self {
            containers,
            revision: Uuid::new_v4(),
            loaded_at: Utc::now(),
        };
        info!(
            revision = %table.revision,
            containers = table.containers.len(),
            "transition rule table loaded"
        );
        table
    }

    /// A table with no rules; every transition resolves to nothing.
    pub fn empty() -> Self {
        Self::freeze(HashMap::new())
    }

    /// Identifier of this load, for attributing decisions in logs.
    pub fn revision(&self) -> Uuid {
        self.revision
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn container(&self, name: &str) -> Option<&TransitionMap> {
        self.containers.get(name)
    }

    /// Rules that apply to `container`, falling back to the `*` container.
    ///
    /// An absent or empty container name goes straight to `*`.
    pub fn transition_map(&self, container: Option<&str>) -> Option<&TransitionMap> {
        match container.filter(|name| !name.is_empty()) {
            Some(name) => self.containers.get(name).or_else(|| {
                debug!(container = name, "no rules for container, using default rules");
                self.containers.get(WILDCARD)
            }),
            None => self.containers.get(WILDCARD),
        }
    }

    /// Resolve the fields required to move from `from` to `to` in `container`.
    ///
    /// Never fails: missing statuses, unknown containers without a default,
    /// no-op transitions and unmatched transitions all resolve to nothing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transition_mandates::core::CoreField;
    /// use transition_mandates::enforcement::RuleTableBuilder;
    ///
    /// let table = RuleTableBuilder::new()
    ///     .require("Helpdesk", "* -> resolved", ["TimeWorked", "CF.Resolution"])
    ///     .build();
    ///
    /// let resolved = table.resolve(Some("Helpdesk"), "open", "resolved");
    /// assert_eq!(resolved.core, vec![CoreField::TimeWorked]);
    /// assert_eq!(resolved.custom, vec!["Resolution".to_string()]);
    ///
    /// assert!(table.resolve(Some("Helpdesk"), "resolved", "resolved").is_empty());
    /// ```
    pub fn resolve(&self, container: Option<&str>, from: &str, to: &str) -> ResolvedFields {
        if from.is_empty() || to.is_empty() {
            return ResolvedFields::default();
        }
        let Some(rules) = self.transition_map(container) else {
            return ResolvedFields::default();
        };
        if from == to {
            return ResolvedFields::default();
        }

        let resolved = rules
            .lookup(from, to)
            .map(ResolvedFields::partition)
            .unwrap_or_default();
        debug!(
            container = container.unwrap_or(WILDCARD),
            from,
            to,
            core = ?resolved.core,
            custom = ?resolved.custom,
            "resolved required fields"
        );
        resolved
    }
}
