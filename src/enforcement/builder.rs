//! Builder API for assembling a rule table in code.

use crate::config::normalize::parse_field_list;
use crate::core::{RuleTable, TransitionMap, TransitionPattern};
use std::collections::HashMap;
use tracing::warn;

/// Builder for creating a frozen [`RuleTable`] without a configuration file.
///
/// Entries go through the same normalisation as loaded configuration:
/// unparsable transition keys are logged and skipped, unsupported field
/// names are dropped.
///
/// # Example
///
/// ```rust
/// use transition_mandates::enforcement::RuleTableBuilder;
///
/// let table = RuleTableBuilder::new()
///     .require("Helpdesk", "* -> resolved", ["TimeWorked", "CF.Resolution"])
///     .require("*", "* -> resolved", ["CF.Category"])
///     .build();
///
/// assert_eq!(table.resolve(Some("Support"), "open", "resolved").custom, ["Category"]);
/// ```
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    containers: HashMap<String, TransitionMap>,
}

impl RuleTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `fields` when `container` goes through `transition`.
    ///
    /// Repeating a transition for the same container replaces its fields.
    pub fn require<I, S>(mut self, container: &str, transition: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pattern = match TransitionPattern::parse(transition) {
            Ok(pattern) => pattern,
            Err(err) => {
                warn!(container, error = %err, "skipping transition rule");
                return self;
            }
        };
        let raw: Vec<S> = fields.into_iter().collect();
        let fields = parse_field_list(container, &pattern, raw.iter().map(|field| field.as_ref()));
        self.containers
            .entry(container.to_string())
            .or_default()
            .insert(pattern, fields);
        self
    }

    /// Freeze the collected rules.
    pub fn build(self) -> RuleTable {
        RuleTable::freeze(self.containers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CoreField;

    #[test]
    fn builder_skips_malformed_transition_keys() {
        let table = RuleTableBuilder::new()
            .require("Q", "resolved", ["TimeWorked"])
            .require("Q", "open -> resolved", ["Content"])
            .build();

        let rules = table.container("Q").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(
            table.resolve(Some("Q"), "open", "resolved").core,
            vec![CoreField::Content]
        );
    }

    #[test]
    fn builder_drops_unsupported_fields() {
        let table = RuleTableBuilder::new()
            .require("Q", "* -> resolved", ["Owner", "TimeWorked", "CF.Impact"])
            .build();

        let resolved = table.resolve(Some("Q"), "open", "resolved");
        assert_eq!(resolved.core, vec![CoreField::TimeWorked]);
        assert_eq!(resolved.custom, vec!["Impact".to_string()]);
    }

    #[test]
    fn builder_accepts_empty_field_lists() {
        let table = RuleTableBuilder::new()
            .require("Q", "open -> resolved", Vec::<String>::new())
            .require("Q", "* -> resolved", ["TimeWorked"])
            .build();

        assert!(table.resolve(Some("Q"), "open", "resolved").is_empty());
        assert!(!table.resolve(Some("Q"), "new", "resolved").is_empty());
    }
}
