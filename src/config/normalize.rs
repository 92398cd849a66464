//! Normalisation of raw rule documents into transition maps.
//!
//! Runs once, before any resolution. Malformed entries are dropped with a
//! warning so that one bad rule never disables the others.

use super::error::ConfigError;
use crate::core::{FieldReference, TransitionMap, TransitionPattern};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Normalise a `{container: {"from -> to": fields}}` document.
pub fn normalize(document: &Value) -> Result<HashMap<String, TransitionMap>, ConfigError> {
    let Value::Object(containers) = document else {
        return Err(ConfigError::NotAMapping(kind(document)));
    };

    let mut normalized = HashMap::with_capacity(containers.len());
    for (container, transitions) in containers {
        let Value::Object(transitions) = transitions else {
            warn!(
                container = container.as_str(),
                found = kind(transitions),
                "container rules must be a mapping of transitions; dropping container"
            );
            continue;
        };

        let mut rules = TransitionMap::new();
        for (key, spec) in transitions {
            let pattern = match TransitionPattern::parse(key) {
                Ok(pattern) => pattern,
                Err(err) => {
                    warn!(container = container.as_str(), error = %err, "dropping transition rule");
                    continue;
                }
            };
            let Some(raw) = field_spec(container, key, spec) else {
                continue;
            };
            let fields = parse_field_list(container, &pattern, raw);
            if rules.insert(pattern, fields).is_some() {
                warn!(
                    container = container.as_str(),
                    transition = key.as_str(),
                    "transition configured twice; keeping the later entry"
                );
            }
        }
        normalized.insert(container.clone(), rules);
    }
    Ok(normalized)
}

/// Coerce a field spec to a list of names: a bare string becomes a
/// one-element list, non-string list items are dropped, anything else
/// drops the whole rule.
fn field_spec<'v>(container: &str, key: &str, spec: &'v Value) -> Option<Vec<&'v str>> {
    match spec {
        Value::String(name) => Some(vec![name.as_str()]),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| {
                    let name = item.as_str();
                    if name.is_none() {
                        warn!(
                            container,
                            transition = key,
                            found = kind(item),
                            "field names must be strings; dropping entry"
                        );
                    }
                    name
                })
                .collect(),
        ),
        other => {
            warn!(
                container,
                transition = key,
                found = kind(other),
                "fields must be a string or a list of strings; dropping rule"
            );
            None
        }
    }
}

/// Parse field names, dropping the ones no field class supports.
pub(crate) fn parse_field_list<'s>(
    container: &str,
    pattern: &TransitionPattern,
    raw: impl IntoIterator<Item = &'s str>,
) -> Vec<FieldReference> {
    raw.into_iter()
        .filter_map(|name| {
            let field = FieldReference::parse(name);
            if field.is_none() {
                debug!(
                    container,
                    transition = %pattern,
                    field = name,
                    "ignoring unsupported field"
                );
            }
            field
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
