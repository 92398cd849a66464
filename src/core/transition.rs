//! Structured transition keys.
//!
//! Configuration spells a transition as `"<from> -> <to>"` with `*` standing
//! for any status on either side. Keys are parsed once, at load time, into a
//! [`TransitionPattern`] so that resolution only compares structured values.
//!
//! Whitespace around the arrow is optional: `open->resolved` and
//! `open -> resolved` are the same pattern. When a container lists both,
//! the entry later in the file wins.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Wildcard token for containers and statuses.
pub const WILDCARD: &str = "*";

const ARROW: &str = "->";

/// Reasons a raw transition key cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionKeyError {
    #[error("transition key '{0}' has no '->' separator")]
    MissingArrow(String),

    #[error("transition key '{0}' has more than one '->' separator")]
    RepeatedArrow(String),

    #[error("transition key '{0}' has an empty status")]
    EmptyStatus(String),
}

/// A `from -> to` pair where `None` is the wildcard.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionPattern {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl TransitionPattern {
    pub fn new(from: Option<&str>, to: Option<&str>) -> Self {
        Self {
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        }
    }

    /// Parse `"<from> -> <to>"`. Whitespace around either status is ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use transition_mandates::core::TransitionPattern;
    ///
    /// let pattern = TransitionPattern::parse("* -> resolved").unwrap();
    /// assert_eq!(pattern.from, None);
    /// assert_eq!(pattern.to.as_deref(), Some("resolved"));
    /// ```
    pub fn parse(key: &str) -> Result<Self, TransitionKeyError> {
        let (from, to) = key
            .split_once(ARROW)
            .ok_or_else(|| TransitionKeyError::MissingArrow(key.to_string()))?;
        if to.contains(ARROW) {
            return Err(TransitionKeyError::RepeatedArrow(key.to_string()));
        }

        let side = |status: &str| -> Result<Option<String>, TransitionKeyError> {
            match status.trim() {
                "" => Err(TransitionKeyError::EmptyStatus(key.to_string())),
                WILDCARD => Ok(None),
                status => Ok(Some(status.to_string())),
            }
        };

        Ok(Self {
            from: side(from)?,
            to: side(to)?,
        })
    }
}

impl fmt::Display for TransitionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {ARROW} {}",
            self.from.as_deref().unwrap_or(WILDCARD),
            self.to.as_deref().unwrap_or(WILDCARD)
        )
    }
}

/// Lookup tiers, tried in declaration order.
///
/// `AnySource` (`* -> to`) deliberately precedes `AnyDestination`
/// (`from -> *`): when both are configured the destination-specific rule
/// wins. A `* -> *` pattern matches no tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    AnySource,
    AnyDestination,
}

impl MatchTier {
    pub const PRECEDENCE: [MatchTier; 3] = [Self::Exact, Self::AnySource, Self::AnyDestination];

    /// Whether `pattern` is the key this tier looks up for `from -> to`.
    pub fn matches(self, pattern: &TransitionPattern, from: &str, to: &str) -> bool {
        match (self, pattern.from.as_deref(), pattern.to.as_deref()) {
            (Self::Exact, Some(f), Some(t)) => f == from && t == to,
            (Self::AnySource, None, Some(t)) => t == to,
            (Self::AnyDestination, Some(f), None) => f == from,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exact_and_wildcard_keys() {
        assert_eq!(
            TransitionPattern::parse("open -> resolved").unwrap(),
            TransitionPattern::new(Some("open"), Some("resolved"))
        );
        assert_eq!(
            TransitionPattern::parse("open->*").unwrap(),
            TransitionPattern::new(Some("open"), None)
        );
        assert_eq!(
            TransitionPattern::parse("  *  ->  * ").unwrap(),
            TransitionPattern::new(None, None)
        );
    }

    #[test]
    fn statuses_keep_their_case() {
        let pattern = TransitionPattern::parse("Open -> Resolved").unwrap();
        assert_eq!(pattern.from.as_deref(), Some("Open"));
        assert!(!MatchTier::Exact.matches(&pattern, "open", "resolved"));
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(matches!(
            TransitionPattern::parse("resolved"),
            Err(TransitionKeyError::MissingArrow(_))
        ));
        assert!(matches!(
            TransitionPattern::parse("a -> b -> c"),
            Err(TransitionKeyError::RepeatedArrow(_))
        ));
        assert!(matches!(
            TransitionPattern::parse(" -> resolved"),
            Err(TransitionKeyError::EmptyStatus(_))
        ));
    }

    #[test]
    fn display_uses_configuration_syntax() {
        assert_eq!(
            TransitionPattern::new(None, Some("resolved")).to_string(),
            "* -> resolved"
        );
    }

    #[test]
    fn tiers_only_match_their_own_shape() {
        let exact = TransitionPattern::new(Some("a"), Some("b"));
        let any_source = TransitionPattern::new(None, Some("b"));
        let any_destination = TransitionPattern::new(Some("a"), None);
        let any = TransitionPattern::new(None, None);

        assert!(MatchTier::Exact.matches(&exact, "a", "b"));
        assert!(!MatchTier::Exact.matches(&any_source, "a", "b"));
        assert!(MatchTier::AnySource.matches(&any_source, "a", "b"));
        assert!(!MatchTier::AnySource.matches(&any_destination, "a", "b"));
        assert!(MatchTier::AnyDestination.matches(&any_destination, "a", "b"));

        for tier in MatchTier::PRECEDENCE {
            assert!(!tier.matches(&any, "a", "b"));
        }
    }
}
