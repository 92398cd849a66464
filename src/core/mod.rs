//! Rule data model and required-field resolution.
//!
//! Everything in this module is pure: the rule table is immutable once
//! built and resolution only reads it.

mod field;
mod table;
mod transition;

pub use field::{
    humanize_field_name, AccumulatedValue, CoreField, FieldReference, CUSTOM_FIELD_PREFIX,
};
pub use table::{ResolvedFields, RuleTable, TransitionMap};
pub use transition::{MatchTier, TransitionKeyError, TransitionPattern, WILDCARD};
