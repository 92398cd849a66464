//! Required-field enforcement for status transitions.
//!
//! The [`MandatoryFieldChecker`] uses Stillwater's `Validation` type to
//! accumulate ALL violations for an attempt instead of stopping at the
//! first missing field, so the user sees every field to fill in at once.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use transition_mandates::enforcement::{
//!     MandatoryFieldChecker, RuleTableBuilder, SubmittedValues, Subject, TransitionRequest,
//! };
//! use transition_mandates::host::AcceptAll;
//!
//! let rules = RuleTableBuilder::new()
//!     .require("*", "new -> resolved", ["TimeWorked"])
//!     .build();
//! let checker = MandatoryFieldChecker::new(Arc::new(rules), AcceptAll);
//!
//! let submitted = SubmittedValues::new();
//! let request = TransitionRequest {
//!     subject: Subject::New { queue: None },
//!     container: None,
//!     from: "new",
//!     to: "resolved",
//!     submitted: &submitted,
//! };
//!
//! let violations = checker.check(&request);
//! assert_eq!(
//!     violations[0].to_string(),
//!     "Time Worked is required when changing Status to resolved"
//! );
//! ```

pub mod builder;
pub mod context;
pub mod rules;
pub mod violations;

// Re-export commonly used types
pub use builder::RuleTableBuilder;
pub use context::{SubmittedValues, Subject, TransitionRequest};
pub use rules::{FieldCheck, MandatoryFieldChecker};
pub use violations::FieldViolation;
