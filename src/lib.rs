//! Transition Mandates: required-field enforcement for ticket status changes
//!
//! A ticketing host asks this crate, once per attempted status change,
//! which required fields are still missing. Rules are configured per queue
//! and per transition; the answer is an ordered list of violations the host
//! shows to the user before refusing the change.
//!
//! The crate follows a "pure core, imperative shell" split:
//!
//! - **Core**: the frozen [`RuleTable`] and required-field resolution
//! - **Config**: one-time loading, normalisation and freezing of rules
//! - **Enforcement**: the [`MandatoryFieldChecker`], which reads the ticket
//!   and submitted form through the [`host`] traits
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use transition_mandates::core::RuleTable;
//! use transition_mandates::enforcement::{
//!     MandatoryFieldChecker, SubmittedValues, Subject, TransitionRequest,
//! };
//! use transition_mandates::host::AcceptAll;
//!
//! let rules = RuleTable::from_json_str(
//!     r#"{"*": {"* -> resolved": ["Content", "TimeWorked"]}}"#,
//! )
//! .unwrap();
//! let checker = MandatoryFieldChecker::new(Arc::new(rules), AcceptAll);
//!
//! let submitted = SubmittedValues::from_iter([("Content", "Fixed the printer")]);
//! let request = TransitionRequest {
//!     subject: Subject::New { queue: None },
//!     container: Some("Facilities"),
//!     from: "new",
//!     to: "resolved",
//!     submitted: &submitted,
//! };
//!
//! let violations = checker.check(&request);
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].label(), "Time Worked");
//! ```

pub mod config;
pub mod core;
pub mod enforcement;
pub mod host;

// Re-export commonly used types
pub use crate::config::{CheckerSettings, ConfigError};
pub use crate::core::{CoreField, FieldReference, ResolvedFields, RuleTable};
pub use crate::enforcement::{
    FieldViolation, MandatoryFieldChecker, SubmittedValues, TransitionRequest,
};
