//! Well-formedness issues reported by [`Specification::check`].
//!
//! [`Specification::check`]: crate::Specification::check

use thiserror::Error;

/// A problem that would only surface once an affected event fires.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SpecIssue {
    #[error("specification declares no states")]
    NoStates,

    #[error("event '{event}' on state '{state}' transitions to undeclared state '{target}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },
}
