//! Opt-in well-formedness check for specifications.
//!
//! The engine itself validates lazily: a dangling event target is only
//! reported when that event fires. [`Specification::check`] lets a caller
//! surface every such problem up front instead, accumulating all of them
//! with Stillwater's `Validation` rather than stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use serde_json::Value;
//! use stillwater::validation::Validation;
//! use waypoint::{Event, SpecIssue, Specification};
//!
//! let spec = Specification::<()>::build(Value::Null, |spec| {
//!     spec.state("draft", |s| {
//!         s.event(Event::new("review", "reveiwed"));
//!     });
//!     spec.state("reviewed", |_| {});
//! });
//!
//! match spec.check() {
//!     Validation::Failure(issues) => assert_eq!(issues.len(), 1),
//!     Validation::Success(_) => panic!("typo should be reported"),
//! }
//! ```

mod issues;

pub use issues::SpecIssue;

use crate::core::Specification;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

impl<C> Specification<C> {
    /// Report every structural issue of this graph.
    ///
    /// Never run implicitly; building, amending and instantiating stay lazy.
    pub fn check(&self) -> Validation<(), NonEmptyVec<SpecIssue>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<SpecIssue>>> = Vec::new();

        if self.states().is_empty() {
            checks.push(Validation::fail(SpecIssue::NoStates));
        }

        for state in self.states() {
            for event in state.events() {
                let check = if self.state(event.transitions_to()).is_some() {
                    Validation::success(())
                } else {
                    Validation::fail(SpecIssue::UnknownTarget {
                        state: state.name().to_string(),
                        event: event.name().to_string(),
                        target: event.transitions_to().to_string(),
                    })
                };
                checks.push(check);
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;
    use serde_json::Value;

    #[test]
    fn well_formed_specification_passes() {
        let spec = Specification::<()>::build(Value::Null, |spec| {
            spec.state("a", |s| {
                s.event(Event::new("go", "b"));
            });
            spec.state("b", |s| {
                s.event(Event::new("back", "a"));
            });
        });

        assert!(spec.check().is_success());
    }

    #[test]
    fn empty_specification_is_reported() {
        let spec = Specification::<()>::build(Value::Null, |_| {});

        match spec.check() {
            Validation::Failure(issues) => {
                assert_eq!(issues.len(), 1);
                assert!(issues.iter().any(|i| matches!(i, SpecIssue::NoStates)));
            }
            Validation::Success(_) => panic!("expected an issue"),
        }
    }

    #[test]
    fn check_accumulates_every_dangling_target() {
        let spec = Specification::<()>::build(Value::Null, |spec| {
            spec.state("a", |s| {
                s.event(Event::new("go", "b"))
                    .event(Event::new("vanish", "void"));
            });
            spec.state("b", |s| {
                s.event(Event::new("teleport", "elsewhere"));
            });
        });

        match spec.check() {
            Validation::Failure(issues) => {
                assert_eq!(issues.len(), 2);
                assert!(issues.iter().any(|i| matches!(
                    i,
                    SpecIssue::UnknownTarget { target, .. } if target == "void"
                )));
                assert!(issues.iter().any(|i| matches!(
                    i,
                    SpecIssue::UnknownTarget { state, .. } if state == "b"
                )));
            }
            Validation::Success(_) => panic!("expected issues"),
        }
    }

    #[test]
    fn issue_messages_name_the_event() {
        let issue = SpecIssue::UnknownTarget {
            state: "a".into(),
            event: "go".into(),
            target: "void".into(),
        };
        assert_eq!(
            issue.to_string(),
            "event 'go' on state 'a' transitions to undeclared state 'void'"
        );
    }
}
