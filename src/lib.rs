//! Waypoint: a declarative finite state machine engine.
//!
//! A [`Specification`] is an ordered set of named states, each declaring the
//! events that leave it. Events carry an optional guard and action; states
//! carry optional entry and exit hooks; the specification may carry one
//! global transition hook. An [`Instance`] executes a specification against
//! a bound context.
//!
//! # Core Concepts
//!
//! - **Specification**: immutable graph of states and events, shared between
//!   instances
//! - **Registry**: identifier -> specification mapping, with optional
//!   supertype fallback
//! - **Instance**: the executor, holding the current state
//! - **Scope**: the explicit evaluation scope every callback receives
//!
//! Firing an event runs guard, action, global hook, exit hook, the state
//! swap and finally the entry hook, in that order. A rejected transition is
//! either a soft halt, returned as [`Outcome::Halted`], or a forced halt,
//! raised as [`WorkflowError::TransitionHalted`].
//!
//! # Example
//!
//! ```rust
//! use serde_json::{json, Value};
//! use waypoint::{Event, Outcome, Registry};
//!
//! let mut registry: Registry<()> = Registry::new();
//! registry.specify("article", Value::Null, |spec| {
//!     spec.state("draft", |s| {
//!         s.event(Event::new("review", "reviewed").when(|_, args| {
//!             Ok(args.first().and_then(Value::as_bool).unwrap_or(false))
//!         }));
//!     });
//!     spec.state("reviewed", |s| {
//!         s.event(Event::new("publish", "published").action(|_, _| Ok(json!(true))));
//!     });
//!     spec.state("published", |_| {});
//! });
//!
//! let mut article = registry.instantiate("article", None).unwrap();
//! assert_eq!(article.state(), "draft");
//!
//! let outcome = article.fire("review", &[json!(false)]).unwrap();
//! assert!(outcome.is_halted());
//! assert_eq!(article.state(), "draft");
//!
//! article.fire("review", &[json!(true)]).unwrap();
//! let outcome = article.fire("publish", &[]).unwrap();
//! assert_eq!(outcome, Outcome::Transitioned(json!(true)));
//! assert!(article.available_events().unwrap().is_empty());
//! ```

pub mod builder;
pub mod check;
pub mod core;
pub mod error;
pub mod instance;
pub mod registry;

// Re-export commonly used types
pub use builder::{SpecBuilder, StateScope};
pub use check::SpecIssue;
pub use core::{
    Action, Event, Guard, Hook, Passage, Specification, State, TransitionLog, TransitionRecord,
};
pub use error::{BoxError, WorkflowError};
pub use instance::{Instance, Outcome, Scope, OPERATIONS};
pub use registry::{Lineage, Registry, Resolution};
pub use serde_json::Value;
