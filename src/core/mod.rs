//! Specification graph types.
//!
//! This module contains the read-only side of the engine:
//! - `Specification`: ordered states plus the global transition hook
//! - `State` and `Event`: nodes and edges of the graph
//! - `Guard` predicates and lifecycle `Hook`s
//! - `TransitionLog` for journaling accepted transitions
//!
//! Nothing here mutates a running instance; execution lives in
//! [`crate::instance`].

mod event;
mod guard;
mod history;
mod hooks;
mod specification;
mod state;

pub use event::{Action, Event};
pub use guard::Guard;
pub use history::{TransitionLog, TransitionRecord};
pub use hooks::{Hook, Passage};
pub use specification::Specification;
pub use state::State;

pub(crate) use hooks::hook;
