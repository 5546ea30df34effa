//! Executing specifications.
//!
//! An [`Instance`] holds a shared, read-only [`Specification`] and the only
//! mutable piece of machine state: which state is current. Every guard,
//! action and hook runs against an explicit [`Scope`] wrapping the bound
//! context.
//!
//! [`Specification`]: crate::Specification

mod executor;
mod outcome;
mod scope;

pub use executor::{Instance, OPERATIONS};
pub use outcome::Outcome;
pub use scope::Scope;
