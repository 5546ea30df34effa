//! Builder API for declaring specifications.
//!
//! States are declared in order with [`SpecBuilder::state`]; the closure
//! passed alongside is the state's declaration scope, where its events and
//! hooks are attached. The [`workflow_host!`](crate::workflow_host) macro
//! generates typed forwarding methods for host types that hold an instance.

pub mod macros;
pub mod spec;

pub use spec::{SpecBuilder, StateScope};
