//! Guard predicates gating whether an event may proceed.
//!
//! A guard sees the event arguments and the evaluation scope. Returning
//! `false` soft-halts the transition; a guard may instead call
//! [`Scope::halt`] or [`Scope::halt_forced`] itself to supply its own reason.

use crate::error::BoxError;
use crate::instance::Scope;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

type Predicate<C> =
    dyn Fn(&mut Scope<'_, C>, &[Value]) -> Result<bool, BoxError> + Send + Sync;

/// Predicate that determines if an event can fire.
///
/// Events declared without a guard carry [`Guard::always`].
///
/// # Example
///
/// ```rust
/// use waypoint::Guard;
///
/// let has_content: Guard<()> = Guard::new(|_scope, args| {
///     Ok(args.first().and_then(|v| v.as_bool()).unwrap_or(false))
/// });
/// # let _ = has_content;
/// ```
pub struct Guard<C> {
    predicate: Option<Arc<Predicate<C>>>,
}

impl<C> Guard<C> {
    /// Create a guard from a predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&mut Scope<'_, C>, &[Value]) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        Guard {
            predicate: Some(Arc::new(predicate)),
        }
    }

    /// A guard that always passes.
    pub fn always() -> Self {
        Guard { predicate: None }
    }

    /// Returns true if this guard was declared without a predicate.
    pub fn is_always(&self) -> bool {
        self.predicate.is_none()
    }

    /// Evaluate the guard in `scope` with `args`.
    pub fn check(&self, scope: &mut Scope<'_, C>, args: &[Value]) -> Result<bool, BoxError> {
        match &self.predicate {
            Some(predicate) => predicate(scope, args),
            None => Ok(true),
        }
    }
}

impl<C> Default for Guard<C> {
    fn default() -> Self {
        Self::always()
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Guard {
            predicate: self.predicate.clone(),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_always() {
            f.write_str("Guard(always)")
        } else {
            f.write_str("Guard(predicate)")
        }
    }
}
