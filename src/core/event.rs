//! Events: named, guarded edges from the declaring state to a target.

use crate::core::guard::Guard;
use crate::error::BoxError;
use crate::instance::Scope;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Body of an accepted event. Its return value becomes the result of firing.
pub type Action<C> =
    Arc<dyn Fn(&mut Scope<'_, C>, &[Value]) -> Result<Value, BoxError> + Send + Sync>;

/// A named transition declared under a state.
///
/// The target is a state *name*; it is resolved against the owning
/// specification only when the event fires.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use waypoint::Event;
///
/// let publish: Event<()> = Event::new("publish", "published")
///     .when(|_, _| Ok(true))
///     .action(|_, _| Ok(json!(true)))
///     .meta(json!({ "audit": true }));
///
/// assert_eq!(publish.name(), "publish");
/// assert_eq!(publish.transitions_to(), "published");
/// ```
pub struct Event<C> {
    name: String,
    transitions_to: String,
    guard: Guard<C>,
    action: Option<Action<C>>,
    meta: Value,
}

impl<C> Event<C> {
    /// Create an unguarded event without an action.
    ///
    /// A guard or action that reads its context needs `C` fixed before the
    /// closure is checked, so name it up front: `Event::<Host>::new(..)`.
    /// A `let` annotation on the finished event comes too late.
    pub fn new(name: impl Into<String>, transitions_to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions_to: transitions_to.into(),
            guard: Guard::always(),
            action: None,
            meta: Value::Null,
        }
    }

    /// Set a pre-built guard.
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = guard;
        self
    }

    /// Set the guard from a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&mut Scope<'_, C>, &[Value]) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.guard = Guard::new(predicate);
        self
    }

    /// Set the action run once the guard has passed.
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut Scope<'_, C>, &[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Attach metadata.
    pub fn meta(mut self, meta: Value) -> Self {
        self.meta = meta;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transitions_to(&self) -> &str {
        &self.transitions_to
    }

    pub fn guard_ref(&self) -> &Guard<C> {
        &self.guard
    }

    pub fn action_ref(&self) -> Option<&Action<C>> {
        self.action.as_ref()
    }

    pub fn metadata(&self) -> &Value {
        &self.meta
    }
}

impl<C> Clone for Event<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            transitions_to: self.transitions_to.clone(),
            guard: self.guard.clone(),
            action: self.action.clone(),
            meta: self.meta.clone(),
        }
    }
}

impl<C> fmt::Debug for Event<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("transitions_to", &self.transitions_to)
            .field("guard", &self.guard)
            .field("has_action", &self.action.is_some())
            .field("meta", &self.meta)
            .finish()
    }
}
