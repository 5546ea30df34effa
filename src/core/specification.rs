//! The immutable graph of states and events that instances execute.

use crate::builder::SpecBuilder;
use crate::core::hooks::Hook;
use crate::core::state::State;
use serde_json::Value;
use std::fmt;

/// Ordered collection of states plus an optional global transition hook.
///
/// Declaration order matters: the first state is where fresh instances
/// start. Once built, a specification is read-only and is shared between
/// instances behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use serde_json::Value;
/// use waypoint::{Event, Specification};
///
/// let spec = Specification::<()>::build(Value::Null, |spec| {
///     spec.state("draft", |s| {
///         s.event(Event::new("review", "reviewed"));
///     });
///     spec.state("reviewed", |_| {});
/// });
///
/// assert_eq!(spec.state_names(), vec!["draft", "reviewed"]);
/// assert!(spec.check().is_success());
/// ```
pub struct Specification<C> {
    states: Vec<State<C>>,
    pub(crate) on_transition: Option<Hook<C>>,
    meta: Value,
}

impl<C> Specification<C> {
    /// Create a specification by running `builder` against an empty graph.
    ///
    /// When hooks touch the context, spell the context type on the call,
    /// `Specification::<Host>::build(..)`, so the callback parameters
    /// resolve.
    pub fn build<F>(meta: Value, builder: F) -> Self
    where
        F: FnOnce(&mut SpecBuilder<'_, C>),
    {
        let mut spec = Self {
            states: Vec::new(),
            on_transition: None,
            meta,
        };
        spec.amend(builder);
        spec
    }

    /// Re-run a builder against this graph. Amendments only add: existing
    /// states and events are never discarded.
    pub fn amend<F>(&mut self, builder: F)
    where
        F: FnOnce(&mut SpecBuilder<'_, C>),
    {
        let mut scope = SpecBuilder::new(self);
        builder(&mut scope);
    }

    /// Declared states, in declaration order.
    pub fn states(&self) -> &[State<C>] {
        &self.states
    }

    pub fn state(&self, name: &str) -> Option<&State<C>> {
        self.states.iter().find(|s| s.name() == name)
    }

    pub fn state_names(&self) -> Vec<&str> {
        self.states.iter().map(|s| s.name()).collect()
    }

    /// The state fresh instances bootstrap into.
    pub fn initial_state(&self) -> Option<&State<C>> {
        self.states.first()
    }

    pub fn on_transition(&self) -> Option<&Hook<C>> {
        self.on_transition.as_ref()
    }

    pub fn metadata(&self) -> &Value {
        &self.meta
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.states.iter().position(|s| s.name() == name)
    }

    pub(crate) fn states_mut(&mut self) -> &mut Vec<State<C>> {
        &mut self.states
    }
}

impl<C> Clone for Specification<C> {
    fn clone(&self) -> Self {
        Self {
            states: self.states.clone(),
            on_transition: self.on_transition.clone(),
            meta: self.meta.clone(),
        }
    }
}

impl<C> fmt::Debug for Specification<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("states", &self.states)
            .field("has_on_transition", &self.on_transition.is_some())
            .field("meta", &self.meta)
            .finish()
    }
}
