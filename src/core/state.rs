//! State nodes of a specification graph.

use crate::core::event::Event;
use crate::core::hooks::Hook;
use serde_json::Value;
use std::fmt;

/// A named node holding its declared events and optional entry/exit hooks.
///
/// Event names are unique within a state but not across states.
pub struct State<C> {
    name: String,
    events: Vec<Event<C>>,
    meta: Value,
    pub(crate) on_entry: Option<Hook<C>>,
    pub(crate) on_exit: Option<Hook<C>>,
}

impl<C> State<C> {
    pub(crate) fn new(name: impl Into<String>, meta: Value) -> Self {
        Self {
            name: name.into(),
            events: Vec::new(),
            meta,
            on_entry: None,
            on_exit: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &Value {
        &self.meta
    }

    /// Declared events, in declaration order.
    pub fn events(&self) -> &[Event<C>] {
        &self.events
    }

    /// Look up a declared event by name.
    pub fn event(&self, name: &str) -> Option<&Event<C>> {
        self.events.iter().find(|e| e.name() == name)
    }

    pub fn event_names(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.name()).collect()
    }

    pub fn on_entry(&self) -> Option<&Hook<C>> {
        self.on_entry.as_ref()
    }

    pub fn on_exit(&self) -> Option<&Hook<C>> {
        self.on_exit.as_ref()
    }

    /// Append an event unless one with the same name is already declared.
    /// Returns false when the event was ignored.
    pub(crate) fn add_event(&mut self, event: Event<C>) -> bool {
        if self.event(event.name()).is_some() {
            return false;
        }
        self.events.push(event);
        true
    }
}

impl<C> Clone for State<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            events: self.events.clone(),
            meta: self.meta.clone(),
            on_entry: self.on_entry.clone(),
            on_exit: self.on_exit.clone(),
        }
    }
}

impl<C> fmt::Debug for State<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("events", &self.events)
            .field("meta", &self.meta)
            .field("has_on_entry", &self.on_entry.is_some())
            .field("has_on_exit", &self.on_exit.is_some())
            .finish()
    }
}
