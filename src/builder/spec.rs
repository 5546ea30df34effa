//! Declarative builder that populates a specification graph.

use crate::core::{hook, Event, Passage, Specification, State};
use crate::error::BoxError;
use crate::instance::Scope;
use serde_json::Value;

/// Builder handed to [`Specification::build`] and [`Specification::amend`].
///
/// `event`, `on_entry` and `on_exit` called directly on the builder attach
/// to the most recently declared (or re-opened) state. Inside a
/// [`state`](SpecBuilder::state) closure the same calls on [`StateScope`]
/// attach to that state.
pub struct SpecBuilder<'a, C> {
    spec: &'a mut Specification<C>,
    scoped: Option<usize>,
}

impl<'a, C> SpecBuilder<'a, C> {
    pub(crate) fn new(spec: &'a mut Specification<C>) -> Self {
        let scoped = spec.states().len().checked_sub(1);
        Self { spec, scoped }
    }

    /// Declare a state and run `body` in its declaration scope.
    pub fn state<F>(&mut self, name: &str, body: F) -> &mut Self
    where
        F: FnOnce(&mut StateScope<'_, C>),
    {
        self.state_with_meta(name, Value::Null, body)
    }

    /// Declare a state carrying metadata.
    ///
    /// Declaring a name that already exists re-opens that state; its
    /// metadata is left as first declared.
    pub fn state_with_meta<F>(&mut self, name: &str, meta: Value, body: F) -> &mut Self
    where
        F: FnOnce(&mut StateScope<'_, C>),
    {
        let index = match self.spec.position(name) {
            Some(index) => {
                tracing::debug!("re-opening state {}", name);
                index
            }
            None => {
                tracing::debug!("defining state {}", name);
                let states = self.spec.states_mut();
                states.push(State::new(name, meta));
                states.len() - 1
            }
        };
        self.scoped = Some(index);

        let mut scope = StateScope {
            state: &mut self.spec.states_mut()[index],
        };
        body(&mut scope);
        self
    }

    /// Attach an event to the most recently declared state.
    pub fn event(&mut self, event: Event<C>) -> &mut Self {
        match self.scoped_state() {
            Some(state) => add_event(state, event),
            None => tracing::warn!(
                "event {} declared before any state; ignoring it",
                event.name()
            ),
        }
        self
    }

    /// Set the entry hook of the most recently declared state.
    pub fn on_entry<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Scope<'_, C>, &Passage<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        match self.scoped_state() {
            Some(state) => state.on_entry = Some(hook(f)),
            None => tracing::warn!("on_entry declared before any state; ignoring it"),
        }
        self
    }

    /// Set the exit hook of the most recently declared state.
    pub fn on_exit<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Scope<'_, C>, &Passage<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        match self.scoped_state() {
            Some(state) => state.on_exit = Some(hook(f)),
            None => tracing::warn!("on_exit declared before any state; ignoring it"),
        }
        self
    }

    /// Set the hook run on every accepted transition. Last writer wins.
    pub fn on_transition<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Scope<'_, C>, &Passage<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.spec.on_transition = Some(hook(f));
        self
    }

    fn scoped_state(&mut self) -> Option<&mut State<C>> {
        let index = self.scoped?;
        self.spec.states_mut().get_mut(index)
    }
}

/// Declaration scope of a single state.
pub struct StateScope<'a, C> {
    state: &'a mut State<C>,
}

impl<C> StateScope<'_, C> {
    pub fn name(&self) -> &str {
        self.state.name()
    }

    /// Declare an event leaving this state.
    pub fn event(&mut self, event: Event<C>) -> &mut Self {
        add_event(self.state, event);
        self
    }

    /// Hook run after this state becomes current.
    pub fn on_entry<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Scope<'_, C>, &Passage<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.state.on_entry = Some(hook(f));
        self
    }

    /// Hook run while this state is still current, before it is left.
    pub fn on_exit<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Scope<'_, C>, &Passage<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.state.on_exit = Some(hook(f));
        self
    }
}

fn add_event<C>(state: &mut State<C>, event: Event<C>) {
    let name = event.name().to_string();
    if state.add_event(event) {
        tracing::debug!("defining event {} on state {}", name, state.name());
    } else {
        tracing::warn!(
            "event {} already declared on state {}; keeping the first declaration",
            name,
            state.name()
        );
    }
}
