//! Live instance of a specification: fires events and tracks the current state.

use crate::core::{Hook, Passage, Specification, State, TransitionLog, TransitionRecord};
use crate::error::WorkflowError;
use crate::instance::outcome::{Halt, Outcome};
use crate::instance::scope::{available_events, Scope};
use chrono::Utc;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Operations an instance always exposes, whatever its specification.
///
/// Together with the available events and the `"<state>?"` predicates these
/// form the names a host façade may forward; see
/// [`Instance::dispatchable_names`].
pub const OPERATIONS: &[&str] = &[
    "available_events",
    "current_state",
    "fire",
    "halt",
    "halt_forced",
    "halted",
    "halted_reason",
    "state",
    "states",
];

/// Executor holding a shared specification and a mutable current state.
///
/// Exactly one state is current at any time. `halted` and `halted_reason`
/// describe the most recent firing attempt only.
pub struct Instance<C> {
    id: Uuid,
    spec: Arc<Specification<C>>,
    current: usize,
    context: C,
    bound: bool,
    halt: Option<Halt>,
    listing: bool,
    history: TransitionLog,
}

impl<C> Instance<C> {
    /// Create an instance with a default, unbound context.
    ///
    /// With `reconstitute_at` unset the instance bootstraps into the first
    /// declared state, running that state's entry hook. Otherwise the named
    /// state becomes current directly and no hook runs.
    pub fn new(
        spec: Arc<Specification<C>>,
        reconstitute_at: Option<&str>,
    ) -> Result<Self, WorkflowError>
    where
        C: Default,
    {
        Self::create(spec, C::default(), false, reconstitute_at)
    }

    /// Create an instance already bound to `context`.
    ///
    /// The bootstrap entry hook, if any, runs against `context`.
    pub fn with_context(
        spec: Arc<Specification<C>>,
        context: C,
        reconstitute_at: Option<&str>,
    ) -> Result<Self, WorkflowError> {
        Self::create(spec, context, true, reconstitute_at)
    }

    fn create(
        spec: Arc<Specification<C>>,
        context: C,
        bound: bool,
        reconstitute_at: Option<&str>,
    ) -> Result<Self, WorkflowError> {
        let id = Uuid::new_v4();

        let current = match reconstitute_at {
            Some(name) => spec.position(name).ok_or_else(|| {
                WorkflowError::UnknownStateOnReconstitute {
                    state: name.to_string(),
                }
            })?,
            None if spec.states().is_empty() => return Err(WorkflowError::EmptySpecification),
            None => 0,
        };

        let mut instance = Self {
            id,
            spec,
            current,
            context,
            bound,
            halt: None,
            listing: false,
            history: TransitionLog::new(),
        };

        match reconstitute_at {
            Some(name) => tracing::debug!("reconstituting instance {} at {}", id, name),
            None => {
                tracing::debug!("creating instance {}", id);
                instance.bootstrap()?;
            }
        }

        Ok(instance)
    }

    /// The implicit nil -> first state transition: entry hook only.
    fn bootstrap(&mut self) -> Result<(), WorkflowError> {
        let spec = Arc::clone(&self.spec);
        let initial = &spec.states()[self.current];
        if let Some(on_entry) = initial.on_entry() {
            let passage = Passage {
                from: None,
                to: initial.name(),
                event: None,
                args: &[],
            };
            self.run_hook(&*spec, initial, on_entry, &passage)?;
        }
        Ok(())
    }

    /// Fire `event` with `args`.
    ///
    /// Runs, in order: guard, action, global transition hook, exit hook of
    /// the current state, the state swap, entry hook of the new state.
    ///
    /// A guard returning false or a callback calling [`Scope::halt`] yields
    /// [`Outcome::Halted`]; [`Scope::halt_forced`] yields
    /// [`WorkflowError::TransitionHalted`]. Either way no hook runs and the
    /// state is unchanged. A failure from the guard, the action, the global
    /// hook or the exit hook also leaves the state unchanged; a failure from
    /// the entry hook is raised after the swap.
    pub fn fire(&mut self, event: &str, args: &[Value]) -> Result<Outcome, WorkflowError> {
        self.halt = None;

        let spec = Arc::clone(&self.spec);
        let from = &spec.states()[self.current];
        let Some(declared) = from.event(event) else {
            return Err(WorkflowError::UnknownEvent {
                state: from.name().to_string(),
                event: event.to_string(),
            });
        };
        tracing::debug!("instance {} firing {} in {}", self.id, event, from.name());

        let passed = {
            let mut scope = Scope::new(
                &*spec,
                from,
                &mut self.context,
                &mut self.halt,
                &mut self.listing,
            );
            declared
                .guard_ref()
                .check(&mut scope, args)
                .map_err(WorkflowError::Callback)?
        };
        if !passed && self.halt.is_none() {
            let reason = format!("guard on {} did not pass", event);
            self.halt = Some(Halt::soft(Some(reason)));
        }

        let mut value = Value::Null;
        if self.halt.is_none() {
            if let Some(action) = declared.action_ref() {
                let mut scope = Scope::new(
                    &*spec,
                    from,
                    &mut self.context,
                    &mut self.halt,
                    &mut self.listing,
                );
                value = action(&mut scope, args).map_err(WorkflowError::Callback)?;
            }
        }

        if let Some(halt) = &self.halt {
            let reason = halt.reason.clone();
            if halt.forced {
                tracing::warn!(
                    "instance {} halted {} in {}: {}",
                    self.id,
                    event,
                    from.name(),
                    reason.as_deref().unwrap_or("no reason given")
                );
                return Err(WorkflowError::TransitionHalted { reason });
            }
            tracing::debug!(
                "instance {} halted {} in {}: {}",
                self.id,
                event,
                from.name(),
                reason.as_deref().unwrap_or("no reason given")
            );
            return Ok(Outcome::Halted { reason });
        }

        let target = declared.transitions_to();
        let Some(to_index) = spec.position(target) else {
            return Err(WorkflowError::UnknownTargetState {
                event: event.to_string(),
                target: target.to_string(),
            });
        };

        let passage = Passage {
            from: Some(from.name()),
            to: target,
            event: Some(event),
            args,
        };
        if let Some(on_transition) = spec.on_transition() {
            self.run_hook(&*spec, from, on_transition, &passage)?;
        }
        if let Some(on_exit) = from.on_exit() {
            self.run_hook(&*spec, from, on_exit, &passage)?;
        }

        self.current = to_index;
        self.history.record(TransitionRecord {
            from: from.name().to_string(),
            to: target.to_string(),
            event: event.to_string(),
            timestamp: Utc::now(),
        });
        tracing::debug!("instance {} moved {} -> {}", self.id, from.name(), target);

        let to = &spec.states()[to_index];
        if let Some(on_entry) = to.on_entry() {
            self.run_hook(&*spec, to, on_entry, &passage)?;
        }

        Ok(Outcome::Transitioned(value))
    }

    fn run_hook(
        &mut self,
        spec: &Specification<C>,
        state: &State<C>,
        hook: &Hook<C>,
        passage: &Passage<'_>,
    ) -> Result<(), WorkflowError> {
        let mut discarded = None;
        let mut scope = Scope::new(
            spec,
            state,
            &mut self.context,
            &mut discarded,
            &mut self.listing,
        );
        hook(&mut scope, passage).map_err(WorkflowError::Callback)
    }

    /// Run `f` in this instance's evaluation scope, as a callback would.
    pub fn with_scope<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Scope<'_, C>) -> R,
    {
        let spec = Arc::clone(&self.spec);
        let state = &spec.states()[self.current];
        let mut discarded = None;
        let mut scope = Scope::new(
            &*spec,
            state,
            &mut self.context,
            &mut discarded,
            &mut self.listing,
        );
        f(&mut scope)
    }

    /// Names of the current state's events whose guard passes with no
    /// arguments.
    ///
    /// A guard that queries available events while this list is being built
    /// gets an empty list back.
    pub fn available_events(&mut self) -> Result<Vec<String>, WorkflowError> {
        let spec = Arc::clone(&self.spec);
        let state = &spec.states()[self.current];
        available_events(&*spec, state, &mut self.context, &mut self.listing)
    }

    /// Names a host façade may forward to this instance: available events,
    /// `"<state>?"` predicates and [`OPERATIONS`].
    pub fn dispatchable_names(&mut self) -> Result<Vec<String>, WorkflowError> {
        let mut names: Vec<String> = OPERATIONS.iter().map(|op| op.to_string()).collect();
        names.extend(self.available_events()?);
        names.extend(self.state_predicates());
        Ok(names)
    }

    /// `"<state>?"` for every declared state.
    pub fn state_predicates(&self) -> Vec<String> {
        self.spec
            .states()
            .iter()
            .map(|s| format!("{}?", s.name()))
            .collect()
    }

    /// Bind the evaluation context. Allowed once, and only on an instance
    /// created without a context.
    pub fn bind_to(&mut self, context: C) -> Result<(), WorkflowError> {
        if self.bound {
            return Err(WorkflowError::ContextAlreadyBound);
        }
        tracing::debug!("binding instance {} to a host context", self.id);
        self.context = context;
        self.bound = true;
        Ok(())
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn specification(&self) -> &Arc<Specification<C>> {
        &self.spec
    }

    /// Name of the current state. This is the token to persist and pass back
    /// as `reconstitute_at`.
    pub fn state(&self) -> &str {
        self.current_state().name()
    }

    pub fn current_state(&self) -> &State<C> {
        &self.spec.states()[self.current]
    }

    pub fn states(&self) -> Vec<&str> {
        self.spec.state_names()
    }

    /// State predicate: is the current state `name`?
    pub fn is_in(&self, name: &str) -> bool {
        self.state() == name
    }

    pub fn halted(&self) -> bool {
        self.halt.is_some()
    }

    pub fn halted_reason(&self) -> Option<&str> {
        self.halt.as_ref().and_then(|h| h.reason.as_deref())
    }

    pub fn history(&self) -> &TransitionLog {
        &self.history
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }
}

impl<C> fmt::Debug for Instance<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("bound", &self.bound)
            .field("halted", &self.halted())
            .field("halted_reason", &self.halted_reason())
            .finish()
    }
}
