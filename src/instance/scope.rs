//! Evaluation scope handed to guards, actions and hooks.

use crate::core::{Specification, State};
use crate::error::WorkflowError;
use crate::instance::outcome::Halt;

/// The explicit evaluation scope of a callback.
///
/// Gives access to the bound context, the instance's view of the current
/// state, and the halt controls of the firing attempt in progress.
///
/// Halting only has an effect from a guard or an action. Hooks run after the
/// transition was accepted, so a halt requested there is discarded.
pub struct Scope<'a, C> {
    spec: &'a Specification<C>,
    state: &'a State<C>,
    context: &'a mut C,
    halt: &'a mut Option<Halt>,
    listing: &'a mut bool,
}

impl<'a, C> Scope<'a, C> {
    pub(crate) fn new(
        spec: &'a Specification<C>,
        state: &'a State<C>,
        context: &'a mut C,
        halt: &'a mut Option<Halt>,
        listing: &'a mut bool,
    ) -> Self {
        Self {
            spec,
            state,
            context,
            halt,
            listing,
        }
    }

    pub fn context(&self) -> &C {
        &*self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut *self.context
    }

    /// Name of the current state as seen by this callback. Exit and global
    /// hooks still see the state being left; entry hooks see the new one.
    pub fn state(&self) -> &str {
        self.state.name()
    }

    pub fn current_state(&self) -> &State<C> {
        self.state
    }

    pub fn specification(&self) -> &Specification<C> {
        self.spec
    }

    /// State predicate: is the current state `name`?
    pub fn is_in(&self, name: &str) -> bool {
        self.state.name() == name
    }

    /// Reject the transition, reporting it as a soft halt.
    pub fn halt(&mut self, reason: impl Into<String>) {
        *self.halt = Some(Halt::soft(Some(reason.into())));
    }

    /// Soft halt with no reason; `halted_reason` stays `None`.
    pub fn halt_without_reason(&mut self) {
        *self.halt = Some(Halt::soft(None));
    }

    /// Reject the transition, raising [`WorkflowError::TransitionHalted`].
    pub fn halt_forced(&mut self, reason: impl Into<String>) {
        *self.halt = Some(Halt::forced(Some(reason.into())));
    }

    pub fn halt_forced_without_reason(&mut self) {
        *self.halt = Some(Halt::forced(None));
    }

    pub fn halted(&self) -> bool {
        self.halt.is_some()
    }

    pub fn halted_reason(&self) -> Option<&str> {
        self.halt.as_ref().and_then(|h| h.reason.as_deref())
    }

    /// Events of the current state whose guard passes with no arguments.
    ///
    /// Returns an empty list when called from a guard that is itself being
    /// evaluated to answer this question.
    pub fn available_events(&mut self) -> Result<Vec<String>, WorkflowError> {
        available_events(self.spec, self.state, &mut *self.context, &mut *self.listing)
    }
}

/// Evaluate the guards of `state` with no arguments.
///
/// `listing` is set for the duration of the evaluation; nested queries made
/// by guards short-circuit to an empty list while it is set.
pub(crate) fn available_events<C>(
    spec: &Specification<C>,
    state: &State<C>,
    context: &mut C,
    listing: &mut bool,
) -> Result<Vec<String>, WorkflowError> {
    if *listing {
        return Ok(Vec::new());
    }

    *listing = true;
    let result = passing_events(spec, state, context, listing);
    *listing = false;
    result
}

fn passing_events<C>(
    spec: &Specification<C>,
    state: &State<C>,
    context: &mut C,
    listing: &mut bool,
) -> Result<Vec<String>, WorkflowError> {
    let mut names = Vec::new();
    for event in state.events() {
        let mut scratch = None;
        let mut scope = Scope::new(spec, state, &mut *context, &mut scratch, &mut *listing);
        let passed = event
            .guard_ref()
            .check(&mut scope, &[])
            .map_err(WorkflowError::Callback)?;
        if passed {
            names.push(event.name().to_string());
        }
    }
    Ok(names)
}
