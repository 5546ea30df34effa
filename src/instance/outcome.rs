//! Result of firing an event.

use crate::error::WorkflowError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What firing an event produced.
///
/// Soft halts come back as [`Outcome::Halted`]; forced halts are raised as
/// [`WorkflowError::TransitionHalted`] instead. Callers that want every halt
/// on the error path use [`Outcome::into_result`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// The state changed; carries the action's return value
    /// (`Value::Null` for events without an action).
    Transitioned(Value),

    /// The transition was rejected and the state is unchanged.
    Halted { reason: Option<String> },
}

impl Outcome {
    pub fn is_transitioned(&self) -> bool {
        matches!(self, Outcome::Transitioned(_))
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, Outcome::Halted { .. })
    }

    /// The action's return value, if the transition happened.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Transitioned(value) => Some(value),
            Outcome::Halted { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Halted { reason } => reason.as_deref(),
            Outcome::Transitioned(_) => None,
        }
    }

    /// Surface a halt as [`WorkflowError::TransitionHalted`].
    pub fn into_result(self) -> Result<Value, WorkflowError> {
        match self {
            Outcome::Transitioned(value) => Ok(value),
            Outcome::Halted { reason } => Err(WorkflowError::TransitionHalted { reason }),
        }
    }
}

/// Halt requested during one firing attempt.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Halt {
    pub(crate) reason: Option<String>,
    pub(crate) forced: bool,
}

impl Halt {
    pub(crate) fn soft(reason: Option<String>) -> Self {
        Self {
            reason,
            forced: false,
        }
    }

    pub(crate) fn forced(reason: Option<String>) -> Self {
        Self {
            reason,
            forced: true,
        }
    }
}
