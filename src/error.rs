//! Error taxonomy for specification lookup and event firing.

use thiserror::Error;

/// Error type returned by guards, actions and hooks.
///
/// The engine never inspects these; they reach the caller unchanged inside
/// [`WorkflowError::Callback`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the registry and the instance executor.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("no specification registered for '{id}' or any of its supertypes")]
    SpecificationNotFound { id: String },

    #[error("event '{event}' is not declared on state '{state}'")]
    UnknownEvent { state: String, event: String },

    #[error("cannot reconstitute at undeclared state '{state}'")]
    UnknownStateOnReconstitute { state: String },

    #[error("event '{event}' transitions to undeclared state '{target}'")]
    UnknownTargetState { event: String, target: String },

    #[error("transition halted: {}", .reason.as_deref().unwrap_or("no reason given"))]
    TransitionHalted { reason: Option<String> },

    #[error("specification declares no states")]
    EmptySpecification,

    #[error("instance context is already bound")]
    ContextAlreadyBound,

    #[error(transparent)]
    Callback(BoxError),
}

impl WorkflowError {
    /// Returns whether the caller may treat this as "not mine" and try
    /// another handler, as a dispatch façade does for unknown events.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WorkflowError::UnknownEvent { .. })
    }

    /// Returns a stable code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            WorkflowError::SpecificationNotFound { .. } => "SPECIFICATION_NOT_FOUND",
            WorkflowError::UnknownEvent { .. } => "UNKNOWN_EVENT",
            WorkflowError::UnknownStateOnReconstitute { .. } => "UNKNOWN_STATE_ON_RECONSTITUTE",
            WorkflowError::UnknownTargetState { .. } => "UNKNOWN_TARGET_STATE",
            WorkflowError::TransitionHalted { .. } => "TRANSITION_HALTED",
            WorkflowError::EmptySpecification => "EMPTY_SPECIFICATION",
            WorkflowError::ContextAlreadyBound => "CONTEXT_ALREADY_BOUND",
            WorkflowError::Callback(_) => "CALLBACK_FAILED",
        }
    }

    /// Returns the wrapped callback error, if this is one.
    pub fn into_callback(self) -> Option<BoxError> {
        match self {
            WorkflowError::Callback(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("ledger offline")]
    struct LedgerOffline;

    #[test]
    fn only_unknown_event_is_recoverable() {
        let unknown = WorkflowError::UnknownEvent {
            state: "draft".into(),
            event: "publish".into(),
        };
        assert!(unknown.is_recoverable());
        assert!(!WorkflowError::EmptySpecification.is_recoverable());
        assert!(!WorkflowError::TransitionHalted { reason: None }.is_recoverable());
    }

    #[test]
    fn halted_message_includes_reason() {
        let err = WorkflowError::TransitionHalted {
            reason: Some("missing signature".into()),
        };
        assert_eq!(err.to_string(), "transition halted: missing signature");

        let err = WorkflowError::TransitionHalted { reason: None };
        assert_eq!(err.to_string(), "transition halted: no reason given");
    }

    #[test]
    fn callback_error_is_transparent() {
        let err = WorkflowError::Callback(Box::new(LedgerOffline));
        assert_eq!(err.to_string(), "ledger offline");
        assert_eq!(err.error_code(), "CALLBACK_FAILED");

        let inner = err.into_callback().unwrap();
        assert!(inner.downcast_ref::<LedgerOffline>().is_some());
    }
}
