//! Lifecycle hooks run around an accepted transition.

use crate::error::BoxError;
use crate::instance::Scope;
use serde_json::Value;
use std::sync::Arc;

/// Describes the transition a hook is observing.
///
/// For the entry hook run while bootstrapping a fresh instance, `from` and
/// `event` are `None` and `args` is empty.
#[derive(Clone, Copy, Debug)]
pub struct Passage<'a> {
    /// Name of the state being left.
    pub from: Option<&'a str>,
    /// Name of the state being entered.
    pub to: &'a str,
    /// Name of the event that triggered the transition.
    pub event: Option<&'a str>,
    /// Arguments the event was fired with.
    pub args: &'a [Value],
}

/// Entry, exit and global transition hook.
pub type Hook<C> =
    Arc<dyn Fn(&mut Scope<'_, C>, &Passage<'_>) -> Result<(), BoxError> + Send + Sync>;

pub(crate) fn hook<C, F>(f: F) -> Hook<C>
where
    F: Fn(&mut Scope<'_, C>, &Passage<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}
