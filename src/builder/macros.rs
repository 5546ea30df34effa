//! Macros for composing an instance into a host type.

/// Generate typed forwarding methods on a host that holds an [`Instance`].
///
/// Each listed event becomes a method firing that event; each listed state
/// becomes a predicate method. The names are fixed at compile time, so no
/// runtime method interception is involved.
///
/// [`Instance`]: crate::Instance
///
/// # Example
///
/// ```
/// use serde_json::Value;
/// use std::sync::Arc;
/// use waypoint::{workflow_host, Event, Instance, Specification};
///
/// struct Ticket {
///     workflow: Instance<()>,
/// }
///
/// workflow_host! {
///     impl Ticket => workflow {
///         events { close }
///         states { open => is_open, closed => is_closed }
///     }
/// }
///
/// let spec = Specification::<()>::build(Value::Null, |spec| {
///     spec.state("open", |s| {
///         s.event(Event::new("close", "closed"));
///     });
///     spec.state("closed", |_| {});
/// });
/// let mut ticket = Ticket {
///     workflow: Instance::new(Arc::new(spec), None).unwrap(),
/// };
///
/// assert!(ticket.is_open());
/// ticket.close(&[]).unwrap();
/// assert!(ticket.is_closed());
/// ```
#[macro_export]
macro_rules! workflow_host {
    (
        impl $host:ty => $field:ident {
            $(events { $($event:ident),* $(,)? })?
            $(states { $($state:ident => $predicate:ident),* $(,)? })?
        }
    ) => {
        impl $host {
            $($(
                #[allow(dead_code)]
                pub fn $event(
                    &mut self,
                    args: &[$crate::Value],
                ) -> ::std::result::Result<$crate::Outcome, $crate::WorkflowError> {
                    self.$field.fire(stringify!($event), args)
                }
            )*)?

            $($(
                #[allow(dead_code)]
                pub fn $predicate(&self) -> bool {
                    self.$field.is_in(stringify!($state))
                }
            )*)?
        }
    };
}
