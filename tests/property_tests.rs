//! Property-based tests for the instance executor.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated specifications.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use waypoint::{Event, Instance, Outcome, Registry, Specification};

fn state_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,8}", 1..8).prop_map(|names| names.into_iter().collect())
}

/// A ring: every state declares `next`, guarded by the first argument,
/// leading to the following state. Every callback leaves a line in the
/// context.
fn ring(names: &[String]) -> Specification<Vec<String>> {
    let spec = Specification::<Vec<String>>::build(Value::Null, |spec| {
        spec.on_transition(|scope, p| {
            scope.context_mut().push(format!("global {}", p.to));
            Ok(())
        });
        for (i, name) in names.iter().enumerate() {
            let next = names[(i + 1) % names.len()].clone();
            spec.state(name, |s| {
                s.event(
                    Event::new("next", next)
                        .when(|_, args| Ok(args.first() == Some(&json!(true)))),
                )
                .on_exit(|scope, p| {
                    let line = format!("exit {} in {}", p.from.unwrap_or("-"), scope.state());
                    scope.context_mut().push(line);
                    Ok(())
                })
                .on_entry(|scope, p| {
                    let line = format!("entry {} in {}", p.to, scope.state());
                    scope.context_mut().push(line);
                    Ok(())
                });
            });
        }
    });
    spec
}

proptest! {
    #[test]
    fn fresh_instance_starts_in_first_state(names in state_names()) {
        let instance = Instance::new(Arc::new(ring(&names)), None).unwrap();
        prop_assert_eq!(instance.state(), names[0].as_str());
    }

    #[test]
    fn rejected_guard_never_moves(names in state_names(), steps in 0usize..6) {
        let mut instance = Instance::new(Arc::new(ring(&names)), None).unwrap();
        for _ in 0..steps {
            instance.fire("next", &[json!(true)]).unwrap();
        }
        let before = instance.state().to_string();
        instance.context_mut().clear();

        let outcome = instance.fire("next", &[json!(false)]).unwrap();

        let halted_with_reason = matches!(outcome, Outcome::Halted { reason: Some(_) });
        prop_assert!(halted_with_reason);
        prop_assert!(instance.halted_reason().is_some());
        prop_assert_eq!(instance.state(), before.as_str());
        prop_assert!(instance.context().is_empty());
    }

    #[test]
    fn accepted_guard_moves_to_target_with_ordered_hooks(
        names in state_names(),
        steps in 0usize..6,
    ) {
        let mut instance = Instance::new(Arc::new(ring(&names)), None).unwrap();
        for _ in 0..steps {
            instance.fire("next", &[json!(true)]).unwrap();
        }
        let from = instance.state().to_string();
        let to = instance.current_state().event("next").unwrap().transitions_to().to_string();
        instance.context_mut().clear();

        let outcome = instance.fire("next", &[json!(true)]).unwrap();

        prop_assert!(outcome.is_transitioned());
        prop_assert_eq!(instance.state(), to.as_str());
        prop_assert_eq!(
            instance.context().clone(),
            vec![
                format!("global {}", to),
                format!("exit {} in {}", from, from),
                format!("entry {} in {}", to, to),
            ]
        );
    }

    #[test]
    fn available_events_respect_guards(open in prop::collection::vec(any::<bool>(), 1..8)) {
        let spec = Specification::<()>::build(Value::Null, |spec| {
            spec.state("hub", |s| {
                for (i, allowed) in open.iter().copied().enumerate() {
                    s.event(Event::new(format!("e{}", i), "hub").when(move |_, _| Ok(allowed)));
                }
            });
        });
        let mut instance = Instance::new(Arc::new(spec), None).unwrap();

        let available = instance.available_events().unwrap();
        let expected: Vec<String> = open
            .iter()
            .enumerate()
            .filter(|(_, allowed)| **allowed)
            .map(|(i, _)| format!("e{}", i))
            .collect();
        prop_assert_eq!(available, expected);
    }

    #[test]
    fn reconstitution_fires_no_hooks(names in state_names(), pick in any::<prop::sample::Index>()) {
        let target = pick.get(&names).clone();
        let instance = Instance::new(Arc::new(ring(&names)), Some(target.as_str())).unwrap();

        prop_assert_eq!(instance.state(), target.as_str());
        prop_assert!(instance.context().is_empty());
    }

    #[test]
    fn respecifying_only_adds(first in state_names(), second in state_names()) {
        let mut registry: Registry<()> = Registry::new();
        registry.specify("layered", Value::Null, |spec| {
            for name in &first {
                spec.state(name, |_| {});
            }
        });
        registry.specify("layered", Value::Null, |spec| {
            for name in &second {
                spec.state(name, |_| {});
            }
        });

        let spec = registry.resolve("layered").unwrap();
        let declared = spec.state_names();
        for name in first.iter().chain(second.iter()) {
            prop_assert!(declared.contains(&name.as_str()));
        }
        let leading: Vec<&str> = first.iter().map(String::as_str).collect();
        prop_assert_eq!(&declared[..first.len()], &leading[..]);
    }
}
