//! Registry mapping identifiers to specifications.
//!
//! A registry is an ordinary value owned by whatever composes the system
//! (an application root, a test harness). It is not synchronized: wrap it in
//! a lock if it is amended while other threads look things up.

mod resolution;

pub use resolution::{Lineage, Resolution};

use crate::builder::SpecBuilder;
use crate::core::Specification;
use crate::error::WorkflowError;
use crate::instance::Instance;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Identifier -> specification mapping with an explicit resolution strategy.
///
/// # Example
///
/// ```rust
/// use serde_json::Value;
/// use waypoint::{Event, Registry};
///
/// let mut registry: Registry<()> = Registry::new();
/// registry.specify("ticket", Value::Null, |spec| {
///     spec.state("open", |s| {
///         s.event(Event::new("close", "closed"));
///     });
///     spec.state("closed", |_| {});
/// });
///
/// let mut ticket = registry.instantiate("ticket", None).unwrap();
/// ticket.fire("close", &[]).unwrap();
/// assert_eq!(ticket.state(), "closed");
///
/// let restored = registry.instantiate("ticket", Some("closed")).unwrap();
/// assert!(restored.is_in("closed"));
/// ```
pub struct Registry<C> {
    specs: HashMap<String, Arc<Specification<C>>>,
    resolution: Resolution,
}

impl<C> Registry<C> {
    /// Create an empty registry resolving identifiers exactly.
    pub fn new() -> Self {
        Self::with_resolution(Resolution::Exact)
    }

    pub fn with_resolution(resolution: Resolution) -> Self {
        Self {
            specs: HashMap::new(),
            resolution,
        }
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Register a specification under `id`, or amend the existing one.
    ///
    /// Amending re-runs `builder` against the registered graph, adding
    /// states and events; `meta` only applies when `id` is new. Instances
    /// created before an amendment keep the graph they started with.
    pub fn specify<F>(
        &mut self,
        id: impl Into<String>,
        meta: Value,
        builder: F,
    ) -> Arc<Specification<C>>
    where
        F: FnOnce(&mut SpecBuilder<'_, C>),
    {
        let id = id.into();
        match self.specs.get_mut(&id) {
            Some(existing) => {
                tracing::debug!("amending specification {}", id);
                Arc::make_mut(existing).amend(builder);
                Arc::clone(existing)
            }
            None => {
                tracing::debug!("registering specification {}", id);
                let spec = Arc::new(Specification::build(meta, builder));
                self.specs.insert(id, Arc::clone(&spec));
                spec
            }
        }
    }

    /// Look up the specification for `id`, following the resolution
    /// strategy.
    pub fn resolve(&self, id: &str) -> Result<Arc<Specification<C>>, WorkflowError> {
        for candidate in self.resolution.candidates(id) {
            if let Some(spec) = self.specs.get(candidate) {
                if candidate != id {
                    tracing::debug!("resolved {} through supertype {}", id, candidate);
                }
                return Ok(Arc::clone(spec));
            }
        }
        Err(WorkflowError::SpecificationNotFound { id: id.to_string() })
    }

    /// Create an instance of the specification for `id` with a default
    /// context, bootstrapped or reconstituted at `reconstitute_at`.
    pub fn instantiate(
        &self,
        id: &str,
        reconstitute_at: Option<&str>,
    ) -> Result<Instance<C>, WorkflowError>
    where
        C: Default,
    {
        Instance::new(self.resolve(id)?, reconstitute_at)
    }

    /// Create an instance bound to `context`.
    pub fn instantiate_with(
        &self,
        id: &str,
        context: C,
        reconstitute_at: Option<&str>,
    ) -> Result<Instance<C>, WorkflowError> {
        Instance::with_context(self.resolve(id)?, context, reconstitute_at)
    }

    /// Remove every registered specification.
    pub fn reset(&mut self) {
        tracing::debug!("resetting registry ({} specifications)", self.specs.len());
        self.specs.clear();
    }

    /// Whether `id` has an entry of its own, ignoring supertypes.
    pub fn contains(&self, id: &str) -> bool {
        self.specs.contains_key(id)
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.specs.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;
    use serde_json::json;

    fn article(registry: &mut Registry<()>, id: &str) {
        registry.specify(id, json!({ "owner": "newsroom" }), |spec| {
            spec.state("draft", |s| {
                s.event(Event::new("review", "reviewed"));
            });
            spec.state("reviewed", |_| {});
        });
    }

    #[test]
    fn specify_then_resolve() {
        let mut registry = Registry::new();
        article(&mut registry, "Article");

        let spec = registry.resolve("Article").unwrap();
        assert_eq!(spec.state_names(), vec!["draft", "reviewed"]);
        assert_eq!(spec.metadata()["owner"], "newsroom");
        assert!(registry.contains("Article"));
        assert_eq!(registry.ids(), vec!["Article"]);
    }

    #[test]
    fn missing_identifier_fails() {
        let registry: Registry<()> = Registry::new();
        let err = registry.resolve("Ghost").unwrap_err();

        assert!(matches!(err, WorkflowError::SpecificationNotFound { ref id } if id == "Ghost"));
        assert_eq!(err.error_code(), "SPECIFICATION_NOT_FOUND");
    }

    #[test]
    fn respecifying_amends_instead_of_replacing() {
        let mut registry = Registry::new();
        article(&mut registry, "Article");
        registry.specify("Article", json!({ "owner": "ignored" }), |spec| {
            spec.state("reviewed", |s| {
                s.event(Event::new("publish", "published"));
            });
            spec.state("published", |_| {});
        });

        let spec = registry.resolve("Article").unwrap();
        assert_eq!(spec.state_names(), vec!["draft", "reviewed", "published"]);
        assert_eq!(spec.state("draft").unwrap().event_names(), vec!["review"]);
        assert_eq!(spec.state("reviewed").unwrap().event_names(), vec!["publish"]);
        assert_eq!(spec.metadata()["owner"], "newsroom");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn amendment_does_not_reach_running_instances() {
        let mut registry = Registry::new();
        article(&mut registry, "Article");
        let mut early = registry.instantiate("Article", Some("reviewed")).unwrap();

        registry.specify("Article", Value::Null, |spec| {
            spec.state("reviewed", |s| {
                s.event(Event::new("publish", "published"));
            });
            spec.state("published", |_| {});
        });

        assert!(early.fire("publish", &[]).unwrap_err().is_recoverable());
        let mut late = registry.instantiate("Article", Some("reviewed")).unwrap();
        assert!(late.fire("publish", &[]).unwrap().is_transitioned());
    }

    #[test]
    fn exact_resolution_ignores_supertypes() {
        let mut registry = Registry::new();
        article(&mut registry, "Document");

        assert!(registry.resolve("Article").is_err());
    }

    #[test]
    fn lineage_resolution_falls_back_to_supertype() {
        let lineage = Lineage::new()
            .inherit("PressRelease", "Article")
            .inherit("Article", "Document");
        let mut registry = Registry::with_resolution(Resolution::Lineage(lineage));
        article(&mut registry, "Document");

        let instance = registry.instantiate("PressRelease", None).unwrap();
        assert_eq!(instance.state(), "draft");
        assert!(registry.resolve("Memo").is_err());
    }

    #[test]
    fn nearest_supertype_wins() {
        let lineage = Lineage::new()
            .inherit("PressRelease", "Article")
            .inherit("Article", "Document");
        let mut registry = Registry::with_resolution(Resolution::Lineage(lineage));
        article(&mut registry, "Document");
        registry.specify("Article", Value::Null, |spec| {
            spec.state("pitched", |_| {});
        });

        let spec = registry.resolve("PressRelease").unwrap();
        assert_eq!(spec.state_names(), vec!["pitched"]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut registry = Registry::new();
        article(&mut registry, "Article");
        article(&mut registry, "Memo");
        assert_eq!(registry.len(), 2);

        registry.reset();

        assert!(registry.is_empty());
        assert!(registry.instantiate("Article", None).is_err());
    }

    #[test]
    fn instantiate_with_binds_context() {
        let mut registry: Registry<String> = Registry::new();
        registry.specify("Note", Value::Null, |spec| {
            spec.state("open", |_| {});
        });

        let instance = registry
            .instantiate_with("Note", "host".to_string(), None)
            .unwrap();
        assert!(instance.is_bound());
        assert_eq!(instance.context(), "host");
    }
}
