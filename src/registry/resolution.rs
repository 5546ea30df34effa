//! Identifier resolution strategies.

use std::collections::{HashMap, HashSet};

/// How a registry resolves an identifier with no exact entry.
#[derive(Clone, Debug, Default)]
pub enum Resolution {
    /// Only exact matches resolve.
    #[default]
    Exact,

    /// Walk the identifier's supertype chain until a registered entry is
    /// found.
    Lineage(Lineage),
}

/// Explicit supertype chain for type-like identifiers.
///
/// # Example
///
/// ```rust
/// use waypoint::Lineage;
///
/// let lineage = Lineage::new()
///     .inherit("PressRelease", "Article")
///     .inherit("Article", "Document");
///
/// assert_eq!(
///     lineage.ancestors("PressRelease"),
///     vec!["Article", "Document"]
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Lineage {
    parents: HashMap<String, String>,
}

impl Lineage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `parent` as the direct supertype of `child`.
    pub fn inherit(mut self, child: impl Into<String>, parent: impl Into<String>) -> Self {
        self.parents.insert(child.into(), parent.into());
        self
    }

    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(String::as_str)
    }

    /// Supertypes of `id`, nearest first. Stops before revisiting an
    /// identifier, so a cyclic declaration still terminates.
    pub fn ancestors<'a>(&'a self, id: &'a str) -> Vec<&'a str> {
        let mut seen = HashSet::from([id]);
        let mut chain = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            if !seen.insert(parent) {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }
}

impl Resolution {
    /// Identifiers to try for `id`, in order: `id` itself, then its
    /// ancestors when resolving by lineage.
    pub fn candidates<'a>(&'a self, id: &'a str) -> Vec<&'a str> {
        let mut candidates = vec![id];
        if let Resolution::Lineage(lineage) = self {
            candidates.extend(lineage.ancestors(id));
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_resolution_tries_only_the_identifier() {
        assert_eq!(Resolution::Exact.candidates("Article"), vec!["Article"]);
    }

    #[test]
    fn lineage_resolution_walks_supertypes() {
        let resolution = Resolution::Lineage(
            Lineage::new()
                .inherit("PressRelease", "Article")
                .inherit("Article", "Document"),
        );

        assert_eq!(
            resolution.candidates("PressRelease"),
            vec!["PressRelease", "Article", "Document"]
        );
        assert_eq!(resolution.candidates("Memo"), vec!["Memo"]);
    }

    #[test]
    fn cyclic_lineage_terminates() {
        let lineage = Lineage::new().inherit("A", "B").inherit("B", "A");

        assert_eq!(lineage.ancestors("A"), vec!["B"]);
    }

    #[test]
    fn self_parent_is_ignored() {
        let lineage = Lineage::new().inherit("A", "A");
        assert!(lineage.ancestors("A").is_empty());
    }
}
