//! Symbol categories and the three-way name sets built from fragments.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a name was bound by a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolCategory {
    /// Plain or augmented assignment (`x = 1`, `x += 1`)
    Variable,
    /// Assignment carrying a declared type (`x: int = 1`, `x: int`)
    AnnotatedVariable,
    /// Function, class or type alias definition
    Callable,
}

/// Names grouped by [`SymbolCategory`].
///
/// Used both for the names a single fragment introduces and for the
/// run-wide registry of names still live in the history buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSet {
    pub variables: BTreeSet<String>,
    pub annotated: BTreeSet<String>,
    pub callables: BTreeSet<String>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name to a category. Returns false if it was already present.
    pub fn insert(&mut self, category: SymbolCategory, name: impl Into<String>) -> bool {
        self.get_mut(category).insert(name.into())
    }

    pub fn get(&self, category: SymbolCategory) -> &BTreeSet<String> {
        match category {
            SymbolCategory::Variable => &self.variables,
            SymbolCategory::AnnotatedVariable => &self.annotated,
            SymbolCategory::Callable => &self.callables,
        }
    }

    fn get_mut(&mut self, category: SymbolCategory) -> &mut BTreeSet<String> {
        match category {
            SymbolCategory::Variable => &mut self.variables,
            SymbolCategory::AnnotatedVariable => &mut self.annotated,
            SymbolCategory::Callable => &mut self.callables,
        }
    }

    pub fn contains(&self, category: SymbolCategory, name: &str) -> bool {
        self.get(category).contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.annotated.is_empty() && self.callables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variables.len() + self.annotated.len() + self.callables.len()
    }

    /// True if any category of `self` shares a name with the same category of `other`.
    pub fn overlaps(&self, other: &SymbolSet) -> bool {
        !self.variables.is_disjoint(&other.variables)
            || !self.annotated.is_disjoint(&other.annotated)
            || !self.callables.is_disjoint(&other.callables)
    }

    /// Treating `self` as the registry, compute the names whose recorded
    /// declarations are superseded by the names in `introduced`.
    ///
    /// A plain reassignment never supersedes an annotated declaration; any
    /// new binding supersedes plain variables and callables.
    pub fn superseded_by(&self, introduced: &SymbolSet) -> SymbolSet {
        let any: BTreeSet<&String> = introduced
            .variables
            .iter()
            .chain(&introduced.annotated)
            .chain(&introduced.callables)
            .collect();
        let declared: BTreeSet<&String> =
            introduced.annotated.iter().chain(&introduced.callables).collect();

        SymbolSet {
            variables: retain_in(&self.variables, &any),
            annotated: retain_in(&self.annotated, &declared),
            callables: retain_in(&self.callables, &any),
        }
    }

    /// Remove every name of `other` from the matching category.
    pub fn remove_all(&mut self, other: &SymbolSet) {
        self.variables.retain(|n| !other.variables.contains(n));
        self.annotated.retain(|n| !other.annotated.contains(n));
        self.callables.retain(|n| !other.callables.contains(n));
    }

    /// Union every name of `other` into the matching category.
    pub fn extend_from(&mut self, other: &SymbolSet) {
        self.variables.extend(other.variables.iter().cloned());
        self.annotated.extend(other.annotated.iter().cloned());
        self.callables.extend(other.callables.iter().cloned());
    }
}

fn retain_in(names: &BTreeSet<String>, keep: &BTreeSet<&String>) -> BTreeSet<String> {
    names.iter().filter(|n| keep.contains(n)).cloned().collect()
}
