//! Generic bindings carried by inheritance edges.
//!
//! A binding maps a trait's formal type-parameter names to the argument
//! names supplied at one particular inheritance edge. It is a name-level
//! mapping: substitution renames identifier occurrences, nothing more.

use serde::{Deserialize, Serialize};

/// An ordered mapping from formal type-parameter names to argument names.
///
/// Pairs where the argument equals the formal are retained but have no
/// substitution effect. The identity binding is the empty mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding(Vec<(String, String)>);

impl Binding {
    /// The identity binding: nothing is renamed.
    pub fn identity() -> Self {
        Binding(Vec::new())
    }

    /// Pair up a target's formal parameters with the arguments supplied at
    /// an edge. Extra formals (missing arguments) are left unbound; extra
    /// arguments are ignored.
    pub fn from_edge(formals: &[String], args: &[String]) -> Self {
        Binding(
            formals
                .iter()
                .zip(args)
                .map(|(f, a)| (f.clone(), a.clone()))
                .collect(),
        )
    }

    /// The argument bound to a formal name, if any.
    pub fn lookup(&self, formal: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| f == formal)
            .map(|(_, a)| a.as_str())
    }

    /// The pairs that actually rename something (argument differs from the
    /// formal). Substitution short-circuits when this is empty.
    pub fn effective_pairs(&self) -> Vec<(&str, &str)> {
        self.0
            .iter()
            .filter(|(f, a)| f != a)
            .map(|(f, a)| (f.as_str(), a.as_str()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
