//! Qualified symbol identities and the contract naming scheme.
//!
//! A trait class `Foo.BarTrait` is exposed to the host through two generated
//! interfaces: the contract `Foo.TBar` (implemented by composing types) and
//! the extendable marker `Foo.EBar` (listed as a parent by sub-traits). The
//! helpers here convert between the three spellings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The suffix that marks an abstract class as a trait declaration.
pub const TRAIT_SUFFIX: &str = "Trait";

/// A qualified identity: namespace-like scope plus a simple name.
///
/// Unique within one compilation unit set. The scope may be empty for
/// top-level declarations.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolId {
    /// Namespace-like qualifying scope, e.g. `"Game.Actors"`. Empty for
    /// unscoped declarations.
    #[serde(default)]
    pub scope: String,
    /// The simple declaration name, e.g. `"PlayerTrait"`.
    pub name: String,
}

impl SymbolId {
    pub fn new(scope: impl Into<String>, name: impl Into<String>) -> Self {
        SymbolId {
            scope: scope.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scope.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.scope, self.name)
        }
    }
}

/// Strip the trailing `Trait` suffix from a trait class name.
///
/// `"PlayerTrait"` -> `"Player"`. Names without the suffix pass through
/// unchanged (callers check [`is_trait_name`] first).
fn trait_stem(name: &str) -> &str {
    name.strip_suffix(TRAIT_SUFFIX).unwrap_or(name)
}

/// Whether a declaration name follows the trait naming convention.
pub fn is_trait_name(name: &str) -> bool {
    name.len() > TRAIT_SUFFIX.len() && name.ends_with(TRAIT_SUFFIX)
}

/// Contract interface name for a trait class: `"PlayerTrait"` -> `"TPlayer"`.
pub fn contract_name(trait_name: &str) -> String {
    format!("T{}", trait_stem(trait_name))
}

/// Extendable marker interface name: `"PlayerTrait"` -> `"EPlayer"`.
pub fn extendable_name(trait_name: &str) -> String {
    format!("E{}", trait_stem(trait_name))
}

/// Map an extendable reference to the matching contract identity:
/// `Foo.EPlayer` -> `Foo.TPlayer`.
///
/// Only the first character is rewritten; the scope is preserved.
pub fn extendable_to_contract(id: &SymbolId) -> SymbolId {
    let mut chars = id.name.chars();
    let rest: String = match chars.next() {
        Some(_) => chars.collect(),
        None => String::new(),
    };
    SymbolId::new(id.scope.clone(), format!("T{rest}"))
}

/// Rewrite a parent reference name to its contract spelling by replacing the
/// first character with `T`: `"EPlayer"` -> `"TPlayer"`.
///
/// Applied to the parent lists of generated interfaces, which only ever name
/// extendable interfaces of other traits.
pub fn parent_to_contract_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(_) => format!("T{}", chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_display() {
        assert_eq!(SymbolId::new("Game", "PlayerTrait").to_string(), "Game.PlayerTrait");
        assert_eq!(SymbolId::new("", "PlayerTrait").to_string(), "PlayerTrait");
    }

    #[test]
    fn trait_name_detection() {
        assert!(is_trait_name("PlayerTrait"));
        assert!(!is_trait_name("Player"));
        // The bare suffix is not a trait name.
        assert!(!is_trait_name("Trait"));
    }

    #[test]
    fn contract_and_extendable_names() {
        assert_eq!(contract_name("PlayerTrait"), "TPlayer");
        assert_eq!(extendable_name("PlayerTrait"), "EPlayer");
    }

    #[test]
    fn interior_trait_occurrence_is_kept() {
        // Only the suffix is stripped, not interior occurrences.
        assert_eq!(contract_name("TraitHelperTrait"), "TTraitHelper");
    }

    #[test]
    fn extendable_maps_to_contract() {
        let id = SymbolId::new("Game", "EPlayer");
        assert_eq!(extendable_to_contract(&id), SymbolId::new("Game", "TPlayer"));
    }

    #[test]
    fn parent_name_rewrite() {
        assert_eq!(parent_to_contract_name("EPlayer"), "TPlayer");
        assert_eq!(parent_to_contract_name(""), "");
    }
}
