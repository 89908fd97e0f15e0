//! Error types for trait composition.
//!
//! Errors are collected per declaration rather than aborting the whole run:
//! one cyclic trait must not prevent unrelated composing types from
//! flattening (the driver isolates failures per type).

use std::fmt;

use serde::Serialize;

use crate::symbol::SymbolId;

/// A fatal error for one declaration's composition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TraitError {
    /// A trait's ancestor chain reaches back to itself. Raised by the
    /// linearizer when it re-enters a node that is already in progress on
    /// the call stack; fatal for every composition that reaches the cycle.
    CyclicTraitReference { id: SymbolId },
    /// Two trait declarations share one qualified identity. This is a
    /// configuration error in the input project and fails registration.
    DuplicateTrait { id: SymbolId },
}

impl fmt::Display for TraitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CyclicTraitReference { id } => {
                write!(f, "cyclic trait reference: {id}")
            }
            Self::DuplicateTrait { id } => {
                write!(f, "duplicate trait declaration: {id}")
            }
        }
    }
}

impl std::error::Error for TraitError {}
