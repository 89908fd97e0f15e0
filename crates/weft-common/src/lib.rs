//! Shared types for the weft trait composer.
//!
//! Provides the declaration model ([`decl`]), qualified symbol identities and
//! the contract naming scheme ([`symbol`]), per-edge generic bindings
//! ([`binding`]), and the error types shared by all phases ([`error`]).

pub mod binding;
pub mod decl;
pub mod error;
pub mod symbol;
