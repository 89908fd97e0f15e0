//! Member-set transformations over linearized trait ancestries.
//!
//! Three passes, applied per composing type in this order:
//! generic substitution ([`subst`]), conflict-resolved flattening with the
//! super-rename table ([`flatten`]), and super-call rewriting
//! ([`super_calls`]). [`contract`] computes the generated public contract
//! for a trait's own (un-substituted) member set, plus the parent-class
//! synthesis for traits that themselves extend traits.

pub mod contract;
pub mod flatten;
pub mod subst;
pub mod super_calls;

pub use contract::{contract_interface, extendable_interface, parent_synthesis, ParentSynthesis};
pub use flatten::flatten;
pub use subst::substitute_members;
pub use super_calls::{super_member_name, SuperRenameTable};
