//! Generated public contracts and trait parent synthesis.
//!
//! Each trait class produces two interfaces: the contract (`TFoo`), which
//! composing types list as a parent and which exposes the trait's abstract
//! and public surface with bodies stripped, and the extendable marker
//! (`EFoo`), which sub-traits list as a parent. Traits that themselves
//! extend traits additionally get a synthesized `<Name>Parent` base class
//! carrying their inherited member sets, so the trait body can be written
//! against real inherited members before any flattening happens.

use weft_common::decl::{
    MemberDecl, MemberKind, Modifiers, ParentRef, TypeDecl, TypeKind, Visibility,
};
use weft_common::error::TraitError;
use weft_common::symbol;
use weft_graph::{NodeId, TraitGraph};

use crate::subst::substitute_members;

/// Build the contract interface (`TFoo`) for a trait declaration.
///
/// Parent references are rewritten to their contract spelling; members are
/// the trait's own public surface per [`contract_member`].
pub fn contract_interface(decl: &TypeDecl) -> TypeDecl {
    TypeDecl {
        kind: TypeKind::Interface,
        name: symbol::contract_name(&decl.name),
        scope: decl.scope.clone(),
        is_abstract: false,
        is_partial: false,
        type_params: decl.type_params.clone(),
        parents: rewrite_parents(&decl.parents),
        members: decl.members.iter().filter_map(contract_member).collect(),
    }
}

/// Build the extendable marker interface (`EFoo`) for a trait declaration:
/// same rewritten parent list, no members.
pub fn extendable_interface(decl: &TypeDecl) -> TypeDecl {
    TypeDecl {
        kind: TypeKind::Interface,
        name: symbol::extendable_name(&decl.name),
        scope: decl.scope.clone(),
        is_abstract: false,
        is_partial: false,
        type_params: decl.type_params.clone(),
        parents: rewrite_parents(&decl.parents),
        members: vec![],
    }
}

fn rewrite_parents(parents: &[ParentRef]) -> Vec<ParentRef> {
    parents
        .iter()
        .map(|p| ParentRef {
            name: symbol::parent_to_contract_name(&p.name),
            scope: p.scope.clone(),
            type_args: p.type_args.clone(),
        })
        .collect()
}

/// Project one trait member onto the contract surface.
///
/// Override members are excluded entirely. Public fields become accessor
/// properties (no setter for read-only fields); public properties keep
/// their accessor shape; abstract or public methods keep only their
/// signature. Everything emitted is body-less and carries no modifiers
/// beyond the implicit public of an interface.
fn contract_member(member: &MemberDecl) -> Option<MemberDecl> {
    if member.modifiers.is_override {
        return None;
    }
    let interface_modifiers = Modifiers {
        visibility: Visibility::Public,
        ..Modifiers::default()
    };
    match &member.kind {
        MemberKind::Field { ty, .. } => {
            if !member.modifiers.is_public() {
                return None;
            }
            Some(MemberDecl {
                name: member.name.clone(),
                modifiers: interface_modifiers,
                kind: MemberKind::Property {
                    ty: ty.clone(),
                    get: true,
                    set: !member.modifiers.is_read_only,
                    initializer: None,
                    body: None,
                },
            })
        }
        MemberKind::Property { ty, set, .. } => {
            if !member.modifiers.is_public() {
                return None;
            }
            Some(MemberDecl {
                name: member.name.clone(),
                modifiers: interface_modifiers,
                kind: MemberKind::Property {
                    ty: ty.clone(),
                    get: true,
                    set: *set,
                    initializer: None,
                    body: None,
                },
            })
        }
        MemberKind::Method { signature, .. } => {
            if !(member.modifiers.is_abstract || member.modifiers.is_public()) {
                return None;
            }
            Some(MemberDecl {
                name: member.name.clone(),
                modifiers: interface_modifiers,
                kind: MemberKind::Method {
                    signature: signature.clone(),
                    body: None,
                },
            })
        }
    }
}

/// The two declarations synthesized for a trait that extends traits.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentSynthesis {
    /// A partial re-declaration of the trait adding `<Name>Parent` as its
    /// base.
    pub partial: TypeDecl,
    /// The `<Name>Parent` class carrying the inherited member sets.
    pub parent: TypeDecl,
}

/// Synthesize the parent base class for a trait node, if it has parents.
///
/// The parent class holds, for every ancestor after the self entry of the
/// trait's linearization, that ancestor's members under the entry's
/// binding, excluding overriding properties and methods (fields always
/// pass). The partial's base reference carries no type arguments.
pub fn parent_synthesis(
    graph: &mut TraitGraph,
    id: NodeId,
) -> Result<Option<ParentSynthesis>, TraitError> {
    if graph.node(id).parents.is_empty() {
        return Ok(None);
    }
    let order = graph.linearize(id)?;
    let decl = graph.node(id).decl.clone();
    let parent_name = format!("{}Parent", decl.name);

    let mut members = Vec::new();
    for entry in order.iter().skip(1) {
        let substituted =
            substitute_members(&graph.node(entry.node).decl.members, &entry.binding);
        members.extend(
            substituted
                .into_iter()
                .filter(|m| m.is_field() || !m.modifiers.is_override),
        );
    }

    let parent = TypeDecl {
        kind: TypeKind::Class,
        name: parent_name.clone(),
        scope: decl.scope.clone(),
        is_abstract: decl.is_abstract,
        is_partial: false,
        type_params: decl.type_params.clone(),
        parents: vec![],
        members,
    };
    let partial = TypeDecl {
        kind: TypeKind::Class,
        name: decl.name.clone(),
        scope: decl.scope.clone(),
        is_abstract: decl.is_abstract,
        is_partial: true,
        type_params: decl.type_params.clone(),
        parents: vec![ParentRef {
            name: parent_name,
            scope: String::new(),
            type_args: vec![],
        }],
        members: vec![],
    };
    Ok(Some(ParentSynthesis { partial, parent }))
}
