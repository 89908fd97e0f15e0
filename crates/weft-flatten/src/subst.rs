//! Generic substitution across inheritance edges.
//!
//! Rewrites a member set's use of a trait's formal type-parameter names into
//! the argument names bound at a given edge. This is a name-level rename of
//! identifier occurrences in signatures and bodies, not a type-checked
//! instantiation: an unrelated identifier that happens to be spelled like a
//! formal parameter is renamed too. Detecting such collisions would need a
//! richer symbol model; they pass silently by design.
//!
//! What counts as an identifier occurrence: type-reference names (including
//! applied-type heads and arguments) and `Ident` body tokens. Member names,
//! parameter names, and opaque `Text` tokens are never rewritten.

use weft_common::binding::Binding;
use weft_common::decl::{Body, BodyToken, MemberDecl, MemberKind, Param, Signature, TypeRef};

/// Apply an edge binding to a member set, returning the rewritten members.
///
/// Bindings with no effective pairs (every argument spelled like its
/// formal) return the input unchanged.
pub fn substitute_members(members: &[MemberDecl], binding: &Binding) -> Vec<MemberDecl> {
    let pairs = binding.effective_pairs();
    if pairs.is_empty() {
        return members.to_vec();
    }
    members
        .iter()
        .map(|m| substitute_member(m, &pairs))
        .collect()
}

fn substitute_member(member: &MemberDecl, pairs: &[(&str, &str)]) -> MemberDecl {
    let kind = match &member.kind {
        MemberKind::Field { ty, initializer } => MemberKind::Field {
            ty: substitute_type(ty, pairs),
            initializer: initializer.as_ref().map(|b| substitute_body(b, pairs)),
        },
        MemberKind::Property { ty, get, set, initializer, body } => MemberKind::Property {
            ty: substitute_type(ty, pairs),
            get: *get,
            set: *set,
            initializer: initializer.as_ref().map(|b| substitute_body(b, pairs)),
            body: body.as_ref().map(|b| substitute_body(b, pairs)),
        },
        MemberKind::Method { signature, body } => MemberKind::Method {
            signature: substitute_signature(signature, pairs),
            body: body.as_ref().map(|b| substitute_body(b, pairs)),
        },
    };
    MemberDecl {
        name: member.name.clone(),
        modifiers: member.modifiers,
        kind,
    }
}

fn substitute_signature(sig: &Signature, pairs: &[(&str, &str)]) -> Signature {
    Signature {
        params: sig
            .params
            .iter()
            .map(|p| Param {
                // Parameter names are declaration sites, not identifier
                // occurrences; only their types are rewritten.
                name: p.name.clone(),
                ty: substitute_type(&p.ty, pairs),
            })
            .collect(),
        return_type: sig.return_type.as_ref().map(|t| substitute_type(t, pairs)),
    }
}

fn substitute_type(ty: &TypeRef, pairs: &[(&str, &str)]) -> TypeRef {
    match ty {
        TypeRef::Name(n) => TypeRef::Name(rename(n, pairs)),
        TypeRef::Apply { name, args } => TypeRef::Apply {
            name: rename(name, pairs),
            args: args.iter().map(|a| substitute_type(a, pairs)).collect(),
        },
    }
}

fn substitute_body(body: &Body, pairs: &[(&str, &str)]) -> Body {
    Body(
        body.0
            .iter()
            .map(|tok| match tok {
                BodyToken::Ident(name) => BodyToken::Ident(rename(name, pairs)),
                // Super references and opaque text are out of scope for
                // substitution.
                other => other.clone(),
            })
            .collect(),
    )
}

fn rename(name: &str, pairs: &[(&str, &str)]) -> String {
    match pairs.iter().find(|(formal, _)| *formal == name) {
        Some((_, arg)) => arg.to_string(),
        None => name.to_string(),
    }
}
