//! Member flattening for composing types.
//!
//! Walks a composing type's linearization and folds every ancestor's
//! (substituted) member set into one ordered, conflict-resolved member
//! list. The most-derived-in-order occurrence of a name keeps the plain
//! name; shadowed ancestor occurrences are renamed into the
//! `__super_<level>_<name>` chain. Override and virtual markers are
//! stripped on the way out (the flattened target has only ordinary
//! members) and abstract members never survive into the output.

use weft_common::decl::{MemberDecl, MemberKind};
use weft_common::error::TraitError;
use weft_graph::{ParentEdge, TraitGraph};

use crate::subst::substitute_members;
use crate::super_calls::{self, SuperRenameTable};

/// Flatten a composing type from its directly declared trait edges.
///
/// Edges must be in declared order. Fails only when the ancestor graph is
/// cyclic; the rename table is per-run state and is discarded afterwards.
pub fn flatten(graph: &mut TraitGraph, edges: &[ParentEdge]) -> Result<Vec<MemberDecl>, TraitError> {
    let order = graph.linearize_composed(edges)?;
    let mut table = SuperRenameTable::new();
    let mut out = Vec::new();
    for entry in &order {
        let members = substitute_members(&graph.node(entry.node).decl.members, &entry.binding);
        let mut batch = fold_members(&members, &mut table);
        // Super references resolve against the table as it stands after
        // this batch took its final names: the recorded count for a name
        // is the level of the implementation one step up the chain.
        super_calls::rewrite_batch(&mut batch, &table);
        out.extend(batch);
    }
    Ok(out)
}

/// Fold one ancestor's members through conflict resolution.
///
/// The rename decision runs for every member, including abstract methods
/// that are then dropped: an abstract occurrence of an already-recorded
/// name still consumes a super level.
fn fold_members(members: &[MemberDecl], table: &mut SuperRenameTable) -> Vec<MemberDecl> {
    let mut out = Vec::new();
    for member in members {
        let name = table.rewrite_name(&member.name, member.modifiers.is_override);
        match &member.kind {
            MemberKind::Field { ty, initializer } => {
                let mut modifiers = member.modifiers;
                modifiers.is_override = false;
                if modifiers.is_public() {
                    // Public fields are normalized into accessor pairs so
                    // the flattened type exposes a uniform contract shape.
                    let read_only = modifiers.is_read_only;
                    modifiers.is_read_only = false;
                    out.push(MemberDecl {
                        name,
                        modifiers,
                        kind: MemberKind::Property {
                            ty: ty.clone(),
                            get: true,
                            set: !read_only,
                            initializer: initializer.clone(),
                            body: None,
                        },
                    });
                } else {
                    out.push(MemberDecl {
                        name,
                        modifiers,
                        kind: member.kind.clone(),
                    });
                }
            }
            MemberKind::Property { .. } => {
                if member.modifiers.is_abstract {
                    continue;
                }
                let mut modifiers = member.modifiers;
                modifiers.is_override = false;
                out.push(MemberDecl {
                    name,
                    modifiers,
                    kind: member.kind.clone(),
                });
            }
            MemberKind::Method { .. } => {
                if member.modifiers.is_abstract {
                    // Abstract contracts are satisfied elsewhere; the
                    // flattened member list carries bodies only.
                    continue;
                }
                let mut modifiers = member.modifiers;
                modifiers.is_override = false;
                modifiers.is_virtual = false;
                out.push(MemberDecl {
                    name,
                    modifiers,
                    kind: member.kind.clone(),
                });
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_common::decl::{
        Body, BodyToken, Modifiers, Param, Signature, TypeDecl, TypeKind, TypeRef, Visibility,
    };
    use weft_graph::NodeId;

    fn public() -> Modifiers {
        Modifiers { visibility: Visibility::Public, ..Modifiers::default() }
    }

    fn method(name: &str, modifiers: Modifiers, body: Vec<BodyToken>) -> MemberDecl {
        MemberDecl {
            name: name.into(),
            modifiers,
            kind: MemberKind::Method {
                signature: Signature::default(),
                body: Some(Body(body)),
            },
        }
    }

    fn trait_decl(name: &str, type_params: &[&str], members: Vec<MemberDecl>) -> TypeDecl {
        TypeDecl {
            kind: TypeKind::Class,
            name: name.into(),
            scope: String::new(),
            is_abstract: true,
            is_partial: false,
            type_params: type_params.iter().map(|s| s.to_string()).collect(),
            parents: vec![],
            members,
        }
    }

    fn register(graph: &mut TraitGraph, decl: TypeDecl) -> NodeId {
        graph.register(decl).unwrap()
    }

    // ── Conflict resolution ─────────────────────────────────────────────

    #[test]
    fn two_overriding_ancestors_build_a_super_chain() {
        // Both traits declare an overriding `foo`; the most-derived keeps
        // the plain name, the earlier implementation becomes __super_1_foo,
        // and the plain foo's `base.foo()` call is retargeted onto it.
        let mut graph = TraitGraph::new();
        let first = register(
            &mut graph,
            trait_decl(
                "FirstTrait",
                &[],
                vec![method(
                    "foo",
                    Modifiers { is_override: true, ..public() },
                    vec![
                        BodyToken::SuperRef("foo".into()),
                        BodyToken::Text("()".into()),
                    ],
                )],
            ),
        );
        let second = register(
            &mut graph,
            trait_decl(
                "SecondTrait",
                &[],
                vec![method("foo", Modifiers { is_override: true, ..public() }, vec![])],
            ),
        );

        let edges = vec![graph.edge(first, &[]), graph.edge(second, &[])];
        let flat = flatten(&mut graph, &edges).unwrap();

        let names: Vec<&str> = flat.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "__super_1_foo"]);

        // The plain foo calls the super member, as an ordinary call.
        assert_eq!(
            flat[0].body().unwrap().0[0],
            BodyToken::Ident("__super_1_foo".into())
        );
        // Override markers are stripped from both.
        assert!(flat.iter().all(|m| !m.modifiers.is_override));
    }

    #[test]
    fn three_level_chain_links_each_super_upward() {
        let mut graph = TraitGraph::new();
        let overriding = Modifiers { is_override: true, ..public() };
        let a = register(
            &mut graph,
            trait_decl("ATrait", &[], vec![method("foo", overriding, vec![
                BodyToken::SuperRef("foo".into()),
            ])]),
        );
        let b = register(
            &mut graph,
            trait_decl("BTrait", &[], vec![method("foo", overriding, vec![
                BodyToken::SuperRef("foo".into()),
            ])]),
        );
        let c = register(
            &mut graph,
            trait_decl("CTrait", &[], vec![method("foo", overriding, vec![])]),
        );

        let edges = vec![graph.edge(a, &[]), graph.edge(b, &[]), graph.edge(c, &[])];
        let flat = flatten(&mut graph, &edges).unwrap();

        let names: Vec<&str> = flat.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "__super_1_foo", "__super_2_foo"]);

        // Each implementation calls the one above it in the chain.
        assert_eq!(
            flat[0].body().unwrap().0[0],
            BodyToken::Ident("__super_1_foo".into())
        );
        assert_eq!(
            flat[1].body().unwrap().0[0],
            BodyToken::Ident("__super_2_foo".into())
        );
    }

    #[test]
    fn non_override_duplicate_is_not_renamed() {
        // Without the override marker the first occurrence records
        // nothing, so the later occurrence keeps the plain name too.
        let mut graph = TraitGraph::new();
        let a = register(
            &mut graph,
            trait_decl("ATrait", &[], vec![method("bar", public(), vec![])]),
        );
        let b = register(
            &mut graph,
            trait_decl("BTrait", &[], vec![method("bar", public(), vec![])]),
        );

        let edges = vec![graph.edge(a, &[]), graph.edge(b, &[])];
        let flat = flatten(&mut graph, &edges).unwrap();
        let names: Vec<&str> = flat.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["bar", "bar"]);
    }

    #[test]
    fn abstract_methods_are_dropped_but_consume_levels() {
        let mut graph = TraitGraph::new();
        let a = register(
            &mut graph,
            trait_decl(
                "ATrait",
                &[],
                vec![method("foo", Modifiers { is_override: true, ..public() }, vec![])],
            ),
        );
        let b = register(
            &mut graph,
            trait_decl(
                "BTrait",
                &[],
                vec![MemberDecl {
                    name: "foo".into(),
                    modifiers: Modifiers { is_abstract: true, ..public() },
                    kind: MemberKind::Method { signature: Signature::default(), body: None },
                }],
            ),
        );
        let c = register(
            &mut graph,
            trait_decl("CTrait", &[], vec![method("foo", public(), vec![])]),
        );

        let edges = vec![graph.edge(a, &[]), graph.edge(b, &[]), graph.edge(c, &[])];
        let flat = flatten(&mut graph, &edges).unwrap();

        // The abstract occurrence is not emitted but still advanced the
        // rename table, so the concrete one lands at level 2.
        let names: Vec<&str> = flat.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["foo", "__super_2_foo"]);
    }

    // ── Field normalization ─────────────────────────────────────────────

    #[test]
    fn public_read_only_field_becomes_getter_only_property() {
        let mut graph = TraitGraph::new();
        let a = register(
            &mut graph,
            trait_decl(
                "StatsTrait",
                &[],
                vec![MemberDecl {
                    name: "health".into(),
                    modifiers: Modifiers { is_read_only: true, ..public() },
                    kind: MemberKind::Field {
                        ty: TypeRef::name("Int"),
                        initializer: Some(Body(vec![BodyToken::Text("100".into())])),
                    },
                }],
            ),
        );

        let edges = vec![graph.edge(a, &[])];
        let flat = flatten(&mut graph, &edges).unwrap();

        let MemberKind::Property { ty, get, set, initializer, .. } = &flat[0].kind else {
            panic!("expected property");
        };
        assert_eq!(*ty, TypeRef::name("Int"));
        assert!(*get);
        assert!(!*set);
        assert!(initializer.is_some());
        assert!(!flat[0].modifiers.is_read_only);
    }

    #[test]
    fn public_mutable_field_gets_both_accessors() {
        let mut graph = TraitGraph::new();
        let a = register(
            &mut graph,
            trait_decl(
                "StatsTrait",
                &[],
                vec![MemberDecl {
                    name: "mana".into(),
                    modifiers: public(),
                    kind: MemberKind::Field { ty: TypeRef::name("Int"), initializer: None },
                }],
            ),
        );

        let edges = vec![graph.edge(a, &[])];
        let flat = flatten(&mut graph, &edges).unwrap();

        let MemberKind::Property { get, set, .. } = &flat[0].kind else {
            panic!("expected property");
        };
        assert!(*get && *set);
    }

    #[test]
    fn private_field_stays_a_field() {
        let mut graph = TraitGraph::new();
        let a = register(
            &mut graph,
            trait_decl(
                "StateTrait",
                &[],
                vec![MemberDecl {
                    name: "seed".into(),
                    modifiers: Modifiers::default(),
                    kind: MemberKind::Field { ty: TypeRef::name("Int"), initializer: None },
                }],
            ),
        );

        let edges = vec![graph.edge(a, &[])];
        let flat = flatten(&mut graph, &edges).unwrap();
        assert!(flat[0].is_field());
    }

    // ── Substitution through flattening ─────────────────────────────────

    #[test]
    fn edge_bindings_apply_before_merging() {
        let mut graph = TraitGraph::new();
        let store = register(
            &mut graph,
            trait_decl(
                "StoreTrait",
                &["X"],
                vec![MemberDecl {
                    name: "put".into(),
                    modifiers: public(),
                    kind: MemberKind::Method {
                        signature: Signature {
                            params: vec![Param { name: "value".into(), ty: TypeRef::name("X") }],
                            return_type: None,
                        },
                        body: Some(Body(vec![])),
                    },
                }],
            ),
        );

        let edges = vec![graph.edge(store, &["Int".into()])];
        let flat = flatten(&mut graph, &edges).unwrap();

        let MemberKind::Method { signature, .. } = &flat[0].kind else {
            panic!("expected method");
        };
        assert_eq!(signature.params[0].ty, TypeRef::name("Int"));
    }

    #[test]
    fn diamond_member_carries_later_parent_binding() {
        // Base<X> declares a member using X; B binds X->BInt, C binds
        // X->CInt. A type composing [B, C] must see the C binding.
        let mut graph = TraitGraph::new();
        let base = register(
            &mut graph,
            trait_decl(
                "BaseTrait",
                &["X"],
                vec![MemberDecl {
                    name: "value".into(),
                    modifiers: public(),
                    kind: MemberKind::Method {
                        signature: Signature {
                            params: vec![],
                            return_type: Some(TypeRef::name("X")),
                        },
                        body: Some(Body(vec![])),
                    },
                }],
            ),
        );
        let b = register(&mut graph, trait_decl("BTrait", &[], vec![]));
        let c = register(&mut graph, trait_decl("CTrait", &[], vec![]));
        graph.set_parents(b, vec![graph.edge(base, &["BInt".into()])]);
        graph.set_parents(c, vec![graph.edge(base, &["CInt".into()])]);

        let edges = vec![graph.edge(b, &[]), graph.edge(c, &[])];
        let flat = flatten(&mut graph, &edges).unwrap();

        let MemberKind::Method { signature, .. } = &flat[0].kind else {
            panic!("expected method");
        };
        assert_eq!(signature.return_type, Some(TypeRef::name("CInt")));
    }

    #[test]
    fn cyclic_ancestry_fails_flattening() {
        let mut graph = TraitGraph::new();
        let a = register(&mut graph, trait_decl("ATrait", &[], vec![]));
        let b = register(&mut graph, trait_decl("BTrait", &[], vec![]));
        graph.set_parents(a, vec![graph.edge(b, &[])]);
        graph.set_parents(b, vec![graph.edge(a, &[])]);

        let edges = vec![graph.edge(a, &[])];
        assert!(flatten(&mut graph, &edges).is_err());
    }
}
