//! The composition pipeline.
//!
//! Runs the full build over a loaded set of compilation units:
//!
//! 1. Register every trait declaration and emit its contract and extendable
//!    interfaces into its unit's interface document.
//! 2. Wire trait-to-trait parent edges (extendable references mapped to
//!    contract identities; unresolved references skipped).
//! 3. Synthesize the `<Name>Parent` base class for traits that extend
//!    traits, staged into the interface document of the unit declaring the
//!    trait's first resolved parent.
//! 4. Flatten every composing type into its unit's partial document.
//!
//! Duplicate trait registration aborts the whole build. Cyclic ancestries
//! abort only the declarations that reach the cycle; the pipeline records
//! the failure and keeps going.

use std::path::PathBuf;

use weft_common::decl::{ParentRef, TypeDecl, TypeKind};
use weft_common::error::TraitError;
use weft_common::symbol::{self, SymbolId};
use weft_flatten::{contract_interface, extendable_interface, flatten, parent_synthesis};
use weft_graph::{ParentEdge, TraitGraph};

use crate::discovery::CompilationUnit;
use crate::staging::{self, GeneratedDoc};

/// One declaration that could not be composed, with the error that stopped
/// it. The rest of the build is unaffected.
#[derive(Debug)]
pub struct ComposeFailure {
    pub id: SymbolId,
    pub error: TraitError,
}

/// The result of a pipeline run: generated documents in unit order plus any
/// per-declaration failures.
#[derive(Debug)]
pub struct BuildOutput {
    pub documents: Vec<GeneratedDoc>,
    pub failures: Vec<ComposeFailure>,
}

/// The identity a parent reference resolves against: its own scope when
/// qualified, otherwise the declaring type's scope.
fn parent_id(parent: &ParentRef, declaring_scope: &str) -> SymbolId {
    let scope = if parent.scope.is_empty() {
        declaring_scope
    } else {
        &parent.scope
    };
    SymbolId::new(scope, parent.name.clone())
}

/// Resolve a declaration's parent references into graph edges, in declared
/// order, mapping each reference through `map_id` first. References that do
/// not name a known trait are skipped.
fn resolve_edges(
    graph: &TraitGraph,
    decl: &TypeDecl,
    map_id: impl Fn(SymbolId) -> SymbolId,
) -> Vec<ParentEdge> {
    let mut edges = Vec::new();
    for parent in &decl.parents {
        let key = map_id(parent_id(parent, &decl.scope));
        if let Some(target) = graph.resolve(&key) {
            edges.push(graph.edge(target, &parent.type_args));
        }
    }
    edges
}

/// Run the composition pipeline over a set of compilation units.
pub fn compose(units: &[CompilationUnit]) -> Result<BuildOutput, String> {
    let mut graph = TraitGraph::new();
    // Unit index for each node, in registration order (indexed by NodeId.0).
    let mut node_unit: Vec<usize> = Vec::new();
    let mut interface_docs: Vec<Vec<TypeDecl>> = units.iter().map(|_| Vec::new()).collect();
    let mut partial_docs: Vec<Vec<TypeDecl>> = units.iter().map(|_| Vec::new()).collect();
    let mut failures = Vec::new();

    // Phase 1: register traits and emit their generated interfaces.
    for (unit_idx, unit) in units.iter().enumerate() {
        for decl in &unit.decls {
            if !decl.is_trait() {
                continue;
            }
            graph.register(decl.clone()).map_err(|e| e.to_string())?;
            node_unit.push(unit_idx);
            interface_docs[unit_idx].push(contract_interface(decl));
            interface_docs[unit_idx].push(extendable_interface(decl));
        }
    }

    // Phase 2: wire trait parent edges. Traits name their parents through
    // the extendable spelling; the graph is keyed by contract identity.
    let ids: Vec<_> = graph.node_ids().collect();
    for &id in &ids {
        let decl = graph.node(id).decl.clone();
        let edges = resolve_edges(&graph, &decl, |key| symbol::extendable_to_contract(&key));
        graph.set_parents(id, edges);
    }

    // Phase 3: parent synthesis for traits that extend traits. Both
    // generated declarations land in the interface document of the unit
    // declaring the trait's first resolved parent.
    for &id in &ids {
        match parent_synthesis(&mut graph, id) {
            Ok(None) => {}
            Ok(Some(synthesis)) => {
                let first_parent = graph.node(id).parents[0].target;
                let unit_idx = node_unit[first_parent.0 as usize];
                interface_docs[unit_idx].push(synthesis.partial);
                interface_docs[unit_idx].push(synthesis.parent);
            }
            Err(error) => {
                failures.push(ComposeFailure { id: graph.node(id).id.clone(), error });
            }
        }
    }

    // Phase 4: flatten composing types. Composing types name traits through
    // the contract spelling directly.
    for (unit_idx, unit) in units.iter().enumerate() {
        for decl in &unit.decls {
            if !decl.is_composing_candidate() {
                continue;
            }
            let edges = resolve_edges(&graph, decl, |key| key);
            if edges.is_empty() {
                // None of the parents is a known trait; not a composing
                // type after all.
                continue;
            }
            match flatten(&mut graph, &edges) {
                Ok(members) => {
                    partial_docs[unit_idx].push(TypeDecl {
                        kind: TypeKind::Class,
                        name: decl.name.clone(),
                        scope: decl.scope.clone(),
                        is_abstract: false,
                        is_partial: true,
                        type_params: decl.type_params.clone(),
                        parents: vec![],
                        members,
                    });
                }
                Err(error) => {
                    failures.push(ComposeFailure { id: decl.id(), error });
                }
            }
        }
    }

    // Assemble documents in unit order, interface before partial. Units
    // that produced nothing stage nothing.
    let mut documents = Vec::new();
    for (unit_idx, unit) in units.iter().enumerate() {
        collect_doc(
            &mut documents,
            staging::interface_doc_path(&unit.path),
            std::mem::take(&mut interface_docs[unit_idx]),
        );
        collect_doc(
            &mut documents,
            staging::partial_doc_path(&unit.path),
            std::mem::take(&mut partial_docs[unit_idx]),
        );
    }

    Ok(BuildOutput { documents, failures })
}

fn collect_doc(documents: &mut Vec<GeneratedDoc>, path: PathBuf, declarations: Vec<TypeDecl>) {
    if !declarations.is_empty() {
        documents.push(GeneratedDoc { path, declarations });
    }
}
