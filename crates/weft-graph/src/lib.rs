//! The trait node graph.
//!
//! Nodes are stored in an arena (`Vec` indexed by [`NodeId`]) with parent
//! edges as index handles, so mutually referencing traits never form
//! ownership cycles and cycle detection stays a flag on the node record.
//!
//! The graph is built in two phases: first every discovered trait is
//! registered, then parent edges are wired, because an edge may reference a
//! trait discovered later in the source. Linearization requests must only
//! be issued after wiring is complete; an early request silently yields an
//! incomplete ancestor set.

pub mod linearize;

use rustc_hash::FxHashMap;

use weft_common::binding::Binding;
use weft_common::decl::TypeDecl;
use weft_common::error::TraitError;
use weft_common::symbol::{self, SymbolId};

pub use linearize::LinearEntry;

/// A handle to a trait node within one [`TraitGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// An inheritance edge from a trait (or composing type) to a parent trait.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentEdge {
    /// The referenced parent trait.
    pub target: NodeId,
    /// The generic argument binding supplied at this edge. Empty for
    /// non-generic parents.
    pub binding: Binding,
}

/// One registered trait declaration.
#[derive(Debug)]
pub struct TraitNode {
    /// The contract identity this node is keyed by (scope + `T`-name).
    pub id: SymbolId,
    /// The trait's own declaration, members un-substituted.
    pub decl: TypeDecl,
    /// Parent edges in declared order. Order matters: later edges take
    /// precedence in conflicts.
    pub parents: Vec<ParentEdge>,
    /// Memoized ancestor order; computed lazily, never recomputed.
    linearization: Option<Vec<LinearEntry>>,
    /// Set while this node is being linearized on the call stack.
    in_progress: bool,
}

/// The graph of all registered traits, keyed by contract identity.
#[derive(Debug, Default)]
pub struct TraitGraph {
    nodes: Vec<TraitNode>,
    index: FxHashMap<SymbolId, NodeId>,
}

impl TraitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trait declaration, keyed by its contract identity
    /// (`Game.PlayerTrait` registers as `Game.TPlayer`).
    ///
    /// Duplicate identities are a fatal configuration error.
    pub fn register(&mut self, decl: TypeDecl) -> Result<NodeId, TraitError> {
        let id = SymbolId::new(decl.scope.clone(), symbol::contract_name(&decl.name));
        if self.index.contains_key(&id) {
            return Err(TraitError::DuplicateTrait { id });
        }
        let node_id = NodeId(self.nodes.len() as u32);
        self.index.insert(id.clone(), node_id);
        self.nodes.push(TraitNode {
            id,
            decl,
            parents: Vec::new(),
            linearization: None,
            in_progress: false,
        });
        Ok(node_id)
    }

    /// Look up a node by contract identity.
    ///
    /// Returns `None` for references that do not point at a known trait;
    /// callers skip those silently (ordinary host interfaces share the
    /// parent lists but are not part of this graph).
    pub fn resolve(&self, id: &SymbolId) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Build the edge for a parent reference that resolved to `target`,
    /// pairing the target's formal type parameters with the reference's
    /// argument names.
    pub fn edge(&self, target: NodeId, type_args: &[String]) -> ParentEdge {
        let formals = &self.node(target).decl.type_params;
        ParentEdge {
            target,
            binding: Binding::from_edge(formals, type_args),
        }
    }

    /// Attach a node's parent edges, in declared order. Part of the wiring
    /// phase; must precede any linearization request.
    pub fn set_parents(&mut self, id: NodeId, parents: Vec<ParentEdge>) {
        self.nodes[id.0 as usize].parents = parents;
    }

    /// Get a node by handle.
    pub fn node(&self, id: NodeId) -> &TraitNode {
        &self.nodes[id.0 as usize]
    }

    /// The number of registered traits.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate all node handles in registration order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut TraitNode {
        &mut self.nodes[id.0 as usize]
    }

    pub(crate) fn cached_linearization(&self, id: NodeId) -> Option<&Vec<LinearEntry>> {
        self.nodes[id.0 as usize].linearization.as_ref()
    }

    pub(crate) fn cache_linearization(&mut self, id: NodeId, entries: Vec<LinearEntry>) {
        self.nodes[id.0 as usize].linearization = Some(entries);
    }
}
