//! Ancestor linearization.
//!
//! Computes, for any node, the ordered ancestor sequence (self first) with
//! the generic binding in effect at each position. The merge rule is
//! deliberately narrower than a consistency-checked C3 merge: when two
//! parents share a common ancestor, the earlier inclusion is evicted and the
//! ancestor re-enters via the later parent's chain, with the later parent's
//! binding context ("last listed wins"). Divergent orderings across
//! multi-path graphs are never diagnosed; that boundary condition is part of
//! the contract, not a bug.

use weft_common::binding::Binding;
use weft_common::error::TraitError;

use crate::{NodeId, ParentEdge, TraitGraph};

/// One position in a linearization: a trait and the binding under which its
/// members are seen from this position.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearEntry {
    pub node: NodeId,
    pub binding: Binding,
}

impl TraitGraph {
    /// Linearize a trait node: self first, then ancestors in merge order.
    ///
    /// Memoized: the first call computes and caches the sequence; every
    /// later call returns the identical cached sequence. Re-entering a node
    /// that is already in progress on the call stack raises
    /// [`TraitError::CyclicTraitReference`] naming that node.
    pub fn linearize(&mut self, id: NodeId) -> Result<Vec<LinearEntry>, TraitError> {
        if let Some(cached) = self.cached_linearization(id) {
            return Ok(cached.clone());
        }
        if self.node(id).in_progress {
            return Err(TraitError::CyclicTraitReference {
                id: self.node(id).id.clone(),
            });
        }

        self.node_mut(id).in_progress = true;
        let edges = self.node(id).parents.clone();
        let merged = match self.merge_parents(&edges) {
            Ok(m) => m,
            Err(e) => {
                // Unwind the marker so unrelated compositions are not
                // poisoned; re-linearizing this node hits the cycle again.
                self.node_mut(id).in_progress = false;
                return Err(e);
            }
        };
        self.node_mut(id).in_progress = false;

        let mut result = Vec::with_capacity(merged.len() + 1);
        result.push(LinearEntry {
            node: id,
            binding: Binding::identity(),
        });
        result.extend(merged);
        self.cache_linearization(id, result.clone());
        Ok(result)
    }

    /// Linearize a composing type from its directly declared trait edges.
    ///
    /// The composing type itself is synthetic: it never becomes an ancestor
    /// of anything else and gets no cache entry, so the result contains only
    /// trait ancestors (no self entry).
    pub fn linearize_composed(
        &mut self,
        edges: &[ParentEdge],
    ) -> Result<Vec<LinearEntry>, TraitError> {
        self.merge_parents(edges)
    }

    /// Fold parent chains left to right with the eviction rule.
    ///
    /// For each edge: take the target's full linearization, stamp the direct
    /// edge's binding onto its head entry, evict any already-accumulated
    /// entry whose node reappears in it, then append the whole chain.
    fn merge_parents(&mut self, edges: &[ParentEdge]) -> Result<Vec<LinearEntry>, TraitError> {
        let mut result: Vec<LinearEntry> = Vec::new();
        for edge in edges {
            let mut right = self.linearize(edge.target)?;
            // The direct edge's own argument binding takes precedence over
            // whatever binding the target carried via its own ancestors.
            right[0].binding = edge.binding.clone();
            for i in (0..result.len()).rev() {
                if right.iter().any(|r| r.node == result[i].node) {
                    result.remove(i);
                }
            }
            result.extend(right);
        }
        Ok(result)
    }
}
