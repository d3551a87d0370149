use std::collections::HashMap;

use crate::graph_index::NodeIdx;

/// Partial injective mapping between A-nodes and B-nodes.
///
/// Both directions are materialized so membership checks are O(1) on either
/// side; map/unmap keep the two sides in lock-step during backtracking.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    a_to_b: HashMap<NodeIdx, NodeIdx>,
    b_to_a: HashMap<NodeIdx, NodeIdx>,
}

impl Bindings {
    /// Creates an empty mapping.
    #[contracts::debug_ensures(ret.is_empty())]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mapped pairs.
    #[contracts::debug_requires(self.a_to_b.len() == self.b_to_a.len())]
    pub fn len(&self) -> usize {
        self.a_to_b.len()
    }

    /// True if nothing is mapped yet.
    #[contracts::debug_requires(self.a_to_b.len() == self.b_to_a.len())]
    pub fn is_empty(&self) -> bool {
        self.a_to_b.is_empty()
    }

    /// True if the A-node is mapped.
    pub fn is_mapped_a(&self, a: NodeIdx) -> bool {
        self.a_to_b.contains_key(&a)
    }

    /// True if the B-node is used by the mapping.
    pub fn is_mapped_b(&self, b: NodeIdx) -> bool {
        self.b_to_a.contains_key(&b)
    }

    /// The B-node an A-node maps to, if any.
    pub fn b_for(&self, a: NodeIdx) -> Option<NodeIdx> {
        self.a_to_b.get(&a).copied()
    }

    /// The A-node a B-node is mapped from, if any.
    pub fn a_for(&self, b: NodeIdx) -> Option<NodeIdx> {
        self.b_to_a.get(&b).copied()
    }

    /// Extends the mapping with a fresh pair.
    #[contracts::debug_requires(!self.is_mapped_a(a))]
    #[contracts::debug_requires(!self.is_mapped_b(b))]
    #[contracts::debug_ensures(self.b_for(a) == Some(b) && self.a_for(b) == Some(a))]
    pub fn map(&mut self, a: NodeIdx, b: NodeIdx) {
        self.a_to_b.insert(a, b);
        self.b_to_a.insert(b, a);
    }

    /// Retracts a pair on backtrack.
    #[contracts::debug_requires(self.b_for(a) == Some(b))]
    #[contracts::debug_ensures(!self.is_mapped_a(a) && !self.is_mapped_b(b))]
    pub fn unmap(&mut self, a: NodeIdx, b: NodeIdx) {
        self.a_to_b.remove(&a);
        self.b_to_a.remove(&b);
    }

    /// Mapped pairs in arbitrary order.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeIdx, NodeIdx)> {
        self.a_to_b.iter().map(|(&a, &b)| (a, b))
    }
}
