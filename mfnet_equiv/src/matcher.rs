//! The backtracking isomorphism search.
//!
//! VF2-style: a partial injective mapping grows one pair at a time.
//! Candidate B-nodes for the next A-node are narrowed to the intersection
//! of the neighbor sets of already-mapped counterparts, structural
//! feasibility prunes on degrees and parallel-edge multiplicities, and the
//! injected semantic predicate has the final say before the mapping is
//! extended. The first total bijection wins.

use std::collections::HashSet;

use mfnet_common::Device;
use tracing::{debug, info, trace};

use crate::Comparison;
use crate::config::CompareConfig;
use crate::feasibility::{ComponentFeasibility, SemanticFeasibility};
use crate::graph_index::{GraphIndex, NodeIdx};
use crate::state::Bindings;

/// Entry point for device equivalence checks.
pub struct EquivalenceMatcher;

impl EquivalenceMatcher {
    /// Decides whether two devices are equivalent as attributed directed
    /// multigraphs, collecting per-category divergences along the way.
    pub fn compare(device_a: &Device, device_b: &Device, config: &CompareConfig) -> Comparison {
        let index_a = GraphIndex::build(device_a);
        let index_b = GraphIndex::build(device_b);

        info!(
            a_nodes = index_a.node_count(),
            b_nodes = index_b.node_count(),
            a_edges = index_a.edge_count(),
            b_edges = index_b.edge_count(),
            "starting equivalence search"
        );

        // A bijection cannot exist across differing node or edge counts;
        // this is an ordinary negative result, not an error.
        if index_a.node_count() != index_b.node_count()
            || index_a.edge_count() != index_b.edge_count()
        {
            debug!("size mismatch, skipping search");
            return Comparison::default();
        }

        let mut feasibility =
            ComponentFeasibility::new(device_a, device_b, &index_a, &index_b, config);
        let mut search = Search::new(&index_a, &index_b, config.max_steps);
        let is_match = search.run(&mut feasibility);

        info!(
            is_match,
            budget_exhausted = search.budget_exhausted,
            "equivalence search complete"
        );

        Comparison {
            is_match,
            budget_exhausted: search.budget_exhausted,
            report: feasibility.into_report(),
        }
    }

    /// Pure structural search with a caller-supplied predicate, for policies
    /// other than the component one.
    pub fn compare_with<S: SemanticFeasibility>(
        device_a: &Device,
        device_b: &Device,
        max_steps: Option<u64>,
        feasibility: &mut S,
    ) -> bool {
        let index_a = GraphIndex::build(device_a);
        let index_b = GraphIndex::build(device_b);
        if index_a.node_count() != index_b.node_count()
            || index_a.edge_count() != index_b.edge_count()
        {
            return false;
        }
        Search::new(&index_a, &index_b, max_steps).run(feasibility)
    }
}

/// One search run over a fixed pair of indices.
struct Search<'i, 'd> {
    index_a: &'i GraphIndex<'d>,
    index_b: &'i GraphIndex<'d>,
    /// A-side visit order, connectivity-first.
    order: Vec<NodeIdx>,
    steps_left: Option<u64>,
    budget_exhausted: bool,
}

impl<'i, 'd> Search<'i, 'd> {
    fn new(index_a: &'i GraphIndex<'d>, index_b: &'i GraphIndex<'d>, max_steps: Option<u64>) -> Self {
        Search {
            index_a,
            index_b,
            order: visit_order(index_a),
            steps_left: max_steps,
            budget_exhausted: false,
        }
    }

    fn run<S: SemanticFeasibility>(&mut self, feasibility: &mut S) -> bool {
        let mut bindings = Bindings::new();
        self.extend(&mut bindings, 0, feasibility)
    }

    /// Tries to map `order[position..]`; true once the mapping is total.
    fn extend<S: SemanticFeasibility>(
        &mut self,
        bindings: &mut Bindings,
        position: usize,
        feasibility: &mut S,
    ) -> bool {
        let Some(&a) = self.order.get(position) else {
            return true;
        };

        let candidates = self.candidates_for(a, bindings);
        trace!(
            a = self.index_a.component_id(a),
            candidates = candidates.len(),
            "expanding candidate pairs"
        );

        for b in candidates {
            if !self.consume_step() {
                return false;
            }
            if !self.structurally_feasible(a, b, bindings) {
                continue;
            }
            if !feasibility.feasible(a, b, bindings) {
                continue;
            }

            bindings.map(a, b);
            if self.extend(bindings, position + 1, feasibility) {
                return true;
            }
            bindings.unmap(a, b);
            trace!(
                a = self.index_a.component_id(a),
                b = self.index_b.component_id(b),
                "backtracking"
            );
        }
        false
    }

    fn consume_step(&mut self) -> bool {
        match &mut self.steps_left {
            None => true,
            Some(0) => {
                self.budget_exhausted = true;
                false
            }
            Some(n) => {
                *n -= 1;
                true
            }
        }
    }

    /// Candidate B-nodes for an A-node: the intersection of the B-side
    /// neighbor sets of already-mapped neighbors when any exist, otherwise
    /// every unmapped B-node.
    fn candidates_for(&self, a: NodeIdx, bindings: &Bindings) -> Vec<NodeIdx> {
        let mut constraint: Option<HashSet<NodeIdx>> = None;

        for neighbor in self.index_a.fanin(a) {
            if let Some(pred_b) = bindings.b_for(neighbor.node) {
                let fanout: HashSet<NodeIdx> =
                    self.index_b.fanout(pred_b).iter().map(|n| n.node).collect();
                constraint = Some(intersect(constraint, fanout));
            }
        }
        for neighbor in self.index_a.fanout(a) {
            if let Some(succ_b) = bindings.b_for(neighbor.node) {
                let fanin: HashSet<NodeIdx> =
                    self.index_b.fanin(succ_b).iter().map(|n| n.node).collect();
                constraint = Some(intersect(constraint, fanin));
            }
        }

        let mut candidates = match constraint {
            Some(set) => {
                let mut candidates: Vec<NodeIdx> =
                    set.into_iter().filter(|b| !bindings.is_mapped_b(*b)).collect();
                candidates.sort_unstable();
                candidates
            }
            None => self
                .index_b
                .nodes()
                .filter(|b| !bindings.is_mapped_b(*b))
                .collect(),
        };

        // Try an identically-named candidate first; a self-comparison then
        // walks straight to the identity mapping instead of collecting
        // rejected-pair diffs on the way.
        if let Some(twin) = self.index_b.index_of(self.index_a.component_id(a)) {
            if let Some(position) = candidates.iter().position(|&b| b == twin) {
                let twin = candidates.remove(position);
                candidates.insert(0, twin);
            }
        }
        candidates
    }

    /// Degree parity plus adjacency/multiplicity consistency with the
    /// mapping built so far, in both directions.
    fn structurally_feasible(&self, a: NodeIdx, b: NodeIdx, bindings: &Bindings) -> bool {
        if self.index_a.in_degree(a) != self.index_b.in_degree(b)
            || self.index_a.out_degree(a) != self.index_b.out_degree(b)
        {
            return false;
        }

        // Self-loops never show up as mapped neighbors, so compare them directly.
        if self.index_a.multiplicity(a, a) != self.index_b.multiplicity(b, b) {
            return false;
        }

        for neighbor in self.index_a.fanin(a) {
            if let Some(pred_b) = bindings.b_for(neighbor.node) {
                if self.index_a.multiplicity(neighbor.node, a)
                    != self.index_b.multiplicity(pred_b, b)
                {
                    return false;
                }
            }
        }
        for neighbor in self.index_a.fanout(a) {
            if let Some(succ_b) = bindings.b_for(neighbor.node) {
                if self.index_a.multiplicity(a, neighbor.node)
                    != self.index_b.multiplicity(b, succ_b)
                {
                    return false;
                }
            }
        }
        for neighbor in self.index_b.fanin(b) {
            if let Some(pred_a) = bindings.a_for(neighbor.node) {
                if self.index_b.multiplicity(neighbor.node, b)
                    != self.index_a.multiplicity(pred_a, a)
                {
                    return false;
                }
            }
        }
        for neighbor in self.index_b.fanout(b) {
            if let Some(succ_a) = bindings.a_for(neighbor.node) {
                if self.index_b.multiplicity(b, neighbor.node)
                    != self.index_a.multiplicity(a, succ_a)
                {
                    return false;
                }
            }
        }
        true
    }
}

fn intersect(acc: Option<HashSet<NodeIdx>>, set: HashSet<NodeIdx>) -> HashSet<NodeIdx> {
    match acc {
        None => set,
        Some(acc) => &acc & &set,
    }
}

/// Connectivity-first visit order: BFS over the A graph (edges taken as
/// undirected) so each node after the first tends to touch already-mapped
/// neighbors; disconnected remainders restart the frontier in insertion
/// order.
fn visit_order(index: &GraphIndex<'_>) -> Vec<NodeIdx> {
    let mut order = Vec::with_capacity(index.node_count());
    let mut visited: HashSet<NodeIdx> = HashSet::new();
    let mut queue = std::collections::VecDeque::new();

    for start in index.nodes() {
        if visited.contains(&start) {
            continue;
        }
        visited.insert(start);
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            order.push(node);
            let neighbors = index
                .fanout(node)
                .iter()
                .chain(index.fanin(node).iter())
                .map(|n| n.node);
            for next in neighbors {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    order
}
