//! The semantic half of the search: attribute-aware feasibility for a
//! candidate node pair, decoupled from the structural algorithm.

use std::collections::HashSet;

use mfnet_common::Device;
use tracing::trace;

use crate::config::CompareConfig;
use crate::graph_index::{GraphIndex, NodeIdx};
use crate::report::ComparisonReport;
use crate::state::Bindings;

/// Attribute-aware acceptance policy for candidate pairs.
///
/// Injected into the structural search as a strategy object; the search
/// calls it once per structurally-plausible pair and backtracks on `false`.
pub trait SemanticFeasibility {
    /// Whether mapping `a` onto `b` is semantically acceptable given the
    /// partial mapping built so far.
    fn feasible(&mut self, a: NodeIdx, b: NodeIdx, bindings: &Bindings) -> bool;
}

/// Accepts every pair; turns the search into pure structural isomorphism.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFeasible;

impl SemanticFeasibility for AlwaysFeasible {
    fn feasible(&mut self, _a: NodeIdx, _b: NodeIdx, _bindings: &Bindings) -> bool {
        true
    }
}

/// The production predicate: compares edge endpoints, layers, params and
/// ports of the two candidate components.
///
/// Checks never short-circuit the diagnostics: every category is examined
/// and every divergence recorded even after the pair is already known to be
/// infeasible, so one call yields a complete diff for the pair.
pub struct ComponentFeasibility<'d, 'i> {
    device_a: &'d Device,
    device_b: &'d Device,
    index_a: &'i GraphIndex<'d>,
    index_b: &'i GraphIndex<'d>,
    compare_params: bool,
    check_connection_target: bool,
    report: ComparisonReport,
}

impl<'d, 'i> ComponentFeasibility<'d, 'i> {
    /// Creates the predicate over two devices and their indices.
    pub fn new(
        device_a: &'d Device,
        device_b: &'d Device,
        index_a: &'i GraphIndex<'d>,
        index_b: &'i GraphIndex<'d>,
        config: &CompareConfig,
    ) -> Self {
        Self {
            device_a,
            device_b,
            index_a,
            index_b,
            compare_params: config.compare_params,
            check_connection_target: config.check_connection_target,
            report: ComparisonReport::default(),
        }
    }

    /// Consumes the predicate, yielding the accumulated diff.
    pub fn into_report(self) -> ComparisonReport {
        self.report
    }

    /// Compares the endpoints of a's in-edges whose sources are already
    /// mapped against the corresponding in-edges of b.
    ///
    /// Out-edges are deliberately not walked symmetrically: the sink half
    /// of every compared in-edge already lands in the out-edges diff list,
    /// and a symmetric walk would re-report each edge from its other end.
    fn endpoints_feasible(&mut self, a: NodeIdx, b: NodeIdx, bindings: &Bindings) -> bool {
        let mut feasible = true;
        let mut seen: HashSet<NodeIdx> = HashSet::new();

        for neighbor in self.index_a.fanin(a) {
            if !seen.insert(neighbor.node) {
                continue;
            }
            let Some(pred_b) = bindings.b_for(neighbor.node) else {
                continue;
            };

            let edges_a = self
                .index_a
                .fanin(a)
                .iter()
                .filter(|n| n.node == neighbor.node);
            let edges_b = self
                .index_b
                .fanin(b)
                .iter()
                .filter(|n| n.node == pred_b);

            for (edge_a, edge_b) in edges_a.zip(edges_b) {
                if edge_a.edge.source_port != edge_b.edge.source_port {
                    trace!(a = %edge_a.edge.source_port, b = %edge_b.edge.source_port, "source port mismatch");
                    self.report.record_in_edge(
                        edge_a.edge.source_port.clone(),
                        edge_b.edge.source_port.clone(),
                    );
                    if self.check_connection_target {
                        feasible = false;
                    }
                }
                if edge_a.edge.sink_port != edge_b.edge.sink_port {
                    trace!(a = %edge_a.edge.sink_port, b = %edge_b.edge.sink_port, "sink port mismatch");
                    self.report.record_out_edge(
                        edge_a.edge.sink_port.clone(),
                        edge_b.edge.sink_port.clone(),
                    );
                    if self.check_connection_target {
                        feasible = false;
                    }
                }
            }
        }
        feasible
    }
}

impl SemanticFeasibility for ComponentFeasibility<'_, '_> {
    fn feasible(&mut self, a: NodeIdx, b: NodeIdx, bindings: &Bindings) -> bool {
        let component_a = self
            .device_a
            .get_component(self.index_a.component_id(a))
            .expect("graph node backed by component arena");
        let component_b = self
            .device_b
            .get_component(self.index_b.component_id(b))
            .expect("graph node backed by component arena");

        let mut feasible = self.endpoints_feasible(a, b, bindings);

        if component_a.layers != component_b.layers {
            trace!(a = %component_a.id, b = %component_b.id, "layer mismatch");
            self.report
                .record_layers(component_a.layers.clone(), component_b.layers.clone());
            feasible = false;
        }

        if component_a.params != component_b.params {
            trace!(a = %component_a.id, b = %component_b.id, "param mismatch");
            self.report
                .record_params(component_a.params.clone(), component_b.params.clone());
            if self.compare_params {
                feasible = false;
            }
        }

        if component_a.ports != component_b.ports {
            trace!(a = %component_a.id, b = %component_b.id, "port mismatch");
            self.report
                .record_ports(component_a.ports.clone(), component_b.ports.clone());
            feasible = false;
        }

        // `entity` is intentionally absent from these checks: the category
        // string is cosmetic, equivalence is decided by topology, ports,
        // layers and (optionally) params.
        feasible
    }
}
