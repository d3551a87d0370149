mod connectivity;
mod node_registry;

pub use connectivity::{Connectivity, Neighbor};
pub use node_registry::{NodeIdx, NodeRegistry};

use mfnet_common::Device;

/// Borrowed structural index over one device's channel graph.
///
/// Maps component IDs to dense [`NodeIdx`] handles and exposes fan-in/
/// fan-out adjacency with edge payloads, so the search never touches
/// string keys on its hot path. Built once per comparison.
#[derive(Debug)]
pub struct GraphIndex<'d> {
    registry: NodeRegistry<'d>,
    connectivity: Connectivity<'d>,
}

impl<'d> GraphIndex<'d> {
    /// Builds the index from a device's current graph.
    pub fn build(device: &'d Device) -> Self {
        let registry = NodeRegistry::build(device);
        let connectivity = Connectivity::build(device, &registry);
        GraphIndex {
            registry,
            connectivity,
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.connectivity.edge_count()
    }

    // Delegate to the node registry

    /// Component ID of a node.
    pub fn component_id(&self, node: NodeIdx) -> &'d str {
        self.registry.component_id(node)
    }

    /// Node handle of a component ID.
    pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
        self.registry.index_of(id)
    }

    /// All node handles in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeIdx> {
        self.registry.indices()
    }

    // Delegate to connectivity

    /// In-edges of a node, in device insertion order.
    pub fn fanin(&self, node: NodeIdx) -> &[Neighbor<'d>] {
        self.connectivity.fanin(node)
    }

    /// Out-edges of a node, in device insertion order.
    pub fn fanout(&self, node: NodeIdx) -> &[Neighbor<'d>] {
        self.connectivity.fanout(node)
    }

    /// Incoming degree.
    pub fn in_degree(&self, node: NodeIdx) -> usize {
        self.connectivity.fanin(node).len()
    }

    /// Outgoing degree.
    pub fn out_degree(&self, node: NodeIdx) -> usize {
        self.connectivity.fanout(node).len()
    }

    /// Parallel-edge multiplicity of the ordered pair `source -> sink`.
    pub fn multiplicity(&self, source: NodeIdx, sink: NodeIdx) -> usize {
        self.connectivity.multiplicity(source, sink)
    }
}
