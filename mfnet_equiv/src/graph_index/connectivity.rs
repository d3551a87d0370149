use mfnet_common::device::ChannelEdge;
use mfnet_common::Device;

use super::node_registry::{NodeIdx, NodeRegistry};

/// One adjacency entry: the neighbor node plus the edge payload.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'d> {
    /// The node on the other end of the edge.
    pub node: NodeIdx,
    /// The channel edge itself, borrowed from the device graph.
    pub edge: &'d ChannelEdge,
}

/// Fan-in/fan-out adjacency for every node, in device edge insertion order.
#[derive(Debug)]
pub struct Connectivity<'d> {
    fanin: Vec<Vec<Neighbor<'d>>>,
    fanout: Vec<Vec<Neighbor<'d>>>,
    edge_count: usize,
}

impl<'d> Connectivity<'d> {
    /// Builds adjacency from the device graph through the registry.
    pub fn build(device: &'d Device, registry: &NodeRegistry<'d>) -> Self {
        let mut fanin = vec![Vec::new(); registry.len()];
        let mut fanout = vec![Vec::new(); registry.len()];
        let mut edge_count = 0;

        for (_, edge) in device.graph().edges() {
            let source = registry
                .index_of(&edge.source)
                .expect("edge source backed by component arena");
            let sink = registry
                .index_of(&edge.sink)
                .expect("edge sink backed by component arena");
            fanout[source.index()].push(Neighbor { node: sink, edge });
            fanin[sink.index()].push(Neighbor { node: source, edge });
            edge_count += 1;
        }

        Connectivity {
            fanin,
            fanout,
            edge_count,
        }
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// In-edges of a node.
    pub fn fanin(&self, node: NodeIdx) -> &[Neighbor<'d>] {
        &self.fanin[node.index()]
    }

    /// Out-edges of a node.
    pub fn fanout(&self, node: NodeIdx) -> &[Neighbor<'d>] {
        &self.fanout[node.index()]
    }

    /// Parallel-edge multiplicity of the ordered pair `source -> sink`.
    pub fn multiplicity(&self, source: NodeIdx, sink: NodeIdx) -> usize {
        self.fanout[source.index()]
            .iter()
            .filter(|n| n.node == sink)
            .count()
    }
}
