use std::collections::HashMap;

use mfnet_common::Device;

/// Dense handle for one node of an indexed graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(u32);

impl NodeIdx {
    /// Wraps a dense index.
    pub fn new(index: usize) -> Self {
        NodeIdx(u32::try_from(index).expect("node count exceeds u32"))
    }

    /// The dense index.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Component ID ↔ dense index mapping, in device insertion order.
#[derive(Debug)]
pub struct NodeRegistry<'d> {
    nodes: Vec<&'d str>,
    id_map: HashMap<&'d str, NodeIdx>,
}

impl<'d> NodeRegistry<'d> {
    /// Builds the registry from a device's graph nodes.
    pub fn build(device: &'d Device) -> Self {
        let nodes: Vec<&'d str> = device.graph().nodes().collect();
        let id_map = nodes
            .iter()
            .enumerate()
            .map(|(idx, id)| (*id, NodeIdx::new(idx)))
            .collect();
        NodeRegistry { nodes, id_map }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the registry has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Component ID backing a handle.
    pub fn component_id(&self, node: NodeIdx) -> &'d str {
        self.nodes[node.index()]
    }

    /// Handle for a component ID.
    pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
        self.id_map.get(id).copied()
    }

    /// All handles in insertion order.
    pub fn indices(&self) -> impl Iterator<Item = NodeIdx> {
        (0..self.nodes.len()).map(NodeIdx::new)
    }
}
