use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::model::Target;

/// Handle to one edge of the channel graph.
pub type EdgeId = u64;

/// One directed edge of the channel graph: a single (source port, sink port)
/// pair of a connection. A connection with several sinks contributes one
/// edge per sink, and several connections between the same components show
/// up as parallel edges distinguished by `connection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEdge {
    /// Component ID the edge leaves.
    pub source: String,
    /// Component ID the edge enters.
    pub sink: String,
    /// Source endpoint (component ID, port label).
    pub source_port: Target,
    /// Sink endpoint (component ID, port label).
    pub sink_port: Target,
    /// ID of the owning connection.
    pub connection: String,
}

/// Directed multigraph over component IDs, owned by the device and kept in
/// lock-step with its component/connection arenas.
///
/// Maintenance is incremental: adds and removes touch only the affected
/// node/edge entries, so no comparison ever pays for a full rebuild.
#[derive(Debug, Clone, Default)]
pub struct DeviceGraph {
    nodes: IndexSet<String>,
    edges: IndexMap<EdgeId, ChannelEdge>,
    out_adjacency: HashMap<String, Vec<EdgeId>>,
    in_adjacency: HashMap<String, Vec<EdgeId>>,
    next_edge: EdgeId,
}

impl DeviceGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node; returns false if it was already present.
    pub(crate) fn add_node(&mut self, id: impl Into<String>) -> bool {
        self.nodes.insert(id.into())
    }

    /// Removes a node. The caller guarantees no incident edges remain.
    pub(crate) fn remove_node(&mut self, id: &str) {
        debug_assert_eq!(self.in_degree(id), 0);
        debug_assert_eq!(self.out_degree(id), 0);
        self.nodes.shift_remove(id);
        self.out_adjacency.remove(id);
        self.in_adjacency.remove(id);
    }

    /// Inserts an edge and returns its handle.
    pub(crate) fn add_edge(&mut self, edge: ChannelEdge) -> EdgeId {
        let id = self.next_edge;
        self.next_edge += 1;
        self.out_adjacency
            .entry(edge.source.clone())
            .or_default()
            .push(id);
        self.in_adjacency
            .entry(edge.sink.clone())
            .or_default()
            .push(id);
        self.edges.insert(id, edge);
        id
    }

    /// Drops every edge owned by `connection`.
    pub(crate) fn remove_connection_edges(&mut self, connection: &str) {
        let doomed: Vec<EdgeId> = self
            .edges
            .iter()
            .filter(|(_, e)| e.connection == connection)
            .map(|(id, _)| *id)
            .collect();
        for id in &doomed {
            if let Some(edge) = self.edges.shift_remove(id) {
                if let Some(out) = self.out_adjacency.get_mut(&edge.source) {
                    out.retain(|e| e != id);
                }
                if let Some(inc) = self.in_adjacency.get_mut(&edge.sink) {
                    inc.retain(|e| e != id);
                }
            }
        }
    }

    /// True if the node exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edge payload lookup.
    pub fn edge(&self, id: EdgeId) -> Option<&ChannelEdge> {
        self.edges.get(&id)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &ChannelEdge)> {
        self.edges.iter().map(|(id, e)| (*id, e))
    }

    /// Outgoing edges of a node in insertion order.
    pub fn out_edges(&self, id: &str) -> impl Iterator<Item = (EdgeId, &ChannelEdge)> {
        self.adjacency_iter(&self.out_adjacency, id)
    }

    /// Incoming edges of a node in insertion order.
    pub fn in_edges(&self, id: &str) -> impl Iterator<Item = (EdgeId, &ChannelEdge)> {
        self.adjacency_iter(&self.in_adjacency, id)
    }

    /// Number of outgoing edges.
    pub fn out_degree(&self, id: &str) -> usize {
        self.out_adjacency.get(id).map_or(0, Vec::len)
    }

    /// Number of incoming edges.
    pub fn in_degree(&self, id: &str) -> usize {
        self.in_adjacency.get(id).map_or(0, Vec::len)
    }

    /// Parallel-edge multiplicity between an ordered node pair.
    pub fn edge_count_between(&self, source: &str, sink: &str) -> usize {
        self.out_edges(source).filter(|(_, e)| e.sink == sink).count()
    }

    fn adjacency_iter<'a>(
        &'a self,
        adjacency: &'a HashMap<String, Vec<EdgeId>>,
        id: &str,
    ) -> impl Iterator<Item = (EdgeId, &'a ChannelEdge)> {
        adjacency
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|eid| self.edges.get(eid).map(|e| (*eid, e)))
    }
}
