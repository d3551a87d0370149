//! The device aggregate: arenas, valve maps, and the channel graph.

mod graph;

pub use graph::{ChannelEdge, DeviceGraph, EdgeId};

use std::fmt::Display;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{EntityKind, NetlistError};
use crate::model::{Component, Connection, Feature, Layer, Params};

/// Rest state of a control valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValveType {
    /// Open while unactuated.
    NormallyOpen,
    /// Closed while unactuated.
    NormallyClosed,
}

impl Display for ValveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValveType::NormallyOpen => write!(f, "NORMALLY_OPEN"),
            ValveType::NormallyClosed => write!(f, "NORMALLY_CLOSED"),
        }
    }
}

impl FromStr for ValveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMALLY_OPEN" => Ok(ValveType::NormallyOpen),
            "NORMALLY_CLOSED" => Ok(ValveType::NormallyClosed),
            other => Err(format!("unknown valve type {other:?}")),
        }
    }
}

/// A complete microfluidic chip description.
///
/// The device exclusively owns its components, connections, layers and
/// features in insertion-ordered arenas keyed by ID, plus the derived
/// channel graph and the valve maps. Every mutating operation keeps the
/// arenas, the graph, and the valve maps mutually consistent; integrity
/// violations are rejected before any state changes.
#[derive(Debug, Clone, Default)]
pub struct Device {
    /// Device name.
    pub name: String,
    /// Device-level attribute bag; spans live here.
    pub params: Params,
    components: IndexMap<String, Component>,
    connections: IndexMap<String, Connection>,
    layers: IndexMap<String, Layer>,
    features: IndexMap<String, Feature>,
    valve_map: IndexMap<String, String>,
    valve_type_map: IndexMap<String, ValveType>,
    graph: DeviceGraph,
}

impl Device {
    /// Creates an empty device.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Extent along x, read from the `xspan`/`width`/`x-span` params.
    pub fn xspan(&self) -> Option<i64> {
        ["xspan", "width", "x-span"]
            .iter()
            .find_map(|key| self.params.get_i64(key))
    }

    /// Extent along y, read from the `yspan`/`length`/`y-span` params.
    pub fn yspan(&self) -> Option<i64> {
        ["yspan", "length", "y-span"]
            .iter()
            .find_map(|key| self.params.get_i64(key))
    }

    // ---- layers ----

    /// Adds a layer.
    ///
    /// # Errors
    /// [`NetlistError::DuplicateId`] if the ID is taken.
    pub fn add_layer(&mut self, layer: Layer) -> Result<(), NetlistError> {
        if self.layers.contains_key(&layer.id) {
            return Err(NetlistError::DuplicateId {
                kind: EntityKind::Layer,
                id: layer.id,
            });
        }
        self.layers.insert(layer.id.clone(), layer);
        Ok(())
    }

    /// Removes a layer that nothing references any more.
    ///
    /// # Errors
    /// [`NetlistError::NotFound`] for an unknown ID;
    /// [`NetlistError::StillReferenced`] while any component, connection or
    /// feature still points at the layer.
    pub fn remove_layer(&mut self, id: &str) -> Result<Layer, NetlistError> {
        if !self.layers.contains_key(id) {
            return Err(NetlistError::NotFound {
                kind: EntityKind::Layer,
                id: id.to_string(),
            });
        }
        if let Some(c) = self
            .components
            .values()
            .find(|c| c.layers.iter().any(|l| l == id))
        {
            return Err(NetlistError::StillReferenced {
                kind: EntityKind::Layer,
                id: id.to_string(),
                referrer: format!("component {:?}", c.id),
            });
        }
        if let Some(c) = self
            .connections
            .values()
            .find(|c| c.layer.as_deref() == Some(id))
        {
            return Err(NetlistError::StillReferenced {
                kind: EntityKind::Layer,
                id: id.to_string(),
                referrer: format!("connection {:?}", c.id),
            });
        }
        if let Some(f) = self.features.values().find(|f| f.layer == id) {
            return Err(NetlistError::StillReferenced {
                kind: EntityKind::Layer,
                id: id.to_string(),
                referrer: format!("feature {:?}", f.id),
            });
        }
        Ok(self.layers.shift_remove(id).expect("presence checked above"))
    }

    /// Looks up a layer by ID.
    ///
    /// # Errors
    /// [`NetlistError::NotFound`] if absent.
    pub fn get_layer(&self, id: &str) -> Result<&Layer, NetlistError> {
        self.layers.get(id).ok_or_else(|| NetlistError::NotFound {
            kind: EntityKind::Layer,
            id: id.to_string(),
        })
    }

    /// Layers in insertion order.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    // ---- features ----

    /// Adds a feature; its layer must already exist.
    ///
    /// # Errors
    /// [`NetlistError::DuplicateId`] or [`NetlistError::MissingReference`].
    pub fn add_feature(&mut self, feature: Feature) -> Result<(), NetlistError> {
        if self.features.contains_key(&feature.id) {
            return Err(NetlistError::DuplicateId {
                kind: EntityKind::Feature,
                id: feature.id,
            });
        }
        if !self.layers.contains_key(&feature.layer) {
            return Err(NetlistError::MissingReference {
                referrer: format!("feature {:?}", feature.id),
                kind: EntityKind::Layer,
                id: feature.layer,
            });
        }
        self.features.insert(feature.id.clone(), feature);
        Ok(())
    }

    /// Looks up a feature by ID.
    ///
    /// # Errors
    /// [`NetlistError::NotFound`] if absent.
    pub fn get_feature(&self, id: &str) -> Result<&Feature, NetlistError> {
        self.features.get(id).ok_or_else(|| NetlistError::NotFound {
            kind: EntityKind::Feature,
            id: id.to_string(),
        })
    }

    /// Features in insertion order.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    // ---- components ----

    /// Adds a component and its graph node.
    ///
    /// # Errors
    /// [`NetlistError::DuplicateId`] if the ID is taken;
    /// [`NetlistError::MissingReference`] if a referenced layer is absent.
    pub fn add_component(&mut self, component: Component) -> Result<(), NetlistError> {
        if self.components.contains_key(&component.id) {
            return Err(NetlistError::DuplicateId {
                kind: EntityKind::Component,
                id: component.id,
            });
        }
        for layer in &component.layers {
            if !self.layers.contains_key(layer) {
                return Err(NetlistError::MissingReference {
                    referrer: format!("component {:?}", component.id),
                    kind: EntityKind::Layer,
                    id: layer.clone(),
                });
            }
        }
        self.graph.add_node(component.id.clone());
        self.components.insert(component.id.clone(), component);
        Ok(())
    }

    /// Removes a component nothing references any more.
    ///
    /// # Errors
    /// [`NetlistError::NotFound`] for an unknown ID;
    /// [`NetlistError::StillReferenced`] while a connection endpoint or a
    /// valve mapping still names the component.
    pub fn remove_component(&mut self, id: &str) -> Result<Component, NetlistError> {
        if !self.components.contains_key(id) {
            return Err(NetlistError::NotFound {
                kind: EntityKind::Component,
                id: id.to_string(),
            });
        }
        if let Some(c) = self
            .connections
            .values()
            .find(|c| c.targets().any(|t| t.component == id))
        {
            return Err(NetlistError::StillReferenced {
                kind: EntityKind::Component,
                id: id.to_string(),
                referrer: format!("connection {:?}", c.id),
            });
        }
        if self.valve_map.contains_key(id) {
            return Err(NetlistError::StillReferenced {
                kind: EntityKind::Component,
                id: id.to_string(),
                referrer: "valve map".to_string(),
            });
        }
        self.graph.remove_node(id);
        Ok(self
            .components
            .shift_remove(id)
            .expect("presence checked above"))
    }

    /// Looks up a component by ID.
    ///
    /// # Errors
    /// [`NetlistError::NotFound`] if absent.
    pub fn get_component(&self, id: &str) -> Result<&Component, NetlistError> {
        self.components
            .get(id)
            .ok_or_else(|| NetlistError::NotFound {
                kind: EntityKind::Component,
                id: id.to_string(),
            })
    }

    /// True if a component with the ID exists.
    pub fn component_exists(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// Name of the component with the given ID, if any.
    pub fn get_name_from_id(&self, id: &str) -> Option<&str> {
        self.components.get(id).map(|c| c.name.as_str())
    }

    /// Components in insertion order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Number of components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    // ---- connections ----

    /// Adds a connection and one graph edge per sink.
    ///
    /// Source and sink membership is validated eagerly, before any arena or
    /// graph mutation, so a rejected add leaves the device untouched.
    ///
    /// # Errors
    /// [`NetlistError::DuplicateId`] if the ID is taken;
    /// [`NetlistError::MissingReference`] for an endpoint component or a
    /// layer absent from the device;
    /// [`NetlistError::MissingSource`] for a sink-carrying connection
    /// without a source target.
    pub fn add_connection(&mut self, connection: Connection) -> Result<(), NetlistError> {
        if self.connections.contains_key(&connection.id) {
            return Err(NetlistError::DuplicateId {
                kind: EntityKind::Connection,
                id: connection.id,
            });
        }
        for target in connection.targets() {
            if !self.components.contains_key(&target.component) {
                return Err(NetlistError::MissingReference {
                    referrer: format!("connection {:?}", connection.id),
                    kind: EntityKind::Component,
                    id: target.component.clone(),
                });
            }
        }
        if let Some(layer) = &connection.layer {
            if !self.layers.contains_key(layer) {
                return Err(NetlistError::MissingReference {
                    referrer: format!("connection {:?}", connection.id),
                    kind: EntityKind::Layer,
                    id: layer.clone(),
                });
            }
        }
        if !connection.sinks.is_empty() {
            let source = connection
                .source
                .clone()
                .ok_or_else(|| NetlistError::MissingSource(connection.id.clone()))?;
            for sink in &connection.sinks {
                self.graph.add_edge(ChannelEdge {
                    source: source.component.clone(),
                    sink: sink.component.clone(),
                    source_port: source.clone(),
                    sink_port: sink.clone(),
                    connection: connection.id.clone(),
                });
            }
        }
        debug!(
            connection = %connection.id,
            sinks = connection.sinks.len(),
            "connection added to channel graph"
        );
        self.connections.insert(connection.id.clone(), connection);
        Ok(())
    }

    /// Removes a connection and its graph edges.
    ///
    /// # Errors
    /// [`NetlistError::NotFound`] for an unknown ID;
    /// [`NetlistError::StillReferenced`] while a valve maps onto it.
    pub fn remove_connection(&mut self, id: &str) -> Result<Connection, NetlistError> {
        if !self.connections.contains_key(id) {
            return Err(NetlistError::NotFound {
                kind: EntityKind::Connection,
                id: id.to_string(),
            });
        }
        if let Some((valve, _)) = self.valve_map.iter().find(|(_, conn)| *conn == id) {
            return Err(NetlistError::StillReferenced {
                kind: EntityKind::Connection,
                id: id.to_string(),
                referrer: format!("valve {valve:?}"),
            });
        }
        self.graph.remove_connection_edges(id);
        Ok(self
            .connections
            .shift_remove(id)
            .expect("presence checked above"))
    }

    /// Looks up a connection by ID.
    ///
    /// # Errors
    /// [`NetlistError::NotFound`] if absent.
    pub fn get_connection(&self, id: &str) -> Result<&Connection, NetlistError> {
        self.connections
            .get(id)
            .ok_or_else(|| NetlistError::NotFound {
                kind: EntityKind::Connection,
                id: id.to_string(),
            })
    }

    /// True if a connection with the ID exists.
    pub fn connection_exists(&self, id: &str) -> bool {
        self.connections.contains_key(id)
    }

    /// Connections in insertion order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Number of connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    // ---- valves ----

    /// Records a component as the control valve gating a connection.
    ///
    /// # Errors
    /// [`NetlistError::NotFound`] if either ID does not resolve.
    pub fn map_valve(
        &mut self,
        component: &str,
        connection: &str,
        valve_type: Option<ValveType>,
    ) -> Result<(), NetlistError> {
        if !self.components.contains_key(component) {
            return Err(NetlistError::NotFound {
                kind: EntityKind::Component,
                id: component.to_string(),
            });
        }
        if !self.connections.contains_key(connection) {
            return Err(NetlistError::NotFound {
                kind: EntityKind::Connection,
                id: connection.to_string(),
            });
        }
        self.valve_map
            .insert(component.to_string(), connection.to_string());
        if let Some(vt) = valve_type {
            self.valve_type_map.insert(component.to_string(), vt);
        }
        Ok(())
    }

    /// Updates the rest state of an already-mapped valve.
    ///
    /// # Errors
    /// [`NetlistError::NotAValve`] if the component is not valve-mapped.
    pub fn update_valve_type(
        &mut self,
        component: &str,
        valve_type: ValveType,
    ) -> Result<(), NetlistError> {
        if !self.valve_map.contains_key(component) {
            return Err(NetlistError::NotAValve(component.to_string()));
        }
        self.valve_type_map.insert(component.to_string(), valve_type);
        Ok(())
    }

    /// Removes a valve mapping and its recorded rest state.
    ///
    /// # Errors
    /// [`NetlistError::NotAValve`] if the component is not valve-mapped.
    pub fn unmap_valve(&mut self, component: &str) -> Result<(), NetlistError> {
        if self.valve_map.shift_remove(component).is_none() {
            return Err(NetlistError::NotAValve(component.to_string()));
        }
        self.valve_type_map.shift_remove(component);
        Ok(())
    }

    /// IDs of all valve components, in mapping order.
    pub fn valves(&self) -> impl Iterator<Item = &str> {
        self.valve_map.keys().map(String::as_str)
    }

    /// The connection a valve gates.
    ///
    /// # Errors
    /// [`NetlistError::NotAValve`] if the component is not valve-mapped.
    pub fn valve_connection(&self, component: &str) -> Result<&Connection, NetlistError> {
        let connection = self
            .valve_map
            .get(component)
            .ok_or_else(|| NetlistError::NotAValve(component.to_string()))?;
        self.get_connection(connection)
    }

    /// Rest state of a valve, when recorded.
    pub fn valve_type(&self, component: &str) -> Option<ValveType> {
        self.valve_type_map.get(component).copied()
    }

    /// The raw component → connection valve mapping.
    pub fn valve_map(&self) -> &IndexMap<String, String> {
        &self.valve_map
    }

    /// The raw component → rest-state mapping.
    pub fn valve_type_map(&self) -> &IndexMap<String, ValveType> {
        &self.valve_type_map
    }

    // ---- graph & merging ----

    /// The channel graph, kept in lock-step with the arenas.
    pub fn graph(&self) -> &DeviceGraph {
        &self.graph
    }

    /// Merges another netlist into this one: layers are unified by ID,
    /// components and connections are copied over.
    ///
    /// # Errors
    /// [`NetlistError::DuplicateId`] when a component or connection ID
    /// collides with an existing one.
    pub fn merge_netlist(&mut self, other: &Device) -> Result<(), NetlistError> {
        for layer in other.layers() {
            if !self.layers.contains_key(&layer.id) {
                self.add_layer(layer.clone())?;
            }
        }
        for component in other.components() {
            self.add_component(component.clone())?;
        }
        for connection in other.connections() {
            self.add_connection(connection.clone())?;
        }
        Ok(())
    }
}
