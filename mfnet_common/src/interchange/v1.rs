//! Version 1.0/1.1 dialect: valve info as parallel `valveMap` and
//! `valveTypeMap` dictionaries keyed by component ID; no feature section.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::device::{Device, ValveType};
use crate::interchange::InterchangeError;
use crate::model::{Component, Connection, ConnectionPath, Layer, Params, Port, Target};

/// Top-level document shape.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct DeviceDoc {
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentDoc>,
    #[serde(default)]
    pub connections: Vec<ConnectionDoc>,
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub layers: Vec<LayerDoc>,
    #[serde(rename = "valveMap", default, skip_serializing_if = "IndexMap::is_empty")]
    pub valve_map: IndexMap<String, String>,
    #[serde(
        rename = "valveTypeMap",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub valve_type_map: IndexMap<String, String>,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct LayerDoc {
    pub name: String,
    pub id: String,
    #[serde(rename = "type")]
    pub layer_type: String,
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub group: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ComponentDoc {
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub layers: Vec<String>,
    #[serde(default)]
    pub params: Params,
    #[serde(default)]
    pub ports: Vec<Port>,
    pub entity: String,
    #[serde(rename = "x-span")]
    pub xspan: i64,
    #[serde(rename = "y-span")]
    pub yspan: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ConnectionDoc {
    #[serde(default)]
    pub sinks: Vec<Target>,
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub source: Option<Target>,
    #[serde(default)]
    pub params: Params,
    pub layer: Option<String>,
    #[serde(default)]
    pub paths: Vec<PathDoc>,
    /// Legacy pre-path routing field; read but never written back.
    #[serde(default, skip_serializing)]
    pub waypoints: Option<Vec<(i64, i64)>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PathDoc {
    pub source: Option<Target>,
    pub sink: Option<Target>,
    #[serde(rename = "wayPoints", default)]
    pub waypoints: Vec<(i64, i64)>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Parses a version 1.0/1.1 document into a device.
///
/// # Errors
/// [`InterchangeError`] on missing required fields or integrity violations.
pub fn device_from_value(doc: &Value) -> Result<Device, InterchangeError> {
    let doc: DeviceDoc = serde_json::from_value(doc.clone())?;
    let mut device = Device::new(doc.name);
    device.params = doc.params;

    for layer in doc.layers {
        device.add_layer(layer_from_doc(layer))?;
    }
    for component in doc.components {
        device.add_component(component_from_doc(component))?;
    }
    for connection in doc.connections {
        device.add_connection(connection_from_doc(connection))?;
    }
    apply_valve_maps(&mut device, &doc.valve_map, &doc.valve_type_map)?;

    Ok(device)
}

/// Serializes a device into a version 1.0 document.
///
/// # Errors
/// [`InterchangeError::Json`] if value conversion fails.
pub fn device_to_value(device: &Device) -> Result<Value, InterchangeError> {
    let doc = DeviceDoc {
        name: device.name.clone(),
        components: device.components().map(component_to_doc).collect(),
        connections: device.connections().map(connection_to_doc).collect(),
        params: device.params.clone(),
        layers: device.layers().map(layer_to_doc).collect(),
        valve_map: device.valve_map().clone(),
        valve_type_map: device
            .valve_type_map()
            .iter()
            .map(|(id, vt)| (id.clone(), vt.to_string()))
            .collect(),
        version: "1.0".to_string(),
    };
    Ok(serde_json::to_value(doc)?)
}

pub(super) fn layer_from_doc(doc: LayerDoc) -> Layer {
    Layer::new(doc.id, doc.name, doc.layer_type, doc.group, doc.params)
}

pub(super) fn layer_to_doc(layer: &Layer) -> LayerDoc {
    LayerDoc {
        name: layer.name.clone(),
        id: layer.id.clone(),
        layer_type: layer.layer_type.clone(),
        params: layer.params.clone(),
        group: layer.group.clone(),
    }
}

pub(super) fn component_from_doc(doc: ComponentDoc) -> Component {
    Component::new(
        doc.id, doc.name, doc.entity, doc.xspan, doc.yspan, doc.ports, doc.layers, doc.params,
    )
}

pub(super) fn component_to_doc(component: &Component) -> ComponentDoc {
    ComponentDoc {
        name: component.name.clone(),
        id: component.id.clone(),
        layers: component.layers.clone(),
        params: component.params.clone(),
        ports: component.ports.clone(),
        entity: component.entity.clone(),
        xspan: component.xspan,
        yspan: component.yspan,
    }
}

pub(super) fn path_from_doc(doc: PathDoc) -> ConnectionPath {
    ConnectionPath::new(doc.source, doc.sink, doc.waypoints, doc.features)
}

pub(super) fn path_to_doc(path: &ConnectionPath) -> PathDoc {
    PathDoc {
        source: path.source.clone(),
        sink: path.sink.clone(),
        waypoints: path.waypoints.clone(),
        features: path.features.clone(),
    }
}

fn connection_from_doc(doc: ConnectionDoc) -> Connection {
    if doc.sinks.is_empty() {
        warn!(connection = %doc.name, "connection does not have any sinks");
    }
    let mut connection = Connection::new(
        doc.id,
        doc.name,
        String::new(),
        doc.source,
        doc.sinks,
        doc.layer,
        doc.params,
        doc.paths.into_iter().map(path_from_doc).collect(),
    );
    if let Some(waypoints) = doc.waypoints {
        connection.add_waypoints_path(None, None, waypoints);
    }
    connection
}

fn connection_to_doc(connection: &Connection) -> ConnectionDoc {
    ConnectionDoc {
        sinks: connection.sinks.clone(),
        name: connection.name.clone(),
        id: connection.id.clone(),
        source: connection.source.clone(),
        params: connection.params.clone(),
        layer: connection.layer.clone(),
        paths: connection.paths.iter().map(path_to_doc).collect(),
        waypoints: None,
    }
}

pub(super) fn apply_valve_maps(
    device: &mut Device,
    valve_map: &IndexMap<String, String>,
    valve_type_map: &IndexMap<String, String>,
) -> Result<(), InterchangeError> {
    for (component, connection) in valve_map {
        device.map_valve(component, connection, None)?;
    }
    for (component, valve_type) in valve_type_map {
        let parsed: ValveType = valve_type
            .parse()
            .map_err(InterchangeError::Malformed)?;
        device.update_valve_type(component, parsed)?;
    }
    Ok(())
}
