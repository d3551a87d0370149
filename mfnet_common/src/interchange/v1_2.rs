//! Version 1.2 dialect: adds `features[]`, a `valves[]` section, and the
//! `entity` field on connections.
//!
//! Components, layers and paths are shared with [`super::v1`]; only the
//! shapes that changed between dialects live here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::device::Device;
use crate::interchange::v1::{
    ComponentDoc, LayerDoc, PathDoc, component_from_doc, component_to_doc, layer_from_doc,
    layer_to_doc, path_from_doc, path_to_doc,
};
use crate::interchange::InterchangeError;
use crate::model::{Connection, Feature, Params, Target};

/// Top-level document shape.
#[derive(Debug, Serialize, Deserialize)]
struct DeviceDoc {
    name: String,
    #[serde(default)]
    components: Vec<ComponentDoc>,
    #[serde(default)]
    connections: Vec<ConnectionDoc>,
    #[serde(default)]
    features: Vec<FeatureDoc>,
    #[serde(default)]
    params: Params,
    #[serde(default)]
    layers: Vec<LayerDoc>,
    #[serde(default)]
    valves: Vec<ValveDoc>,
    version: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConnectionDoc {
    #[serde(default)]
    sinks: Vec<Target>,
    name: String,
    id: String,
    #[serde(default)]
    source: Option<Target>,
    #[serde(default)]
    params: Params,
    layer: Option<String>,
    #[serde(default)]
    paths: Vec<PathDoc>,
    entity: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct FeatureDoc {
    id: String,
    #[serde(rename = "type")]
    feature_type: String,
    #[serde(rename = "macro")]
    macro_name: String,
    #[serde(rename = "layerID")]
    layer: String,
    #[serde(default)]
    params: Params,
}

#[derive(Debug, Serialize, Deserialize)]
struct ValveDoc {
    componentid: String,
    connectionid: String,
    #[serde(rename = "type")]
    valve_type: Option<String>,
}

/// Parses a version 1.2 document into a device.
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
    for feature in doc.features {
        device.add_feature(feature_from_doc(feature))?;
    }
    for component in doc.components {
        device.add_component(component_from_doc(component))?;
    }
    for connection in doc.connections {
        device.add_connection(connection_from_doc(connection))?;
    }
    for valve in doc.valves {
        let valve_type = valve
            .valve_type
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(InterchangeError::Malformed)?;
        device.map_valve(&valve.componentid, &valve.connectionid, valve_type)?;
    }

    Ok(device)
}

/// Serializes a device into a version 1.2 document.
///
/// # Errors
/// [`InterchangeError::Json`] if value conversion fails.
pub fn device_to_value(device: &Device) -> Result<Value, InterchangeError> {
    let doc = DeviceDoc {
        name: device.name.clone(),
        components: device.components().map(component_to_doc).collect(),
        connections: device.connections().map(connection_to_doc).collect(),
        features: device.features().map(feature_to_doc).collect(),
        params: device.params.clone(),
        layers: device.layers().map(layer_to_doc).collect(),
        valves: device
            .valve_map()
            .iter()
            .map(|(component, connection)| ValveDoc {
                componentid: component.clone(),
                connectionid: connection.clone(),
                valve_type: device.valve_type(component).map(|vt| vt.to_string()),
            })
            .collect(),
        version: "1.2".to_string(),
    };
    Ok(serde_json::to_value(doc)?)
}

fn feature_from_doc(doc: FeatureDoc) -> Feature {
    Feature::new(doc.id, doc.feature_type, doc.macro_name, doc.layer, doc.params)
}

fn feature_to_doc(feature: &Feature) -> FeatureDoc {
    FeatureDoc {
        id: feature.id.clone(),
        feature_type: feature.feature_type.clone(),
        macro_name: feature.macro_name.clone(),
        layer: feature.layer.clone(),
        params: feature.params.clone(),
    }
}

fn connection_from_doc(doc: ConnectionDoc) -> Connection {
    if doc.sinks.is_empty() {
        warn!(connection = %doc.name, "connection does not have any sinks");
    }
    Connection::new(
        doc.id,
        doc.name,
        doc.entity,
        doc.source,
        doc.sinks,
        doc.layer,
        doc.params,
        doc.paths.into_iter().map(path_from_doc).collect(),
    )
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
        entity: connection.entity.clone(),
    }
}
