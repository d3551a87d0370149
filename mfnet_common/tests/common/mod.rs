#![allow(missing_docs)]
#![allow(dead_code)]
#![allow(clippy::missing_docs_in_private_items)]

use mfnet_common::{
    Component, Connection, ConnectionPath, Device, Feature, Layer, Params, Port, Target, ValveType,
};
use serde_json::json;

pub fn sample_params() -> Params {
    [
        ("channelWidth".to_string(), json!(1000)),
        ("rotation".to_string(), json!(25)),
        ("position".to_string(), json!([250, 300])),
        ("direction".to_string(), json!("UP")),
    ]
    .into_iter()
    .collect()
}

pub fn flow_layer() -> Layer {
    Layer::new("FLOW_1", "flow_1", "FLOW", "", sample_params())
}

pub fn control_layer() -> Layer {
    Layer::new("CONTROL_1", "control_1", "CONTROL", "", Params::new())
}

pub fn mixer(id: &str) -> Component {
    Component::new(
        id,
        id,
        "MIXER",
        1000,
        5000,
        vec![
            Port::new("1", 0, 0, "FLOW_1"),
            Port::new("2", 1000, 0, "FLOW_1"),
        ],
        vec!["FLOW_1".to_string()],
        sample_params(),
    )
}

pub fn terminal(id: &str) -> Component {
    Component::new(
        id,
        id,
        "PORT",
        100,
        100,
        vec![Port::new("1", 0, 0, "FLOW_1")],
        vec!["FLOW_1".to_string()],
        sample_params(),
    )
}

pub fn valve(id: &str) -> Component {
    Component::new(
        id,
        id,
        "VALVE",
        1000,
        5000,
        vec![Port::new("1", 0, 0, "CONTROL_1")],
        vec!["CONTROL_1".to_string()],
        sample_params(),
    )
}

pub fn channel(id: &str, source: Target, sinks: Vec<Target>) -> Connection {
    Connection::new(
        id,
        id,
        "CHANNEL",
        Some(source),
        sinks,
        Some("FLOW_1".to_string()),
        sample_params(),
        Vec::new(),
    )
}

pub fn sample_feature() -> Feature {
    Feature::new("feat1", "UNION", "TYPE1", "FLOW_1", sample_params())
}

/// in1 -> mix1 -> out1 with one valve gating the second channel.
pub fn sample_device() -> Device {
    let mut device = Device::new("dev1");
    device.params = [
        ("x-span".to_string(), json!(100_000)),
        ("y-span".to_string(), json!(50_000)),
    ]
    .into_iter()
    .collect();

    device.add_layer(flow_layer()).expect("layer");
    device.add_layer(control_layer()).expect("layer");
    device.add_feature(sample_feature()).expect("feature");

    device.add_component(terminal("in1")).expect("component");
    device.add_component(mixer("mix1")).expect("component");
    device.add_component(terminal("out1")).expect("component");
    device.add_component(valve("v1")).expect("component");

    device
        .add_connection(channel(
            "con1",
            Target::new("in1", "1"),
            vec![Target::new("mix1", "1")],
        ))
        .expect("connection");

    let mut con2 = channel(
        "con2",
        Target::new("mix1", "2"),
        vec![Target::new("out1", "1")],
    );
    con2.add_path(ConnectionPath::new(
        Some(Target::new("mix1", "2")),
        Some(Target::new("out1", "1")),
        vec![(10, 10), (20, 20), (30, 30)],
        vec!["feat1".to_string()],
    ))
    .expect("path");
    device.add_connection(con2).expect("connection");

    device
        .map_valve("v1", "con2", Some(ValveType::NormallyOpen))
        .expect("valve");

    device
}
