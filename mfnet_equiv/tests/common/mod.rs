#![allow(missing_docs)]
#![allow(dead_code)]
#![allow(clippy::missing_docs_in_private_items)]

use std::sync::OnceLock;

use mfnet_common::{Component, Connection, Device, Layer, Params, Port, Target};
use serde_json::json;

pub fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn flow_layer() -> Layer {
    Layer::new("FLOW_1", "flow_1", "FLOW", "", Params::new())
}

pub fn endpoint(id: &str) -> Component {
    Component::new(
        id,
        id,
        "PORT",
        100,
        100,
        vec![Port::new("1", 0, 0, "FLOW_1")],
        vec!["FLOW_1".to_string()],
        Params::new(),
    )
}

pub fn mixer_with(id: &str, entity: &str, params: Params, port_count: usize) -> Component {
    let ports = (0..port_count)
        .map(|i| Port::new((i + 1).to_string(), (i as i64) * 1000, 0, "FLOW_1"))
        .collect();
    Component::new(
        id,
        id,
        entity,
        1000,
        5000,
        ports,
        vec!["FLOW_1".to_string()],
        params,
    )
}

pub fn mixer(id: &str) -> Component {
    mixer_with(id, "MIXER", default_mixer_params(), 2)
}

pub fn default_mixer_params() -> Params {
    [("channelWidth".to_string(), json!(1000))]
        .into_iter()
        .collect()
}

pub fn link(id: &str, source: Target, sinks: Vec<Target>) -> Connection {
    Connection::new(
        id,
        id,
        "CHANNEL",
        Some(source),
        sinks,
        Some("FLOW_1".to_string()),
        Params::new(),
        Vec::new(),
    )
}

/// `in -> mix -> out` with the given component IDs and a custom mixer.
pub fn linear_device_with(name: &str, ids: [&str; 3], mix: Component) -> Device {
    let [in_id, mix_id, out_id] = ids;
    let mut device = Device::new(name);
    device.add_layer(flow_layer()).expect("layer");
    device.add_component(endpoint(in_id)).expect("component");
    device.add_component(mix).expect("component");
    device.add_component(endpoint(out_id)).expect("component");
    device
        .add_connection(link(
            &format!("{name}_con1"),
            Target::new(in_id, "1"),
            vec![Target::new(mix_id, "1")],
        ))
        .expect("connection");
    device
        .add_connection(link(
            &format!("{name}_con2"),
            Target::new(mix_id, "2"),
            vec![Target::new(out_id, "1")],
        ))
        .expect("connection");
    device
}

/// `in -> mix -> out` with default mixer attributes.
pub fn linear_device(name: &str, ids: [&str; 3]) -> Device {
    linear_device_with(name, ids, mixer(ids[1]))
}

/// One source fanning out to two sinks through a single connection.
pub fn fanout_device(name: &str, ids: [&str; 3]) -> Device {
    let [src_id, a_id, b_id] = ids;
    let mut device = Device::new(name);
    device.add_layer(flow_layer()).expect("layer");
    device.add_component(endpoint(src_id)).expect("component");
    device.add_component(endpoint(a_id)).expect("component");
    device.add_component(endpoint(b_id)).expect("component");
    device
        .add_connection(link(
            &format!("{name}_con1"),
            Target::new(src_id, "1"),
            vec![Target::new(a_id, "1"), Target::new(b_id, "1")],
        ))
        .expect("connection");
    device
}
