#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod common;

use common::{channel, flow_layer, mixer, sample_device, terminal};
use mfnet_common::{
    ConnectionPath, Device, EntityKind, NetlistError, Params, Target, ValveType,
};

#[test]
fn lookup_of_missing_component_fails() {
    let device = sample_device();
    let err = device.get_component("missing").unwrap_err();
    assert!(matches!(
        err,
        NetlistError::NotFound {
            kind: EntityKind::Component,
            ..
        }
    ));
}

#[test]
fn dangling_connection_is_rejected_atomically() {
    let mut device = sample_device();
    let components_before = device.component_count();
    let connections_before = device.connection_count();
    let edges_before = device.graph().edge_count();

    let err = device
        .add_connection(channel(
            "bad",
            Target::new("in1", "1"),
            vec![Target::new("ghost", "1")],
        ))
        .unwrap_err();

    assert!(matches!(
        err,
        NetlistError::MissingReference {
            kind: EntityKind::Component,
            ..
        }
    ));
    assert_eq!(device.component_count(), components_before);
    assert_eq!(device.connection_count(), connections_before);
    assert_eq!(device.graph().edge_count(), edges_before);
    assert!(!device.connection_exists("bad"));
}

#[test]
fn sink_carrying_connection_without_source_is_rejected() {
    let mut device = sample_device();
    let edges_before = device.graph().edge_count();

    let mut headless = channel("bad", Target::new("in1", "1"), vec![Target::new("mix1", "1")]);
    headless.source = None;
    let err = device.add_connection(headless).unwrap_err();

    assert!(matches!(err, NetlistError::MissingSource(_)));
    assert!(!device.connection_exists("bad"));
    assert_eq!(device.graph().edge_count(), edges_before);
}

#[test]
fn duplicate_ids_are_rejected() {
    let mut device = sample_device();
    let err = device.add_component(mixer("mix1")).unwrap_err();
    assert!(matches!(err, NetlistError::DuplicateId { .. }));

    let err = device.add_layer(flow_layer()).unwrap_err();
    assert!(matches!(err, NetlistError::DuplicateId { .. }));
}

#[test]
fn component_with_unknown_layer_is_rejected() {
    let mut device = Device::new("empty");
    let err = device.add_component(mixer("mix1")).unwrap_err();
    assert!(matches!(
        err,
        NetlistError::MissingReference {
            kind: EntityKind::Layer,
            ..
        }
    ));
    assert_eq!(device.component_count(), 0);
    assert_eq!(device.graph().node_count(), 0);
}

#[test]
fn graph_stays_in_lock_step_with_collections() {
    let device = sample_device();
    let graph = device.graph();

    assert_eq!(graph.node_count(), device.component_count());
    // con1 and con2 have one sink each.
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.out_degree("in1"), 1);
    assert_eq!(graph.in_degree("mix1"), 1);
    assert_eq!(graph.out_degree("mix1"), 1);
    assert_eq!(graph.in_degree("out1"), 1);
    assert_eq!(graph.in_degree("v1"), 0);

    let (_, edge) = graph.out_edges("in1").next().expect("edge");
    assert_eq!(edge.connection, "con1");
    assert_eq!(edge.source_port, Target::new("in1", "1"));
    assert_eq!(edge.sink_port, Target::new("mix1", "1"));
}

#[test]
fn fan_out_produces_parallel_edges() {
    let mut device = Device::new("fanout");
    device.add_layer(flow_layer()).expect("layer");
    device.add_component(terminal("src")).expect("component");
    device.add_component(mixer("a")).expect("component");
    device.add_component(mixer("b")).expect("component");
    device
        .add_connection(channel(
            "con1",
            Target::new("src", "1"),
            vec![Target::new("a", "1"), Target::new("b", "1")],
        ))
        .expect("connection");

    assert_eq!(device.graph().edge_count(), 2);
    assert_eq!(device.graph().out_degree("src"), 2);
    assert_eq!(device.graph().edge_count_between("src", "a"), 1);
    assert_eq!(device.graph().edge_count_between("src", "b"), 1);
}

#[test]
fn removing_referenced_entities_is_rejected() {
    let mut device = sample_device();

    let err = device.remove_component("mix1").unwrap_err();
    assert!(matches!(err, NetlistError::StillReferenced { .. }));
    assert!(device.component_exists("mix1"));

    let err = device.remove_layer("FLOW_1").unwrap_err();
    assert!(matches!(err, NetlistError::StillReferenced { .. }));

    // con2 is gated by v1.
    let err = device.remove_connection("con2").unwrap_err();
    assert!(matches!(err, NetlistError::StillReferenced { .. }));
}

#[test]
fn removal_succeeds_once_references_are_gone() {
    let mut device = sample_device();

    device.unmap_valve("v1").expect("unmap");
    device.remove_connection("con2").expect("remove connection");
    assert_eq!(device.graph().edge_count(), 1);

    device.remove_connection("con1").expect("remove connection");
    assert_eq!(device.graph().edge_count(), 0);

    device.remove_component("mix1").expect("remove component");
    assert!(!device.component_exists("mix1"));
    assert!(!device.graph().contains_node("mix1"));
    assert_eq!(device.graph().node_count(), device.component_count());
}

#[test]
fn valve_bookkeeping() {
    let mut device = sample_device();

    assert_eq!(device.valves().collect::<Vec<_>>(), vec!["v1"]);
    assert_eq!(device.valve_connection("v1").expect("connection").id, "con2");
    assert_eq!(device.valve_type("v1"), Some(ValveType::NormallyOpen));

    device
        .update_valve_type("v1", ValveType::NormallyClosed)
        .expect("update");
    assert_eq!(device.valve_type("v1"), Some(ValveType::NormallyClosed));

    let err = device
        .update_valve_type("mix1", ValveType::NormallyOpen)
        .unwrap_err();
    assert!(matches!(err, NetlistError::NotAValve(_)));

    let err = device.map_valve("ghost", "con1", None).unwrap_err();
    assert!(matches!(err, NetlistError::NotFound { .. }));
}

#[test]
fn spans_are_read_from_params() {
    let device = sample_device();
    assert_eq!(device.xspan(), Some(100_000));
    assert_eq!(device.yspan(), Some(50_000));

    let mut other = Device::new("alias");
    other.params = [
        ("width".to_string(), serde_json::json!(400)),
        ("length".to_string(), serde_json::json!(300)),
    ]
    .into_iter()
    .collect();
    assert_eq!(other.xspan(), Some(400));
    assert_eq!(other.yspan(), Some(300));
}

#[test]
fn component_port_helpers() {
    let device = sample_device();
    let mix = device.get_component("mix1").expect("component");

    assert_eq!(mix.get_port("2").expect("port").x, 1000);
    assert!(mix.get_port("9").is_err());

    // position param is [250, 300] in the fixtures.
    assert_eq!(
        mix.absolute_port_coordinates("2").expect("coords"),
        (1250.0, 300.0)
    );
}

#[test]
fn path_endpoints_must_be_connection_targets() {
    let mut connection = channel(
        "conX",
        Target::new("in1", "1"),
        vec![Target::new("mix1", "1")],
    );
    let err = connection
        .add_path(ConnectionPath::new(
            Some(Target::new("in1", "1")),
            Some(Target::new("stranger", "1")),
            vec![(0, 0)],
            Vec::new(),
        ))
        .unwrap_err();
    assert!(matches!(err, NetlistError::PathEndpointMismatch { .. }));
    assert!(connection.paths.is_empty());
}

#[test]
fn merge_unions_layers_and_copies_entities() {
    let mut base = sample_device();
    let mut incoming = Device::new("extra");
    incoming.add_layer(flow_layer()).expect("layer");
    incoming.add_component(terminal("t9")).expect("component");
    incoming.add_component(mixer("m9")).expect("component");
    incoming
        .add_connection(channel(
            "con9",
            Target::new("t9", "1"),
            vec![Target::new("m9", "1")],
        ))
        .expect("connection");

    let components_before = base.component_count();
    base.merge_netlist(&incoming).expect("merge");

    assert_eq!(base.component_count(), components_before + 2);
    assert!(base.connection_exists("con9"));
    // FLOW_1 was unified by ID, not duplicated.
    assert_eq!(base.layers().filter(|l| l.id == "FLOW_1").count(), 1);

    let mut clashing = Device::new("clash");
    clashing.add_layer(flow_layer()).expect("layer");
    clashing.add_component(mixer("mix1")).expect("component");
    let err = base.merge_netlist(&clashing).unwrap_err();
    assert!(matches!(err, NetlistError::DuplicateId { .. }));
}

#[test]
fn name_lookup_and_empty_params() {
    let device = sample_device();
    assert_eq!(device.get_name_from_id("mix1"), Some("mix1"));
    assert_eq!(device.get_name_from_id("ghost"), None);
    assert!(Params::new().is_empty());
}
