#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod common;

use common::{
    default_mixer_params, endpoint, fanout_device, flow_layer, init_test_logger, link,
    linear_device, linear_device_with, mixer_with,
};
use mfnet_common::{Device, Target};
use mfnet_equiv::{AlwaysFeasible, CompareConfig, EquivalenceMatcher};
use rstest::rstest;
use serde_json::json;

#[test]
fn reflexivity_yields_empty_report() {
    init_test_logger();
    let device = linear_device("dx1", ["in1", "mix1", "out1"]);

    let comparison =
        EquivalenceMatcher::compare(&device, &device, &CompareConfig::with_params());

    assert!(comparison.is_match());
    assert!(!comparison.budget_exhausted);
    assert!(comparison.report().is_empty());
}

#[test]
fn renamed_devices_are_equivalent() {
    init_test_logger();
    let device_a = linear_device("dx1", ["in1", "mix1", "out1"]);
    let device_b = linear_device("dx2", ["s1", "m1", "t1"]);

    let comparison =
        EquivalenceMatcher::compare(&device_a, &device_b, &CompareConfig::with_params());

    assert!(comparison.is_match());
    // Endpoint identities differ under renaming; they are reported but do
    // not block the match unless the connection-target flag is set.
    assert!(!comparison.report().in_edges_diff().is_empty());
}

#[test]
fn connection_target_flag_makes_renaming_blocking() {
    let device_a = linear_device("dx1", ["in1", "mix1", "out1"]);
    let device_b = linear_device("dx2", ["s1", "m1", "t1"]);

    let comparison = EquivalenceMatcher::compare(&device_a, &device_b, &CompareConfig::strict());

    assert!(!comparison.is_match());
    assert!(!comparison.report().in_edges_diff().is_empty());
}

#[test]
fn param_mismatch_is_gated_by_the_flag() {
    let device_a = linear_device("dx1", ["in1", "mix1", "out1"]);
    let changed = mixer_with(
        "mix1",
        "MIXER",
        [("channelWidth".to_string(), json!(900))].into_iter().collect(),
        2,
    );
    let device_b = linear_device_with("dx1_params", ["in1", "mix1", "out1"], changed);

    let lenient = EquivalenceMatcher::compare(&device_a, &device_b, &CompareConfig::default());
    assert!(lenient.is_match());
    assert!(!lenient.report().params_diff().is_empty());

    let strict = EquivalenceMatcher::compare(&device_a, &device_b, &CompareConfig::with_params());
    assert!(!strict.is_match());
    assert!(!strict.report().params_diff().is_empty());
}

/// A chain whose mixer carries only one port, wired through that port.
fn narrow_mixer_device() -> Device {
    let narrowed = mixer_with("mix1", "MIXER", default_mixer_params(), 1);
    let mut device = Device::new("dx1_ports");
    device.add_layer(flow_layer()).expect("layer");
    device.add_component(endpoint("in1")).expect("component");
    device.add_component(narrowed).expect("component");
    device.add_component(endpoint("out1")).expect("component");
    device
        .add_connection(link(
            "p_con1",
            Target::new("in1", "1"),
            vec![Target::new("mix1", "1")],
        ))
        .expect("connection");
    device
        .add_connection(link(
            "p_con2",
            Target::new("mix1", "1"),
            vec![Target::new("out1", "1")],
        ))
        .expect("connection");
    device
}

#[rstest]
#[case::lenient(CompareConfig::default())]
#[case::with_params(CompareConfig::with_params())]
fn port_count_mismatch_is_fatal_regardless_of_flags(#[case] config: CompareConfig) {
    let device_a = linear_device("dx1", ["in1", "mix1", "out1"]);
    let device_b = narrow_mixer_device();

    let comparison = EquivalenceMatcher::compare(&device_a, &device_b, &config);
    assert!(!comparison.is_match());
    assert!(!comparison.report().ports_diff().is_empty());
}

#[test]
fn entity_difference_alone_still_matches() {
    let device_a = linear_device("dx1", ["in1", "mix1", "out1"]);
    let relabeled = mixer_with("mix1", "VALVE", default_mixer_params(), 2);
    let device_b = linear_device_with("dx1_entity", ["in1", "mix1", "out1"], relabeled);

    let comparison =
        EquivalenceMatcher::compare(&device_a, &device_b, &CompareConfig::with_params());

    // The entity string is not part of the feasibility predicate.
    assert!(comparison.is_match());
    assert!(comparison.report().is_empty());
}

#[test]
fn size_mismatch_is_false_without_a_search() {
    let device_a = linear_device("dx1", ["in1", "mix1", "out1"]);
    let mut device_b = linear_device("dx2", ["in1", "mix1", "out1"]);
    device_b.add_component(endpoint("extra")).expect("component");

    let comparison =
        EquivalenceMatcher::compare(&device_a, &device_b, &CompareConfig::default());

    assert!(!comparison.is_match());
    assert!(!comparison.budget_exhausted);
    assert!(comparison.report().is_empty());
}

#[test]
fn different_topology_is_not_equivalent() {
    let device_a = linear_device("dx1", ["in1", "mix1", "out1"]);
    // Same node and edge counts, but the source fans out instead of chaining.
    let device_b = fanout_device("dx_fan", ["in1", "mix1", "out1"]);

    let comparison =
        EquivalenceMatcher::compare(&device_a, &device_b, &CompareConfig::default());

    assert!(!comparison.is_match());
}

#[test]
fn fanout_devices_compare_equal_up_to_renaming() {
    let device_a = fanout_device("fan1", ["src", "a", "b"]);
    let device_b = fanout_device("fan2", ["s", "x", "y"]);

    let comparison =
        EquivalenceMatcher::compare(&device_a, &device_b, &CompareConfig::with_params());

    assert!(comparison.is_match());
}

#[test]
fn step_budget_bounds_the_search() {
    let device_a = linear_device("dx1", ["in1", "mix1", "out1"]);
    let device_b = linear_device("dx2", ["s1", "m1", "t1"]);

    let starved = EquivalenceMatcher::compare(
        &device_a,
        &device_b,
        &CompareConfig::default().with_max_steps(1),
    );
    assert!(!starved.is_match());
    assert!(starved.budget_exhausted);

    let ample = EquivalenceMatcher::compare(
        &device_a,
        &device_b,
        &CompareConfig::default().with_max_steps(1000),
    );
    assert!(ample.is_match());
    assert!(!ample.budget_exhausted);
}

#[test]
fn structural_search_is_independent_of_the_predicate() {
    let device_a = linear_device("dx1", ["in1", "mix1", "out1"]);
    let device_b = narrow_mixer_device();

    // Port collections differ, so the component predicate rejects...
    let semantic = EquivalenceMatcher::compare(&device_a, &device_b, &CompareConfig::default());
    assert!(!semantic.is_match());

    // ...while the bare structural search still finds the isomorphism.
    let mut accept_all = AlwaysFeasible;
    assert!(EquivalenceMatcher::compare_with(
        &device_a,
        &device_b,
        None,
        &mut accept_all
    ));
}
