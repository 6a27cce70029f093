// Host-side tests for routing graph construction against a recording backend.

mod common;

use common::{make_engine, NodeKind, RecordingBackend};
use glam::{Vec2, Vec3};
use stage_core::*;

fn build() -> RoutingGraph<RecordingBackend> {
    let config = SceneConfig::double_premiere();
    let scene = Scene::new(&config, Vec2::new(640.0, 360.0));
    RoutingGraph::build(
        RecordingBackend::default(),
        &scene,
        &config.spatializer,
        config.effects.len(),
    )
    .expect("graph builds")
}

#[test]
fn every_source_gets_its_own_chain() {
    let graph = build();
    let b = graph.backend();
    assert_eq!(b.nodes_of(|k| *k == NodeKind::Spatializer).len(), 7);
    assert_eq!(b.nodes_of(|k| matches!(k, NodeKind::Input(_))).len(), 2);
    assert_eq!(b.nodes_of(|k| *k == NodeKind::Destination).len(), 1);
    assert_eq!(b.nodes_of(|k| matches!(k, NodeKind::Effect(0))).len(), 1);
}

#[test]
fn dry_sources_go_spatializer_gain_bus_destination() {
    let graph = build();
    let b = graph.backend();
    let spatializers = b.nodes_of(|k| *k == NodeKind::Spatializer);
    let double = b.gain_node("Double");
    let dest = b.nodes_of(|k| *k == NodeKind::Destination)[0];

    let gain = b.outgoing(spatializers[0]);
    assert_eq!(gain, vec![b.gain_node("Source 1")]);
    assert_eq!(b.outgoing(gain[0]), vec![double]);
    assert_eq!(b.outgoing(double), vec![dest]);
}

#[test]
fn wet_source_passes_through_effect_before_its_gain() {
    let graph = build();
    let b = graph.backend();
    let spatializers = b.nodes_of(|k| *k == NodeKind::Spatializer);
    let effect = b.nodes_of(|k| matches!(k, NodeKind::Effect(0)))[0];

    assert_eq!(b.outgoing(spatializers[6]), vec![effect]);
    assert_eq!(b.outgoing(effect), vec![b.gain_node("Source 7")]);
    assert_eq!(
        b.outgoing(b.gain_node("Source 7")),
        vec![b.gain_node("Premiere")]
    );
    assert!(graph.has_effect(6));
    assert!(!graph.has_effect(0));
}

#[test]
fn inputs_feed_their_configured_sources() {
    let graph = build();
    let b = graph.backend();
    let double_in = b.nodes_of(|k| *k == NodeKind::Input(0))[0];
    let premiere_in = b.nodes_of(|k| *k == NodeKind::Input(1))[0];
    assert_eq!(b.outgoing(double_in).len(), 6);
    assert_eq!(b.outgoing(premiere_in).len(), 1);
}

#[test]
fn bus_gains_start_at_their_ceiling() {
    let graph = build();
    let b = graph.backend();
    assert_eq!(b.gains[&b.gain_node("Double")], DOUBLE_BUS_MAX_GAIN);
    assert_eq!(b.gains[&b.gain_node("Premiere")], PREMIERE_BUS_MAX_GAIN);
}

#[test]
fn listener_frame_is_pushed_on_build() {
    let graph = build();
    let (pos, fwd, up) = graph.backend().listener.expect("listener set");
    assert_eq!(pos, Vec3::new(640.0, 360.0, 0.0));
    assert_eq!(fwd, Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(up, Vec3::new(0.0, 1.0, 0.0));
}

#[test]
fn parameter_updates_before_effect_is_ready_still_apply() {
    let mut graph = build();
    assert_eq!(graph.effect_state(0), Some(EffectState::Loading));

    assert!(graph.update_spatial_params(6, Vec3::new(1.0, 2.0, 3.0), Vec3::X));
    assert!(graph.update_gain(GainTarget::Source(6), 0.5));

    let b = graph.backend();
    let sp = b.nodes_of(|k| *k == NodeKind::Spatializer)[6];
    assert_eq!(b.positions[&sp], Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(b.orientations[&sp], Vec3::X);
    assert_eq!(b.gains[&b.gain_node("Source 7")], 0.5);
    assert!(b.loaded.is_empty());
}

#[test]
fn effect_load_reaches_every_effect_node() {
    let mut graph = build();
    graph.effect_loaded(0, &"ir".to_string()).unwrap();
    assert_eq!(graph.effect_state(0), Some(EffectState::Ready));
    let effect = graph
        .backend()
        .nodes_of(|k| matches!(k, NodeKind::Effect(0)))[0];
    assert_eq!(graph.backend().loaded, vec![(effect, "ir".to_string())]);
}

#[test]
fn effect_failure_is_recorded_and_not_fatal() {
    let mut graph = build();
    graph.effect_failed(0, "decode error");
    assert_eq!(graph.effect_state(0), Some(EffectState::Failed));
    assert!(graph.update_gain(GainTarget::Source(6), 0.2));
    assert!(matches!(
        graph.effect_loaded(3, &"ir".to_string()),
        Err(StageError::UnknownEffect(3))
    ));
}

#[test]
fn unknown_targets_are_ignored() {
    let mut graph = build();
    assert!(!graph.update_gain(GainTarget::Source(42), 0.3));
    assert!(!graph.update_gain(GainTarget::Bus(7), 0.3));
    assert!(!graph.update_spatial_params(42, Vec3::ZERO, Vec3::Z));
}

#[test]
fn node_creation_failure_surfaces_as_error() {
    let backend = RecordingBackend {
        fail_gain_label: Some("Source 3".to_string()),
        ..Default::default()
    };
    let result = Engine::new(
        SceneConfig::double_premiere(),
        backend,
        Vec2::new(800.0, 600.0),
        Vec2::new(400.0, 300.0),
    );
    assert!(matches!(result, Err(StageError::NodeCreation { .. })));
}

#[test]
fn engine_exposes_effect_state() {
    let mut engine = make_engine();
    assert_eq!(engine.effect_state(0), Some(EffectState::Loading));
    engine.effect_loaded(0, &"ir".to_string()).unwrap();
    assert_eq!(engine.effect_state(0), Some(EffectState::Ready));
    assert_eq!(engine.effect_state(1), None);
}
