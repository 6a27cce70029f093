// Host-side tests for the scene model: orientation invariant, gain clamps,
// listener recentering.

mod common;

use common::approx;
use glam::{Vec2, Vec3};
use stage_core::*;

fn single_source_config(offset: Vec3) -> SceneConfig {
    let mut config = SceneConfig::double_premiere();
    config.sources.truncate(1);
    config.sources[0].offset = offset;
    config
}

#[test]
fn orientation_points_from_source_to_listener() {
    let scene = Scene::new(&single_source_config(Vec3::new(3.0, 0.0, 0.0)), Vec2::ZERO);
    assert_eq!(scene.listener().position, Vec3::ZERO);
    let o = scene.sources()[0].orientation;
    assert!((o - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-6, "got {o:?}");
}

#[test]
fn orientation_is_unit_length_everywhere() {
    let mut scene = Scene::new(&SceneConfig::double_premiere(), Vec2::new(640.0, 360.0));
    let listener = scene.listener().position;
    for xi in -4..=4 {
        for yi in -4..=4 {
            for zi in -4..=4 {
                let p = listener + Vec3::new(xi as f32 * 0.7, yi as f32 * 0.3, zi as f32 * 1.1);
                if p.distance(listener) < 1e-3 {
                    continue;
                }
                assert!(scene.set_source_position(0, p));
                let len = scene.sources()[0].orientation.length();
                assert!(approx(len, 1.0, 1e-6), "|o|={len} at {p:?}");
            }
        }
    }
    assert!(scene.orientations_consistent(1e-5));
}

#[test]
fn moving_onto_listener_keeps_previous_orientation() {
    let mut scene = Scene::new(&single_source_config(Vec3::new(0.0, 0.0, -2.0)), Vec2::ZERO);
    let before = scene.sources()[0].orientation;
    assert!(scene.set_source_position(0, Vec3::ZERO));
    let after = scene.sources()[0].orientation;
    assert_eq!(before, after);
    assert!(after.is_finite());
}

#[test]
fn source_created_on_listener_gets_default_facing() {
    let scene = Scene::new(&single_source_config(Vec3::ZERO), Vec2::ZERO);
    assert_eq!(scene.sources()[0].orientation, Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn set_position_only_touches_one_source() {
    let mut scene = Scene::new(&SceneConfig::double_premiere(), Vec2::new(100.0, 100.0));
    let before: Vec<_> = scene.sources().to_vec();
    assert!(scene.set_source_position(2, Vec3::new(90.0, 100.0, 4.0)));
    for (i, s) in scene.sources().iter().enumerate() {
        if i == 2 {
            assert_eq!(s.position, Vec3::new(90.0, 100.0, 4.0));
        } else {
            assert_eq!(*s, before[i]);
        }
    }
}

#[test]
fn out_of_range_index_is_a_no_op() {
    let mut scene = Scene::new(&SceneConfig::double_premiere(), Vec2::ZERO);
    let before: Vec<_> = scene.sources().to_vec();
    assert!(!scene.set_source_position(99, Vec3::ONE));
    assert_eq!(scene.set_source_gain(99, 0.5), None);
    assert_eq!(scene.set_bus_gain(5, 0.1), None);
    assert_eq!(scene.sources(), &before[..]);
}

#[test]
fn source_gain_is_clamped_to_unit_range() {
    let mut scene = Scene::new(&SceneConfig::double_premiere(), Vec2::ZERO);
    for (input, expected) in [(-3.0, 0.0), (0.25, 0.25), (1.0, 1.0), (7.5, 1.0)] {
        assert_eq!(scene.set_source_gain(0, input), Some(expected));
        assert_eq!(scene.sources()[0].gain, expected);
    }
    assert_eq!(scene.set_source_gain(0, f32::NAN), None);
    assert_eq!(scene.sources()[0].gain, 1.0);
}

#[test]
fn bus_gain_respects_each_bus_ceiling() {
    let mut scene = Scene::new(&SceneConfig::double_premiere(), Vec2::ZERO);
    assert_eq!(scene.buses()[0].gain, DOUBLE_BUS_MAX_GAIN);
    assert_eq!(scene.buses()[1].gain, PREMIERE_BUS_MAX_GAIN);

    assert_eq!(scene.set_bus_gain(0, 1.0), Some(DOUBLE_BUS_MAX_GAIN));
    assert_eq!(scene.set_bus_gain(1, 1.0), Some(PREMIERE_BUS_MAX_GAIN));
    assert_eq!(scene.set_bus_gain(1, 0.3), Some(0.3));
    assert_eq!(scene.set_bus_gain(0, -0.1), Some(0.0));
    for b in scene.buses() {
        assert!(b.gain >= 0.0 && b.gain <= b.max_gain);
    }
}

#[test]
fn recentering_moves_listener_and_reaims_every_source() {
    let mut scene = Scene::new(&SceneConfig::double_premiere(), Vec2::new(640.0, 360.0));
    let positions: Vec<Vec3> = scene.sources().iter().map(|s| s.position).collect();
    let before: Vec<Vec3> = scene.sources().iter().map(|s| s.orientation).collect();

    scene.recenter_listener(400.0, 300.0);

    assert_eq!(scene.listener().position, Vec3::new(400.0, 300.0, 0.0));
    for (i, s) in scene.sources().iter().enumerate() {
        assert_eq!(s.position, positions[i], "sources are world-absolute");
        assert_ne!(s.orientation, before[i]);
    }
    assert!(scene.orientations_consistent(1e-5));
}

#[test]
fn forward_offset_depth_places_listener_along_forward_axis() {
    let mut config = SceneConfig::double_premiere();
    config.listener_z = 1.0;
    config.listener_depth = ListenerDepth::ForwardOffset(2.0);
    let mut scene = Scene::new(&config, Vec2::new(10.0, 20.0));
    assert_eq!(scene.listener().position, Vec3::new(10.0, 20.0, -1.0));
    scene.recenter_listener(30.0, 40.0);
    assert_eq!(scene.listener().position, Vec3::new(30.0, 40.0, -1.0));
}

#[test]
fn default_layout_is_valid() {
    let config = SceneConfig::double_premiere();
    assert!(config.validate().is_ok());
    assert_eq!(config.sources.len(), 7);
    assert_eq!(config.sources[6].effect, Some(0));
    assert!(config.sources[..6].iter().all(|s| s.bus == 0 && s.effect.is_none()));
}

#[test]
fn validation_rejects_dangling_references() {
    let mut config = SceneConfig::double_premiere();
    config.sources[3].bus = 9;
    assert!(matches!(config.validate(), Err(StageError::InvalidConfig(_))));

    let mut config = SceneConfig::double_premiere();
    config.sources[6].effect = Some(4);
    assert!(config.validate().is_err());

    let mut config = SceneConfig::double_premiere();
    config.view_scale = 0.0;
    assert!(config.validate().is_err());

    let mut config = SceneConfig::double_premiere();
    config.sources.clear();
    assert!(config.validate().is_err());
}
