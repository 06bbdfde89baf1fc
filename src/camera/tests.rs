//! Camera domain: tests for the follow point.

use bevy::prelude::*;

use super::{CameraFocus, CameraTuning};

fn snappy() -> CameraTuning {
    CameraTuning {
        smoothing: 0.0,
        ..default()
    }
}

#[test]
fn test_dead_zone_holds_horizontal_position() {
    let tuning = snappy();
    let mut focus = CameraFocus::default();
    focus.follow(Vec2::new(50.0, 60.0), &tuning, 0.016);
    assert_eq!(focus.position, Vec2::new(0.0, 60.0));
}

#[test]
fn test_follows_past_dead_zone() {
    let tuning = snappy();
    let mut focus = CameraFocus::default();
    focus.follow(Vec2::new(300.0, 60.0), &tuning, 0.016);
    assert_eq!(focus.position.x, 300.0 - tuning.dead_zone);

    focus.follow(Vec2::new(-300.0, 60.0), &tuning, 0.016);
    assert_eq!(focus.position.x, -300.0 + tuning.dead_zone);
}

#[test]
fn test_smoothing_approaches_gradually() {
    let tuning = CameraTuning::default();
    let mut focus = CameraFocus::default();
    focus.follow(Vec2::new(500.0, 0.0), &tuning, 1.0 / 60.0);
    assert!(focus.position.x > 0.0);
    assert!(focus.position.x < 500.0 - tuning.dead_zone);
}

#[test]
fn test_bounds_clamp_and_accept_swapped_limits() {
    let tuning = CameraTuning {
        min_x: 100.0,
        max_x: -100.0,
        max_y: 50.0,
        ..snappy()
    };
    let mut focus = CameraFocus::default();
    focus.follow(Vec2::new(1000.0, 500.0), &tuning, 0.016);
    assert_eq!(focus.position, Vec2::new(100.0, 50.0));
}

#[test]
fn test_non_finite_target_is_ignored() {
    let tuning = snappy();
    let mut focus = CameraFocus {
        position: Vec2::new(10.0, 20.0),
    };
    focus.follow(Vec2::new(f32::NAN, 0.0), &tuning, 0.016);
    assert_eq!(focus.position, Vec2::new(10.0, 20.0));
}
