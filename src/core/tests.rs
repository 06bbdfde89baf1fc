//! Core domain: tests for run configuration, pausing and one-shot input.

use std::path::PathBuf;

use bevy::prelude::*;

use super::{FighterInput, RunConfig, SimPaused};
use crate::movement::Facing;
use crate::roster::FighterRole;

// -----------------------------------------------------------------------------
// SimPaused tests
// -----------------------------------------------------------------------------

#[test]
fn test_pause_sources_stack() {
    let mut paused = SimPaused::default();
    assert!(!paused.is_paused());

    paused.pause("menu");
    paused.pause("hitstop");
    assert!(paused.is_paused());

    paused.unpause("menu");
    assert!(paused.is_paused());

    paused.unpause("hitstop");
    assert!(!paused.is_paused());
}

#[test]
fn test_unpause_unknown_source_is_noop() {
    let mut paused = SimPaused::default();
    paused.pause("menu");
    paused.unpause("other");
    assert!(paused.is_paused());
}

// -----------------------------------------------------------------------------
// RunConfig tests
// -----------------------------------------------------------------------------

#[test]
fn test_default_lineup_faces_each_other() {
    let config = RunConfig::default();
    assert_eq!(config.lineup.len(), 2);
    assert_eq!(config.data_dir, PathBuf::from("assets/data"));
    assert_eq!(config.max_frames, None);

    let player = &config.lineup[0];
    let npc = &config.lineup[1];
    assert_eq!(player.role, FighterRole::Player);
    assert_eq!(npc.role, FighterRole::Npc);
    assert_eq!(player.facing, Facing::Right);
    assert_eq!(npc.facing, Facing::Left);
    assert!(player.position.x < npc.position.x);
}

#[test]
fn test_overrides_apply() {
    let mut config = RunConfig::default();
    config.apply_overrides(Some("42"), Some(" 600 "), Some("data/alt"));
    assert_eq!(config.seed, 42);
    assert_eq!(config.max_frames, Some(600));
    assert_eq!(config.data_dir, PathBuf::from("data/alt"));
}

#[test]
fn test_bad_overrides_are_ignored() {
    let mut config = RunConfig {
        seed: 7,
        max_frames: Some(10),
        ..default()
    };
    config.apply_overrides(Some("not-a-number"), Some("-3"), Some("   "));
    assert_eq!(config.seed, 7);
    assert_eq!(config.max_frames, Some(10));
    assert_eq!(config.data_dir, PathBuf::from("assets/data"));
}

#[test]
fn test_zero_frames_means_unbounded() {
    let mut config = RunConfig {
        max_frames: Some(10),
        ..default()
    };
    config.apply_overrides(None, Some("0"), None);
    assert_eq!(config.max_frames, None);
}

// -----------------------------------------------------------------------------
// FighterInput tests
// -----------------------------------------------------------------------------

#[test]
fn test_clear_one_shots_keeps_held_state() {
    let mut input = FighterInput {
        axis: Vec2::new(1.0, 0.0),
        jump_pressed: true,
        dash_pressed: true,
        ability_pressed: Some(0),
        ability_released: Some(2),
        face_toward: Some(Facing::Left),
        ..default()
    };
    input.clear_one_shots();

    assert!(!input.jump_pressed);
    assert!(!input.dash_pressed);
    assert_eq!(input.ability_pressed, None);
    assert_eq!(input.ability_released, None);
    assert_eq!(input.axis, Vec2::new(1.0, 0.0));
    assert_eq!(input.face_toward, Some(Facing::Left));
}
