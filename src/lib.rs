//! Headless simulation core of a 2D side-scrolling brawler: skeletal rig,
//! attack timelines, aiming, collider sampling and hit detection.
//!
//! A renderer reads `Bones`, `ColliderSamples`, `CameraFocus` and
//! `FighterMotion`; an input layer writes `FighterInput`.

pub mod aim;
pub mod camera;
pub mod combat;
pub mod content;
pub mod core;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod movement;
pub mod rig;
pub mod roster;

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

pub use crate::core::RunConfig;

/// All simulation plugins.
pub struct BrawlPlugin;

impl Plugin for BrawlPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            crate::core::CorePlugin,
            crate::content::ContentPlugin,
            crate::roster::RosterPlugin,
            crate::movement::MovementPlugin,
            crate::combat::CombatPlugin,
            crate::rig::RigPlugin,
            crate::aim::AimPlugin,
            crate::camera::CameraPlugin,
        ));
        #[cfg(feature = "dev-tools")]
        app.add_plugins(crate::debug::DebugPlugin);
    }
}

/// Headless app with manual time, already through startup, so the first
/// `tick` advances by its full delta.
pub fn build_app(config: RunConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(config)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO))
        .add_plugins(BrawlPlugin);
    app.update();
    app
}

/// Largest delta a single `tick` feeds the schedule, matching bevy's default
/// virtual-time cap.
pub const MAX_TICK_SECS: f32 = 0.25;

/// Advance one frame by `dt` seconds. Non-finite or non-positive deltas
/// advance by zero; anything above `MAX_TICK_SECS` is clamped to it.
pub fn tick(app: &mut App, dt: f32) {
    let dt = if dt.is_finite() && dt > 0.0 { dt.min(MAX_TICK_SECS) } else { 0.0 };
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(dt)));
    app.update();
}
