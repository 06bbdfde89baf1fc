//! Debug tooling for fast iteration (`dev-tools` feature).
//!
//! Features:
//! - Periodic log of every fighter's phase, health, stamina and colliders

mod systems;

use bevy::prelude::*;

use crate::core::SimSet;
use crate::debug::systems::log_fighter_state;

/// Resource tracking debug mode state
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Whether to log fighter state
    pub show_info: bool,
    pub log_timer: Timer,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            show_info: true,
            log_timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, log_fighter_state.in_set(SimSet::Cleanup));
    }
}
