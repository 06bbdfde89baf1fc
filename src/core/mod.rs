//! Core domain: run configuration, frame ordering and shared input.

mod input;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use input::FighterInput;
pub use resources::{
    DATA_ENV, FRAMES_ENV, LineupEntry, RunConfig, SEED_ENV, SimFrame, SimPaused, simulation_active,
};

use bevy::prelude::*;

use crate::core::systems::{advance_frame_counter, clear_one_shot_inputs};

/// Per-frame simulation order. Every domain plugin places its systems in one
/// of these; the sets run chained.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Motion,
    Timeline,
    Pose,
    Aim,
    Rig,
    Colliders,
    Hits,
    Reactions,
    Cleanup,
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StartupSet {
    Content,
    Spawn,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunConfig>()
            .init_resource::<SimFrame>()
            .init_resource::<SimPaused>()
            .configure_sets(Startup, (StartupSet::Content, StartupSet::Spawn).chain())
            .configure_sets(
                Update,
                (
                    SimSet::Input,
                    SimSet::Motion,
                    SimSet::Timeline,
                    SimSet::Pose,
                    SimSet::Aim,
                    SimSet::Rig,
                    SimSet::Colliders,
                    SimSet::Hits,
                    SimSet::Reactions,
                    SimSet::Cleanup,
                )
                    .chain()
                    .run_if(simulation_active),
            )
            .add_systems(
                Update,
                (clear_one_shot_inputs, advance_frame_counter)
                    .chain()
                    .in_set(SimSet::Cleanup),
            );
    }
}
