//! Movement domain: fighter locomotion, facing and dash.

mod components;
mod events;
mod resources;
mod systems;


pub use components::{Facing, FighterMotion};
pub use events::DashStartedEvent;
pub use resources::MovementTuning;
pub use systems::step_motion;

use bevy::prelude::*;

use crate::core::SimSet;
use crate::movement::systems::{apply_fighter_movement, sync_transforms};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .add_message::<DashStartedEvent>()
            .add_systems(
                Update,
                (apply_fighter_movement, sync_transforms)
                    .chain()
                    .in_set(SimSet::Motion),
            );
    }
}
