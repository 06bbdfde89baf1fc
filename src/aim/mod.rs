//! Aim domain: face locks, joystick/pointer aiming and the IK blend into the pose.

mod aiming;
mod limits;
mod systems;


pub use aiming::{
    AimInput, AimOffsets, AimState, AimTuning, FaceLock, convert_aim_to_head_rad, select_world_target,
    update_aiming,
};
pub use limits::JointLimits;

use bevy::prelude::*;

use crate::aim::systems::update_fighter_aim;
use crate::core::SimSet;

pub struct AimPlugin;

impl Plugin for AimPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AimTuning>()
            .add_systems(Update, update_fighter_aim.in_set(SimSet::Aim));
    }
}
