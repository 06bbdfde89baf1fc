//! Rig domain: joints, pose keyframes, blending, secondary motion and
//! forward kinematics into world-space bones.

mod blend;
mod bones;
pub mod math;
mod pose;
mod secondary;
mod systems;


pub use blend::PoseAnimator;
pub use bones::{Bone, BoneLengths, Bones, solve_bones};
pub use pose::{Joint, Pose, PoseKeyframe};
pub use secondary::{SecondaryMotion, SecondaryTuning};
pub use systems::compose_pose;

use bevy::prelude::*;

use crate::core::SimSet;
use crate::rig::systems::{solve_fighter_rigs, tick_pose_animators, update_secondary_motion};

pub struct RigPlugin;

impl Plugin for RigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SecondaryTuning>()
            .add_systems(
                Update,
                (tick_pose_animators, update_secondary_motion).in_set(SimSet::Pose),
            )
            .add_systems(Update, solve_fighter_rigs.in_set(SimSet::Rig));
    }
}
