//! Rig domain: per-frame pose blend, secondary motion and forward kinematics.

use bevy::prelude::*;

use crate::aim::{AimOffsets, AimState, AimTuning};
use crate::movement::FighterMotion;
use crate::rig::blend::PoseAnimator;
use crate::rig::bones::{Bones, solve_bones};
use crate::rig::pose::Pose;
use crate::rig::secondary::{SecondaryMotion, SecondaryTuning};
use crate::roster::FighterBody;

pub(crate) fn tick_pose_animators(time: Res<Time>, mut query: Query<&mut PoseAnimator>) {
    let dt = time.delta_secs();
    for mut animator in &mut query {
        animator.tick(dt);
    }
}

pub(crate) fn update_secondary_motion(
    time: Res<Time>,
    tuning: Res<SecondaryTuning>,
    mut query: Query<(&FighterMotion, &mut SecondaryMotion)>,
) {
    let dt = time.delta_secs();
    for (motion, mut secondary) in &mut query {
        secondary.update(motion.velocity, motion.on_ground, motion.facing.sign(), &tuning, dt);
    }
}

/// Final pose for this frame: blended keyframe, aim offsets, then secondary motion.
pub fn compose_pose(
    animator: &PoseAnimator,
    aim: &AimState,
    aim_tuning: &AimTuning,
    secondary: &SecondaryMotion,
    secondary_tuning: &SecondaryTuning,
) -> Pose {
    let mut pose = animator.current();
    AimOffsets::from_applied(aim.applied_rad, aim_tuning).apply(&mut pose);
    secondary.apply(&mut pose, secondary_tuning.blend_weight);
    pose
}

pub(crate) fn solve_fighter_rigs(
    aim_tuning: Res<AimTuning>,
    secondary_tuning: Res<SecondaryTuning>,
    mut query: Query<(
        &FighterMotion,
        &FighterBody,
        &PoseAnimator,
        &AimState,
        &SecondaryMotion,
        &mut Bones,
    )>,
) {
    for (motion, body, animator, aim, secondary, mut bones) in &mut query {
        let pose = compose_pose(animator, aim, &aim_tuning, secondary, &secondary_tuning);
        let lengths = body.lengths.scaled(body.actor_scale);
        solve_bones(motion.position, &pose, &lengths, motion.facing.sign(), &mut bones);
    }
}
