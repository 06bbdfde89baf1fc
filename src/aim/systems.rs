//! Aim domain: per-frame aim update.

use bevy::prelude::*;

use crate::aim::aiming::{AimState, AimTuning, update_aiming};
use crate::core::FighterInput;
use crate::movement::FighterMotion;
use crate::rig::{Bones, PoseAnimator};
use crate::roster::{Fighter, FighterBody};

pub(crate) fn update_fighter_aim(
    time: Res<Time>,
    tuning: Res<AimTuning>,
    mut query: Query<(
        &Fighter,
        &FighterBody,
        &FighterInput,
        &FighterMotion,
        &PoseAnimator,
        &Bones,
        &mut AimState,
    )>,
) {
    let dt = time.delta_secs();

    for (fighter, body, input, motion, animator, bones, mut aim) in &mut query {
        // Bones are from the previous frame; before the first solve use the
        // unposed neck height.
        let head = bones
            .neck()
            .unwrap_or(motion.position + Vec2::Y * body.lengths.torso * body.actor_scale);
        update_aiming(
            &mut aim,
            fighter.role,
            &input.aim,
            animator.aim_disabled(),
            motion.facing.sign(),
            head,
            &tuning,
            dt,
        );
    }
}
