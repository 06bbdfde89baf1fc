//! Movement domain: locomotion integration and transform sync.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::AttackTimeline;
use crate::core::FighterInput;
use crate::movement::components::{Facing, FighterMotion};
use crate::movement::events::DashStartedEvent;
use crate::movement::resources::MovementTuning;

/// One semi-implicit Euler step for a fighter. Returns true when a dash started.
pub fn step_motion(
    motion: &mut FighterMotion,
    input: &FighterInput,
    attacking: bool,
    tuning: &MovementTuning,
    dt: f32,
) -> bool {
    if !dt.is_finite() || dt <= 0.0 {
        return false;
    }

    if motion.dash_timer > 0.0 {
        motion.dash_timer = (motion.dash_timer - dt).max(0.0);
    }
    if motion.dash_cooldown_timer > 0.0 {
        motion.dash_cooldown_timer = (motion.dash_cooldown_timer - dt).max(0.0);
    }

    // Facing is frozen while an attack runs so strikes keep their direction.
    if !attacking && !motion.is_dashing() {
        if let Some(facing) = Facing::from_axis(input.axis.x).or(input.face_toward) {
            motion.facing = facing;
        }
    }

    let mut dash_started = false;
    if input.dash_pressed && !motion.is_dashing() && motion.dash_cooldown_timer <= 0.0 {
        motion.dash_timer = tuning.dash_time;
        motion.dash_cooldown_timer = tuning.dash_cooldown;
        dash_started = true;
    }

    motion.velocity.x = if motion.is_dashing() {
        motion.facing.forward().x * tuning.dash_speed
    } else {
        let control = if attacking { tuning.attack_move_factor } else { 1.0 };
        input.axis.x.clamp(-1.0, 1.0) * tuning.walk_speed * control
    };

    if input.jump_pressed && motion.on_ground && !attacking {
        motion.velocity.y = tuning.jump_velocity;
        motion.on_ground = false;
    }

    motion.velocity.y -= tuning.gravity * dt;
    let next = motion.position + motion.velocity * dt;
    if !next.is_finite() {
        motion.velocity = Vec2::ZERO;
        return dash_started;
    }
    motion.position = next;

    if motion.position.y <= tuning.ground_y {
        motion.position.y = tuning.ground_y;
        motion.velocity.y = 0.0;
        motion.on_ground = true;
    } else {
        motion.on_ground = false;
    }

    dash_started
}

pub(crate) fn apply_fighter_movement(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut dashes: MessageWriter<DashStartedEvent>,
    mut query: Query<(Entity, &FighterInput, &AttackTimeline, &mut FighterMotion)>,
) {
    let dt = time.delta_secs();

    for (entity, input, timeline, mut motion) in &mut query {
        if step_motion(&mut motion, input, timeline.is_active(), &tuning, dt) {
            debug!("Dash started: {:?} facing {:?}", entity, motion.facing);
            dashes.write(DashStartedEvent { entity });
        }
    }
}

pub(crate) fn sync_transforms(mut query: Query<(&FighterMotion, &mut Transform)>) {
    for (motion, mut transform) in &mut query {
        transform.translation.x = motion.position.x;
        transform.translation.y = motion.position.y;
        transform.scale.x = motion.facing.sign() * transform.scale.x.abs();
    }
}
