//! Aim domain: target selection, head-relative conversion, smoothing and
//! propagation into torso/shoulder/hip offsets.

use std::f32::consts::PI;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aim::limits::JointLimits;
use crate::rig::math::{normalize_rad, rad_to_deg, shortest_delta_rad, smoothing_factor};
use crate::rig::{Joint, Pose};
use crate::roster::FighterRole;

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AimTuning {
    /// Exponential approach rate per second.
    pub smoothing: f32,
    /// Joystick magnitudes below this are ignored.
    pub joystick_dead_zone: f32,
    pub head_limits: JointLimits,
    pub head_weight: f32,
    pub torso_weight: f32,
    pub shoulder_weight: f32,
    /// Fraction of the torso offset the hips counter-rotate by.
    pub hip_counter: f32,
}

impl Default for AimTuning {
    fn default() -> Self {
        Self {
            smoothing: 12.0,
            joystick_dead_zone: 0.2,
            head_limits: JointLimits::default(),
            head_weight: 0.6,
            torso_weight: 0.25,
            shoulder_weight: 0.15,
            hip_counter: 1.0,
        }
    }
}

/// Explicit orientation override; always beats input-derived aiming.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaceLock {
    /// Fixed world angle (radians, 0 = +x, counter-clockwise).
    Angle(f32),
    /// World point to look at from the head.
    Point(Vec2),
}

impl FaceLock {
    pub fn world_angle(&self, head: Vec2) -> Option<f32> {
        let angle = match *self {
            FaceLock::Angle(angle) => angle,
            FaceLock::Point(point) => {
                let to = point - head;
                if to.length_squared() <= f32::EPSILON {
                    return None;
                }
                to.y.atan2(to.x)
            }
        };
        angle.is_finite().then_some(angle)
    }
}

/// Aim inputs produced by the input layer for one fighter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AimInput {
    pub joystick: Option<Vec2>,
    pub pointer: Option<Vec2>,
}

#[derive(Component, Debug, Clone, Default)]
pub struct AimState {
    pub face_lock: Option<FaceLock>,
    /// Input aiming switched off by gameplay; face locks still apply.
    pub disabled: bool,
    /// Smoothed head angle relative to forward (radians, positive = up).
    pub applied_rad: f32,
    /// Last clamped target, if any.
    pub target_rad: Option<f32>,
}

impl AimState {
    pub fn lock(&mut self, lock: FaceLock) {
        self.face_lock = Some(lock);
    }

    pub fn unlock(&mut self) {
        self.face_lock = None;
    }
}

/// Convert a world aim angle to a head angle relative to forward.
///
/// Facing right keeps the world angle; facing left mirrors it about the vertical
/// axis, so mirrored targets produce identical relative angles.
pub fn convert_aim_to_head_rad(world_angle: f32, facing_sign: f32) -> f32 {
    if facing_sign < 0.0 {
        normalize_rad(PI - world_angle)
    } else {
        normalize_rad(world_angle)
    }
}

/// World angle the fighter should look toward this frame, by priority.
pub fn select_world_target(
    state: &AimState,
    input: Option<&AimInput>,
    pose_aim_disabled: bool,
    head: Vec2,
    dead_zone: f32,
) -> Option<f32> {
    if let Some(lock) = state.face_lock {
        return lock.world_angle(head);
    }
    if state.disabled || pose_aim_disabled {
        return None;
    }
    let input = input?;
    if let Some(stick) = input.joystick {
        if stick.is_finite() && stick.length() > dead_zone {
            return Some(stick.y.atan2(stick.x));
        }
    }
    let pointer = input.pointer?;
    let to = pointer - head;
    if !to.is_finite() || to.length_squared() <= f32::EPSILON {
        return None;
    }
    Some(to.y.atan2(to.x))
}

/// Per-frame aim update for one fighter. Players read their input, NPCs rely on
/// face locks set by their controller.
#[allow(clippy::too_many_arguments)]
pub fn update_aiming(
    state: &mut AimState,
    role: FighterRole,
    input: &AimInput,
    pose_aim_disabled: bool,
    facing_sign: f32,
    head: Vec2,
    tuning: &AimTuning,
    dt: f32,
) {
    let input = match role {
        FighterRole::Player => Some(input),
        FighterRole::Npc => None,
    };
    let world = select_world_target(state, input, pose_aim_disabled, head, tuning.joystick_dead_zone);
    let target = world
        .map(|angle| convert_aim_to_head_rad(angle, facing_sign))
        .map(|relative| tuning.head_limits.clamp_rad(relative));
    state.target_rad = target;

    let goal = target.unwrap_or(0.0);
    let k = smoothing_factor(tuning.smoothing, dt);
    let step = shortest_delta_rad(state.applied_rad, goal) * k;
    if step.is_finite() {
        state.applied_rad = normalize_rad(state.applied_rad + step);
    }
}

/// Joint offsets (degrees) produced by the applied aim angle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AimOffsets {
    pub head: f32,
    pub torso: f32,
    pub shoulders: f32,
    pub hips: f32,
}

impl AimOffsets {
    /// Looking up tilts back, i.e. away from facing, hence the sign flip.
    pub fn from_applied(applied_rad: f32, tuning: &AimTuning) -> Self {
        let total = -rad_to_deg(applied_rad);
        if !total.is_finite() {
            return Self::default();
        }
        let torso = total * tuning.torso_weight;
        Self {
            head: total * tuning.head_weight,
            torso,
            shoulders: total * tuning.shoulder_weight,
            hips: -torso * tuning.hip_counter,
        }
    }

    pub fn apply(&self, pose: &mut Pose) {
        pose.add(Joint::Torso, self.torso);
        pose.add(Joint::Head, self.head);
        pose.add(Joint::LeftShoulder, self.shoulders);
        pose.add(Joint::RightShoulder, self.shoulders);
        pose.add(Joint::LeftHip, self.hips);
        pose.add(Joint::RightHip, self.hips);
    }
}
