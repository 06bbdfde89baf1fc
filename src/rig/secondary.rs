//! Rig domain: velocity-driven secondary limb motion layered over the pose.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rig::math::smoothing_factor;
use crate::rig::pose::{Joint, Pose};

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecondaryTuning {
    /// Knee bend (degrees) at full airborne speed.
    pub max_knee_tuck_deg: f32,
    /// Arm trail (degrees) at full horizontal speed.
    pub max_arm_sway_deg: f32,
    /// Vertical speed that maps to a full tuck.
    pub tuck_reference_speed: f32,
    /// Horizontal speed that maps to a full sway.
    pub sway_reference_speed: f32,
    /// Exponential smoothing rate per second.
    pub smoothing: f32,
    /// 0 disables the layer, 1 applies it fully.
    pub blend_weight: f32,
}

impl Default for SecondaryTuning {
    fn default() -> Self {
        Self {
            max_knee_tuck_deg: 35.0,
            max_arm_sway_deg: 12.0,
            tuck_reference_speed: 680.0,
            sway_reference_speed: 320.0,
            smoothing: 10.0,
            blend_weight: 1.0,
        }
    }
}

/// Smoothed secondary offsets of one fighter.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct SecondaryMotion {
    pub knee_tuck_deg: f32,
    pub arm_sway_deg: f32,
}

impl SecondaryMotion {
    /// Move the offsets toward the targets implied by `velocity`.
    pub fn update(&mut self, velocity: Vec2, on_ground: bool, facing_sign: f32, tuning: &SecondaryTuning, dt: f32) {
        let target_tuck = if on_ground || tuning.tuck_reference_speed <= 0.0 {
            0.0
        } else {
            (velocity.y.abs() / tuning.tuck_reference_speed).clamp(0.0, 1.0) * tuning.max_knee_tuck_deg
        };
        // Arms trail behind the direction of travel, measured in facing space.
        let target_sway = if tuning.sway_reference_speed <= 0.0 {
            0.0
        } else {
            (velocity.x * facing_sign / tuning.sway_reference_speed).clamp(-1.0, 1.0)
                * tuning.max_arm_sway_deg
        };

        let k = smoothing_factor(tuning.smoothing, dt);
        if target_tuck.is_finite() {
            self.knee_tuck_deg += (target_tuck - self.knee_tuck_deg) * k;
        }
        if target_sway.is_finite() {
            self.arm_sway_deg += (target_sway - self.arm_sway_deg) * k;
        }
    }

    /// Add the weighted offsets to a pose.
    pub fn apply(&self, pose: &mut Pose, weight: f32) {
        let weight = weight.clamp(0.0, 1.0);
        let tuck = self.knee_tuck_deg * weight;
        let sway = self.arm_sway_deg * weight;
        // Thighs swing forward, shins fold back.
        for hip in [Joint::LeftHip, Joint::RightHip] {
            pose.add(hip, -tuck * 0.6);
        }
        for knee in [Joint::LeftKnee, Joint::RightKnee] {
            pose.add(knee, tuck);
        }
        for shoulder in [Joint::LeftShoulder, Joint::RightShoulder] {
            pose.add(shoulder, sway);
        }
    }
}
