//! Aim domain: joint-limit ranges with wrap-around normalization.

use serde::{Deserialize, Serialize};

use crate::rig::math::{deg_to_rad, normalize_deg};

/// Asymmetric limit relative to forward-facing, in degrees as authored.
///
/// Authored endpoints may sit anywhere on the circle; `[75, 270]` describes a
/// range that straddles the back of the character and resolves to `[-90, 75]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JointLimits {
    pub min_deg: f32,
    pub max_deg: f32,
}

impl Default for JointLimits {
    fn default() -> Self {
        Self {
            min_deg: -60.0,
            max_deg: 75.0,
        }
    }
}

impl JointLimits {
    pub fn new(min_deg: f32, max_deg: f32) -> Self {
        Self { min_deg, max_deg }
    }

    /// Both endpoints wrapped into (-180, 180] and ordered.
    pub fn normalized_deg(&self) -> (f32, f32) {
        let a = normalize_deg(self.min_deg);
        let b = normalize_deg(self.max_deg);
        if a <= b { (a, b) } else { (b, a) }
    }

    pub fn normalized_rad(&self) -> (f32, f32) {
        let (min, max) = self.normalized_deg();
        (deg_to_rad(min), deg_to_rad(max))
    }

    /// Clamp a forward-relative angle (radians). Non-finite limits leave the
    /// angle untouched.
    pub fn clamp_rad(&self, angle: f32) -> f32 {
        let (min, max) = self.normalized_rad();
        if !min.is_finite() || !max.is_finite() {
            return angle;
        }
        angle.clamp(min, max)
    }
}
