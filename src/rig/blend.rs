//! Rig domain: pose transitions driven by the attack timeline.

use bevy::prelude::*;

use crate::rig::math::smoothstep;
use crate::rig::pose::{Pose, PoseKeyframe};

/// Blends the fighter's pose from wherever it is toward the latest target keyframe.
#[derive(Component, Debug, Clone)]
pub struct PoseAnimator {
    from: Pose,
    target: PoseKeyframe,
    /// Phase name the target belongs to (for debugging and renderers).
    pub phase: String,
    duration_ms: f32,
    elapsed_ms: f32,
    current: Pose,
    /// Left/right limb swap requested by the active attack.
    pub mirrored: bool,
}

impl Default for PoseAnimator {
    fn default() -> Self {
        Self::at_rest(PoseKeyframe::default())
    }
}

impl PoseAnimator {
    pub fn at_rest(stance: PoseKeyframe) -> Self {
        Self {
            from: stance.pose,
            current: stance.pose,
            target: stance,
            phase: "Stance".to_string(),
            duration_ms: 0.0,
            elapsed_ms: 0.0,
            mirrored: false,
        }
    }

    /// Start blending toward `target` over `duration_ms`. Zero or invalid
    /// durations snap on the next tick.
    pub fn transition_to(&mut self, target: PoseKeyframe, phase: &str, duration_ms: f32) {
        self.from = self.current;
        if target.mirror {
            self.mirrored = true;
        }
        self.target = target;
        self.phase = phase.to_string();
        self.duration_ms = if duration_ms.is_finite() { duration_ms.max(0.0) } else { 0.0 };
        self.elapsed_ms = 0.0;
    }

    pub fn clear_mirror(&mut self) {
        self.mirrored = false;
    }

    pub fn tick(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed_ms += dt * 1000.0;
        }
        let t = if self.duration_ms <= 0.0 {
            1.0
        } else {
            smoothstep(self.elapsed_ms / self.duration_ms)
        };
        self.current = self.from.lerp(&self.target.pose, t);
    }

    /// Blended pose with the mirror override applied.
    pub fn current(&self) -> Pose {
        if self.mirrored {
            self.current.mirrored()
        } else {
            self.current
        }
    }

    pub fn aim_disabled(&self) -> bool {
        self.target.aim_disabled
    }

    pub fn is_settled(&self) -> bool {
        self.duration_ms <= 0.0 || self.elapsed_ms >= self.duration_ms
    }
}
