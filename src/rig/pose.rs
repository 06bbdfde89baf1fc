//! Rig domain: joints and pose keyframes.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::rig::math::{Side, resolve_mirror_tag, split_side_tag};

/// Named joints of the fighter rig. Each joint drives the bone that starts at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Joint {
    Torso,
    Head,
    LeftShoulder,
    LeftElbow,
    LeftHand,
    RightShoulder,
    RightElbow,
    RightHand,
    LeftHip,
    LeftKnee,
    LeftFoot,
    RightHip,
    RightKnee,
    RightFoot,
    Weapon,
}

impl Joint {
    pub const COUNT: usize = 15;

    pub const ALL: [Joint; Joint::COUNT] = [
        Joint::Torso,
        Joint::Head,
        Joint::LeftShoulder,
        Joint::LeftElbow,
        Joint::LeftHand,
        Joint::RightShoulder,
        Joint::RightElbow,
        Joint::RightHand,
        Joint::LeftHip,
        Joint::LeftKnee,
        Joint::LeftFoot,
        Joint::RightHip,
        Joint::RightKnee,
        Joint::RightFoot,
        Joint::Weapon,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Content tag, e.g. `left_elbow`.
    pub fn tag(self) -> &'static str {
        match self {
            Joint::Torso => "torso",
            Joint::Head => "head",
            Joint::LeftShoulder => "left_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::LeftHand => "left_hand",
            Joint::RightShoulder => "right_shoulder",
            Joint::RightElbow => "right_elbow",
            Joint::RightHand => "right_hand",
            Joint::LeftHip => "left_hip",
            Joint::LeftKnee => "left_knee",
            Joint::LeftFoot => "left_foot",
            Joint::RightHip => "right_hip",
            Joint::RightKnee => "right_knee",
            Joint::RightFoot => "right_foot",
            Joint::Weapon => "weapon",
        }
    }

    /// Parse any accepted spelling of a joint tag (`left_elbow`, `l_elbow`, `LeftElbow`).
    pub fn from_tag(tag: &str) -> Option<Joint> {
        let canonical = resolve_mirror_tag(tag, false);
        Joint::ALL.into_iter().find(|joint| joint.tag() == canonical)
    }

    pub fn side(self) -> Option<Side> {
        split_side_tag(self.tag()).map(|(side, _)| side)
    }

    /// The same joint on the other side of the body; unsided joints map to themselves.
    pub fn mirrored(self) -> Joint {
        Joint::from_tag(&resolve_mirror_tag(self.tag(), true)).unwrap_or(self)
    }
}

/// Parent-relative joint angles in degrees, authored for a right-facing fighter.
///
/// Arms and legs read 0 as hanging straight down from their parent, torso and
/// head read 0 as upright. Every joint turns the same way: positive is clockwise
/// for a right-facing fighter, so a shoulder at -90 holds the arm straight out
/// in front and a positive knee folds the shin back. Missing joints stay at 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    angles: [f32; Joint::COUNT],
}

impl Default for Pose {
    fn default() -> Self {
        Self::neutral()
    }
}

impl Pose {
    pub fn neutral() -> Self {
        Self {
            angles: [0.0; Joint::COUNT],
        }
    }

    /// Build a pose from content tags. Unknown tags and non-finite angles are skipped.
    pub fn from_tagged(angles: &HashMap<String, f32>) -> Self {
        let mut pose = Self::neutral();
        for (tag, angle) in angles {
            match Joint::from_tag(tag) {
                Some(joint) if angle.is_finite() => pose.set(joint, *angle),
                Some(joint) => warn!("Ignoring non-finite angle for joint {:?}", joint),
                None => warn!("Ignoring unknown joint tag '{}'", tag),
            }
        }
        pose
    }

    pub fn get(&self, joint: Joint) -> f32 {
        self.angles[joint.index()]
    }

    pub fn set(&mut self, joint: Joint, degrees: f32) {
        self.angles[joint.index()] = degrees;
    }

    pub fn add(&mut self, joint: Joint, degrees: f32) {
        self.angles[joint.index()] += degrees;
    }

    /// Swap every left/right joint pair.
    pub fn mirrored(&self) -> Self {
        let mut out = *self;
        for joint in Joint::ALL {
            out.set(joint.mirrored(), self.get(joint));
        }
        out
    }

    /// Per-joint linear blend; `t` is clamped to [0, 1].
    pub fn lerp(&self, other: &Pose, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut out = *self;
        for joint in Joint::ALL {
            let a = self.get(joint);
            let b = other.get(joint);
            out.set(joint, a + (b - a) * t);
        }
        out
    }
}

/// A resolved pose keyframe plus the flags content can attach to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseKeyframe {
    pub pose: Pose,
    /// Aiming is suppressed while this pose is the blend target.
    pub aim_disabled: bool,
    /// Swap left/right limbs while this pose is active.
    pub mirror: bool,
}

impl Default for PoseKeyframe {
    fn default() -> Self {
        Self {
            pose: Pose::neutral(),
            aim_disabled: false,
            mirror: false,
        }
    }
}
