//! Rig domain: bone lengths, world-space bones and forward kinematics.

use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, PI};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rig::math::{deg_to_rad, joint_direction};
use crate::rig::pose::{Joint, Pose};

/// Unscaled bone lengths of a fighter rig (world units at actor scale 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BoneLengths {
    pub torso: f32,
    pub head: f32,
    pub upper_arm: f32,
    pub forearm: f32,
    pub hand: f32,
    pub thigh: f32,
    pub shin: f32,
    pub foot: f32,
    pub weapon: f32,
}

impl Default for BoneLengths {
    fn default() -> Self {
        Self {
            torso: 46.0,
            head: 18.0,
            upper_arm: 26.0,
            forearm: 24.0,
            hand: 8.0,
            thigh: 30.0,
            shin: 28.0,
            foot: 12.0,
            weapon: 0.0,
        }
    }
}

impl BoneLengths {
    pub fn for_joint(&self, joint: Joint) -> f32 {
        match joint {
            Joint::Torso => self.torso,
            Joint::Head => self.head,
            Joint::LeftShoulder | Joint::RightShoulder => self.upper_arm,
            Joint::LeftElbow | Joint::RightElbow => self.forearm,
            Joint::LeftHand | Joint::RightHand => self.hand,
            Joint::LeftHip | Joint::RightHip => self.thigh,
            Joint::LeftKnee | Joint::RightKnee => self.shin,
            Joint::LeftFoot | Joint::RightFoot => self.foot,
            Joint::Weapon => self.weapon,
        }
    }

    pub fn scaled(&self, scale: f32) -> Self {
        Self {
            torso: self.torso * scale,
            head: self.head * scale,
            upper_arm: self.upper_arm * scale,
            forearm: self.forearm * scale,
            hand: self.hand * scale,
            thigh: self.thigh * scale,
            shin: self.shin * scale,
            foot: self.foot * scale,
            weapon: self.weapon * scale,
        }
    }
}

/// One world-space bone. `angle` is the absolute joint angle (0 = up) already
/// composed through the parent chain; facing is applied when projecting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bone {
    pub base: Vec2,
    pub angle: f32,
    pub length: f32,
    pub facing_sign: f32,
    /// Explicit end point, when known. Consumers fall back to projecting.
    pub end: Option<Vec2>,
}

impl Bone {
    /// End point from `end` when finite, else projected from base/angle/length.
    /// `None` when neither is resolvable.
    pub fn resolved_end(&self) -> Option<Vec2> {
        if let Some(end) = self.end {
            if end.is_finite() {
                return Some(end);
            }
        }
        let inputs_finite = self.base.is_finite()
            && self.angle.is_finite()
            && self.length.is_finite()
            && self.facing_sign.is_finite();
        if !inputs_finite {
            return None;
        }
        let end = self.base + joint_direction(self.angle, self.facing_sign) * self.length;
        end.is_finite().then_some(end)
    }
}

/// Per-frame bone set of one fighter; what a renderer draws.
#[derive(Component, Debug, Clone, Default)]
pub struct Bones {
    bones: HashMap<Joint, Bone>,
}

impl Bones {
    pub fn get(&self, joint: Joint) -> Option<&Bone> {
        self.bones.get(&joint)
    }

    pub fn insert(&mut self, joint: Joint, bone: Bone) {
        self.bones.insert(joint, bone);
    }

    pub fn clear(&mut self) {
        self.bones.clear();
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Base of the head bone, i.e. the neck.
    pub fn neck(&self) -> Option<Vec2> {
        self.get(Joint::Head).map(|bone| bone.base)
    }
}

/// How each joint hangs off its parent: parent joint and the rest offset (radians)
/// added on top of the parent's absolute angle.
fn parent_of(joint: Joint) -> Option<(Joint, f32)> {
    match joint {
        Joint::Torso => None,
        Joint::Head => Some((Joint::Torso, 0.0)),
        Joint::LeftShoulder | Joint::RightShoulder => Some((Joint::Torso, PI)),
        Joint::LeftElbow => Some((Joint::LeftShoulder, 0.0)),
        Joint::RightElbow => Some((Joint::RightShoulder, 0.0)),
        Joint::LeftHand => Some((Joint::LeftElbow, 0.0)),
        Joint::RightHand => Some((Joint::RightElbow, 0.0)),
        Joint::LeftHip | Joint::RightHip => Some((Joint::Torso, PI)),
        Joint::LeftKnee => Some((Joint::LeftHip, 0.0)),
        Joint::RightKnee => Some((Joint::RightHip, 0.0)),
        Joint::LeftFoot => Some((Joint::LeftKnee, -FRAC_PI_2)),
        Joint::RightFoot => Some((Joint::RightKnee, -FRAC_PI_2)),
        Joint::Weapon => Some((Joint::RightHand, 0.0)),
    }
}

/// Where a joint's bone starts relative to its parent bone.
enum Anchor {
    Root,
    ParentBase,
    ParentEnd,
}

fn anchor_of(joint: Joint) -> Anchor {
    match joint {
        Joint::Torso => Anchor::Root,
        // Legs hang from the hip root, which is the torso base.
        Joint::LeftHip | Joint::RightHip => Anchor::ParentBase,
        _ => Anchor::ParentEnd,
    }
}

/// Forward kinematics: compose parent-relative pose angles down the bone tree
/// starting at `root` (the hip centre) and mirror by `facing_sign`.
///
/// `Joint::ALL` is ordered parents-first, so one pass suffices.
pub fn solve_bones(root: Vec2, pose: &Pose, lengths: &BoneLengths, facing_sign: f32, out: &mut Bones) {
    out.clear();
    let facing_sign = if facing_sign < 0.0 { -1.0 } else { 1.0 };

    for joint in Joint::ALL {
        let local = deg_to_rad(pose.get(joint));
        let (base, angle) = match (parent_of(joint), anchor_of(joint)) {
            (None, _) | (_, Anchor::Root) => (root, local),
            (Some((parent, rest)), anchor) => {
                let Some(parent_bone) = out.get(parent).copied() else {
                    continue;
                };
                let base = match anchor {
                    Anchor::ParentBase => parent_bone.base,
                    _ => parent_bone.resolved_end().unwrap_or(parent_bone.base),
                };
                (base, parent_bone.angle + rest + local)
            }
        };

        let length = lengths.for_joint(joint);
        let mut bone = Bone {
            base,
            angle,
            length,
            facing_sign,
            end: None,
        };
        bone.end = bone.resolved_end();
        out.insert(joint, bone);
    }
}
