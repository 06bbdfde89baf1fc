//! Combat domain: limb-end collider sampling from bone geometry.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::rig::{Bones, Joint};
use crate::roster::FighterId;

/// The four limb-end colliders a fighter can strike with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum ColliderKey {
    HandL,
    HandR,
    FootL,
    FootR,
}

impl ColliderKey {
    pub const ALL: [ColliderKey; 4] = [
        ColliderKey::HandL,
        ColliderKey::HandR,
        ColliderKey::FootL,
        ColliderKey::FootR,
    ];

    /// Bone whose end point the collider sits on.
    pub fn joint(self) -> Joint {
        match self {
            ColliderKey::HandL => Joint::LeftHand,
            ColliderKey::HandR => Joint::RightHand,
            ColliderKey::FootL => Joint::LeftFoot,
            ColliderKey::FootR => Joint::RightFoot,
        }
    }

    pub fn is_hand(self) -> bool {
        matches!(self, ColliderKey::HandL | ColliderKey::HandR)
    }
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColliderTuning {
    /// Radius at actor scale 1.0 before the per-limb multiplier.
    pub base_radius: f32,
    pub hand_multiplier: f32,
    pub foot_multiplier: f32,
}

impl Default for ColliderTuning {
    fn default() -> Self {
        Self {
            base_radius: 10.0,
            hand_multiplier: 1.0,
            foot_multiplier: 1.2,
        }
    }
}

impl ColliderTuning {
    pub fn radius(&self, key: ColliderKey, actor_scale: f32) -> Option<f32> {
        let multiplier = if key.is_hand() {
            self.hand_multiplier
        } else {
            self.foot_multiplier
        };
        let radius = self.base_radius * actor_scale * multiplier;
        (radius.is_finite() && radius >= 0.0).then_some(radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderSample {
    pub point: Vec2,
    pub radius: f32,
}

/// One fighter's limb colliders; `None` marks a limb that could not be resolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LimbColliders {
    samples: HashMap<ColliderKey, Option<ColliderSample>>,
}

impl LimbColliders {
    pub fn get(&self, key: ColliderKey) -> Option<ColliderSample> {
        self.samples.get(&key).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColliderKey, Option<ColliderSample>)> + '_ {
        self.samples.iter().map(|(key, sample)| (*key, *sample))
    }
}

/// Sample a single limb without touching the bones.
pub fn sample_limb(bones: &Bones, key: ColliderKey, actor_scale: f32, tuning: &ColliderTuning) -> Option<ColliderSample> {
    let bone = bones.get(key.joint())?;
    let point = bone.resolved_end()?;
    let radius = tuning.radius(key, actor_scale)?;
    Some(ColliderSample { point, radius })
}

/// Per-fighter collider samples, overwritten every frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct ColliderSamples {
    by_fighter: HashMap<FighterId, LimbColliders>,
}

impl ColliderSamples {
    pub fn sample(&mut self, fighter: FighterId, bones: &Bones, actor_scale: f32, tuning: &ColliderTuning) {
        let samples = ColliderKey::ALL
            .into_iter()
            .map(|key| (key, sample_limb(bones, key, actor_scale, tuning)))
            .collect();
        self.by_fighter.insert(fighter, LimbColliders { samples });
    }

    pub fn get(&self, fighter: FighterId) -> Option<&LimbColliders> {
        self.by_fighter.get(&fighter)
    }

    /// Drop samples of fighters that are no longer in the roster.
    pub fn prune(&mut self, active: &HashSet<FighterId>) {
        self.by_fighter.retain(|id, _| active.contains(id));
    }

    pub fn len(&self) -> usize {
        self.by_fighter.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fighter.is_empty()
    }
}
