//! Combat domain: strike-gated circle hit detection.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::colliders::{ColliderKey, LimbColliders};
use crate::combat::components::{Health, HitCounters};
use crate::movement::{Facing, FighterMotion};
use crate::roster::FighterId;

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HitTuning {
    /// Body circle radius as a fraction of the scaled hitbox height.
    pub body_radius_fraction: f32,
    /// Displacement applied when an attack has no on-hit hook.
    pub default_knockback: f32,
    /// Time a struck fighter cannot start attacks.
    pub hit_stun_ms: f32,
}

impl Default for HitTuning {
    fn default() -> Self {
        Self {
            body_radius_fraction: 0.35,
            default_knockback: 6.0,
            hit_stun_ms: 220.0,
        }
    }
}

/// Whether a phase name opens the hit window. Substring match on purpose:
/// composite names like `ImpactStrike` count.
pub fn is_strike_phase(phase: &str) -> bool {
    phase.to_lowercase().contains("strike")
}

/// Defender body circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyCircle {
    pub center: Vec2,
    pub radius: f32,
}

impl BodyCircle {
    pub fn new(position: Vec2, hitbox_height: f32, actor_scale: f32, fraction: f32) -> Self {
        Self {
            center: position,
            radius: hitbox_height * actor_scale * fraction,
        }
    }
}

/// Circle overlap on squared distances.
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

/// Collider keys among `active` that overlap the body. Unresolved samples never hit.
pub fn colliding_keys(colliders: &LimbColliders, active: &[ColliderKey], body: &BodyCircle) -> Vec<ColliderKey> {
    if !body.center.is_finite() || !body.radius.is_finite() {
        return Vec::new();
    }
    active
        .iter()
        .copied()
        .filter(|key| {
            colliders
                .get(*key)
                .is_some_and(|sample| circles_overlap(sample.point, sample.radius, body.center, body.radius))
        })
        .collect()
}

/// Per-attacker "already scored this phase" bookkeeping.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct HitTracker {
    pub last_phase: Option<String>,
    pub scored: bool,
}

impl HitTracker {
    /// Track the attacker's current phase. Returns true when the hit window is
    /// open and nothing has scored in it yet.
    pub fn observe(&mut self, phase: Option<&str>) -> bool {
        if self.last_phase.as_deref() != phase {
            self.last_phase = phase.map(str::to_string);
            self.scored = false;
        }
        match phase {
            Some(name) => is_strike_phase(name) && !self.scored,
            None => false,
        }
    }

    pub fn mark_scored(&mut self) {
        self.scored = true;
    }
}

/// Mutable view of the defender handed to on-hit hooks.
pub struct HitTarget<'a> {
    pub id: FighterId,
    pub health: &'a mut Health,
    pub motion: &'a mut FighterMotion,
    pub attacker: FighterId,
    pub attacker_facing: Facing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HitError {
    /// The defender was already down when the hit landed.
    DefenderDown(FighterId),
    /// The hook computed a displacement that is not a finite number.
    InvalidKnockback { defender: FighterId, knockback: f32 },
}

impl fmt::Display for HitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitError::DefenderDown(id) => write!(f, "defender {} is already down", id),
            HitError::InvalidKnockback { defender, knockback } => {
                write!(f, "non-finite knockback {} on defender {}", knockback, defender)
            }
        }
    }
}

impl std::error::Error for HitError {}

/// Nudge the defender along the attacker's facing; used when no hook is set.
pub fn apply_default_knockback(motion: &mut FighterMotion, attacker_facing: Facing, distance: f32) {
    if distance.is_finite() {
        motion.position += attacker_facing.forward() * distance;
    }
}

/// Record a scored hit on the defender's counters.
pub fn record_hit(counters: &mut HitCounters, keys: &[ColliderKey]) {
    counters.body += 1;
    for key in keys {
        *counters.limbs.entry(*key).or_insert(0) += 1;
    }
}
