//! Combat domain: per-fighter combat components.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::combat::colliders::ColliderKey;

/// Health of a fighter.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0.0;
        }
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0.0 { 0.0 } else { self.current / self.max }
    }
}

/// How often a fighter has been struck, in total and by attacking limb.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct HitCounters {
    pub body: u32,
    pub limbs: HashMap<ColliderKey, u32>,
}

impl HitCounters {
    pub fn by_limb(&self, key: ColliderKey) -> u32 {
        self.limbs.get(&key).copied().unwrap_or(0)
    }
}

/// Lockout after being struck; no new attacks while it runs.
#[derive(Component, Debug, Clone, Default)]
pub struct HitStun {
    pub timer_ms: f32,
}

impl HitStun {
    pub fn is_stunned(&self) -> bool {
        self.timer_ms > 0.0
    }

    pub fn stun(&mut self, duration_ms: f32) {
        if duration_ms.is_finite() {
            self.timer_ms = self.timer_ms.max(duration_ms);
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.timer_ms > 0.0 {
            self.timer_ms = (self.timer_ms - dt * 1000.0).max(0.0);
        }
    }
}
