//! Combat domain: stamina pool drained by attacking.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    /// Units per second spent while an attack is active.
    pub drain_per_sec: f32,
    /// Units per second recovered otherwise.
    pub regen_per_sec: f32,
}

impl Default for Stamina {
    fn default() -> Self {
        Self::new(100.0, 25.0, 18.0)
    }
}

impl Stamina {
    pub fn new(max: f32, drain_per_sec: f32, regen_per_sec: f32) -> Self {
        Self {
            current: max,
            max,
            drain_per_sec,
            regen_per_sec,
        }
    }

    /// One frame of accounting; the pool stays within [0, max].
    pub fn tick(&mut self, dt: f32, attacking: bool) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let rate = if attacking {
            -self.drain_per_sec
        } else {
            self.regen_per_sec
        };
        if !rate.is_finite() {
            return;
        }
        self.current = (self.current + rate * dt).clamp(0.0, self.max.max(0.0));
    }

    pub fn is_exhausted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0.0 { 0.0 } else { self.current / self.max }
    }
}
