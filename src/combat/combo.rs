//! Combat domain: combo windows and hold-release charging.

use bevy::prelude::*;

use crate::content::{AbilityDef, TriggerKind};

/// Index after `index` in a sequence of `len` moves, wrapping to `loop_from`.
pub fn advance_combo_index(index: usize, len: usize, loop_from: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = index + 1;
    if next >= len { loop_from.min(len - 1) } else { next }
}

/// Where a fighter is inside a combo ability.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ComboState {
    /// Ability of the running or last finished move.
    pub ability_id: Option<String>,
    /// Index of the running move, or of the next move while the window is open.
    pub index: usize,
    /// Time left to chain the next move; 0 when closed.
    pub window_ms: f32,
}

impl ComboState {
    pub fn window_open(&self) -> bool {
        self.window_ms > 0.0
    }

    /// Pick the move index for a press of `ability` and remember it as running.
    pub fn select(&mut self, ability: &AbilityDef) -> usize {
        let chained = ability.trigger == TriggerKind::Combo
            && self.window_open()
            && self.ability_id.as_deref() == Some(ability.id.as_str());
        let index = if chained && self.index < ability.sequence.len() {
            self.index
        } else {
            0
        };
        self.ability_id = Some(ability.id.clone());
        self.index = index;
        self.window_ms = 0.0;
        index
    }

    /// A move of `ability` ran to completion: open the window for the next one.
    pub fn finish(&mut self, ability: &AbilityDef) {
        if ability.trigger != TriggerKind::Combo || ability.combo_window_ms <= 0.0 {
            self.reset();
            return;
        }
        self.index = advance_combo_index(self.index, ability.sequence.len(), ability.loop_from);
        self.window_ms = ability.combo_window_ms;
    }

    pub fn reset(&mut self) {
        self.ability_id = None;
        self.index = 0;
        self.window_ms = 0.0;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.window_ms > 0.0 {
            self.window_ms -= dt * 1000.0;
            if self.window_ms <= 0.0 {
                self.reset();
            }
        }
    }
}

/// Charge fraction of a hold, clamped to [0, 1].
pub fn charge_fraction(held_ms: f32, max_charge_ms: f32) -> f32 {
    if !held_ms.is_finite() || !max_charge_ms.is_finite() || max_charge_ms <= 0.0 {
        return 0.0;
    }
    (held_ms / max_charge_ms).clamp(0.0, 1.0)
}

/// Damage multiplier of a released charge.
pub fn charge_damage_scale(held_ms: f32, ability: &AbilityDef) -> f32 {
    let bonus = if ability.charge_damage_bonus.is_finite() {
        ability.charge_damage_bonus
    } else {
        0.0
    };
    1.0 + charge_fraction(held_ms, ability.max_charge_ms) * bonus
}

/// A hold-release ability being charged.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct ChargeState {
    pub ability_id: Option<String>,
    pub held_ms: f32,
}

impl ChargeState {
    pub fn is_charging(&self) -> bool {
        self.ability_id.is_some()
    }

    pub fn begin(&mut self, ability_id: &str) {
        self.ability_id = Some(ability_id.to_string());
        self.held_ms = 0.0;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.is_charging() && dt.is_finite() && dt > 0.0 {
            self.held_ms += dt * 1000.0;
        }
    }

    /// Stop charging; returns the ability and how long it was held.
    pub fn release(&mut self) -> Option<(String, f32)> {
        let id = self.ability_id.take()?;
        let held = std::mem::take(&mut self.held_ms);
        Some((id, held))
    }

    pub fn cancel(&mut self) {
        self.ability_id = None;
        self.held_ms = 0.0;
    }
}
