//! Movement domain: tuning resource.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub walk_speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    /// Height the hip root rests at when standing on the floor.
    pub ground_y: f32,
    pub dash_speed: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,
    /// Horizontal control while an attack is running (0 = rooted, 1 = full).
    pub attack_move_factor: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_speed: 320.0,
            jump_velocity: 680.0,
            gravity: 1800.0,
            ground_y: 0.0,
            dash_speed: 900.0,
            dash_time: 0.16,
            dash_cooldown: 0.35,
            attack_move_factor: 0.25,
        }
    }
}

impl MovementTuning {
    /// Peak height of a standing jump: h = v² / (2g).
    pub fn jump_height(&self) -> f32 {
        if self.gravity <= 0.0 {
            return f32::INFINITY;
        }
        self.jump_velocity * self.jump_velocity / (2.0 * self.gravity)
    }
}
