//! Movement domain: fighter kinematic state.

use bevy::prelude::*;

use crate::rig::math::facing_basis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// World-space forward unit vector.
    pub fn forward(self) -> Vec2 {
        facing_basis(self.sign()).0
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }

    /// Facing for a horizontal direction; `None` when there is no clear direction.
    pub fn from_axis(x: f32) -> Option<Self> {
        if x > 0.1 {
            Some(Facing::Right)
        } else if x < -0.1 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

/// Simulation-side position/velocity of a fighter. `position` is the hip root.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct FighterMotion {
    pub position: Vec2,
    pub velocity: Vec2,
    pub on_ground: bool,
    pub facing: Facing,
    pub dash_timer: f32,
    pub dash_cooldown_timer: f32,
}

impl FighterMotion {
    pub fn at(position: Vec2, facing: Facing) -> Self {
        Self {
            position,
            facing,
            ..default()
        }
    }

    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0.0
    }
}
