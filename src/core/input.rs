//! Core domain: per-fighter input flags written by the input layer or the AI.

use bevy::prelude::*;

use crate::aim::AimInput;
use crate::movement::Facing;

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct FighterInput {
    /// Movement stick; only x drives locomotion.
    pub axis: Vec2,
    pub jump_pressed: bool,
    pub dash_pressed: bool,
    /// Loadout slot pressed this frame.
    pub ability_pressed: Option<usize>,
    /// Loadout slot released this frame.
    pub ability_released: Option<usize>,
    /// Facing to adopt when the stick is idle.
    pub face_toward: Option<Facing>,
    pub aim: AimInput,
}

impl FighterInput {
    /// Drop the one-shot flags once a frame has consumed them.
    pub fn clear_one_shots(&mut self) {
        self.jump_pressed = false;
        self.dash_pressed = false;
        self.ability_pressed = None;
        self.ability_released = None;
    }
}
