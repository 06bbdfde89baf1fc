//! Roster domain: spawn, removal and reset requests.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::Facing;
use crate::roster::components::{FighterId, FighterRole};

#[derive(Debug, Clone)]
pub struct SpawnFighterEvent {
    pub def_id: String,
    pub role: FighterRole,
    pub position: Vec2,
    pub facing: Facing,
}

impl Message for SpawnFighterEvent {}

#[derive(Debug, Clone, Copy)]
pub struct RemoveFighterEvent {
    pub id: FighterId,
}

impl Message for RemoveFighterEvent {}

/// Despawn every fighter and clear the roster.
#[derive(Debug, Clone, Copy, Default)]
pub struct RosterResetEvent;

impl Message for RosterResetEvent {}
