//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::colliders::ColliderKey;
use crate::roster::FighterId;

#[derive(Debug, Clone)]
pub struct AttackStartedEvent {
    pub entity: Entity,
    pub fighter: FighterId,
    pub ability_id: String,
    pub move_id: String,
}

impl Message for AttackStartedEvent {}

#[derive(Debug, Clone)]
pub struct AttackFinishedEvent {
    pub entity: Entity,
    pub fighter: FighterId,
    pub ability_id: String,
    pub cancelled: bool,
}

impl Message for AttackFinishedEvent {}

/// First scoring collision of a strike phase.
#[derive(Debug, Clone)]
pub struct HitLandedEvent {
    pub attacker: Entity,
    pub defender: Entity,
    pub attacker_id: FighterId,
    pub defender_id: FighterId,
    pub phase: String,
    pub keys: Vec<ColliderKey>,
    /// The hit took the defender's health to zero.
    pub knocked_out: bool,
}

impl Message for HitLandedEvent {}

/// A strike that met a guarding defender.
#[derive(Debug, Clone)]
pub struct HitBlockedEvent {
    pub attacker: Entity,
    pub defender: Entity,
    pub attacker_id: FighterId,
    pub defender_id: FighterId,
}

impl Message for HitBlockedEvent {}

#[derive(Debug, Clone, Copy)]
pub struct FighterDownEvent {
    pub entity: Entity,
    pub fighter: FighterId,
}

impl Message for FighterDownEvent {}
