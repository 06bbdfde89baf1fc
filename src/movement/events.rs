//! Movement domain: movement-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// A fighter started a dash this frame; combat cancels its attack.
#[derive(Debug, Clone, Copy)]
pub struct DashStartedEvent {
    pub entity: Entity,
}

impl Message for DashStartedEvent {}
