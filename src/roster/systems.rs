//! Roster domain: startup lineup and spawn/removal/reset handling.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::content::ContentRegistry;
use crate::core::RunConfig;
use crate::roster::components::Roster;
use crate::roster::events::{RemoveFighterEvent, RosterResetEvent, SpawnFighterEvent};
use crate::roster::spawn::spawn_fighter;

pub(crate) fn spawn_lineup(
    mut commands: Commands,
    config: Res<RunConfig>,
    registry: Res<ContentRegistry>,
    mut roster: ResMut<Roster>,
) {
    for entry in &config.lineup {
        spawn_fighter(
            &mut commands,
            &mut roster,
            &registry,
            &entry.def_id,
            entry.role,
            entry.position,
            entry.facing,
        );
    }
}

/// Resets are handled first so a reset and a spawn in the same frame leave the new
/// fighter standing.
pub(crate) fn handle_roster_events(
    mut commands: Commands,
    registry: Res<ContentRegistry>,
    mut roster: ResMut<Roster>,
    mut resets: MessageReader<RosterResetEvent>,
    mut removals: MessageReader<RemoveFighterEvent>,
    mut spawns: MessageReader<SpawnFighterEvent>,
) {
    if resets.read().count() > 0 {
        let drained = roster.drain();
        info!("Roster reset: despawning {} fighters", drained.len());
        for (_, entity) in drained {
            commands.entity(entity).despawn();
        }
    }

    for event in removals.read() {
        match roster.remove(event.id) {
            Some(entity) => {
                debug!("Removing fighter {}", event.id);
                commands.entity(entity).despawn();
            }
            None => debug!("Remove requested for unknown fighter {}", event.id),
        }
    }

    for event in spawns.read() {
        spawn_fighter(
            &mut commands,
            &mut roster,
            &registry,
            &event.def_id,
            event.role,
            event.position,
            event.facing,
        );
    }
}
