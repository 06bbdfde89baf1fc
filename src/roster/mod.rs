//! Roster domain: fighter identity, spawning, removal and reset.

mod components;
mod events;
mod spawn;
mod systems;


pub use components::{Fighter, FighterBody, FighterId, FighterRole, Loadout, Roster};
pub use events::{RemoveFighterEvent, RosterResetEvent, SpawnFighterEvent};
pub use spawn::{FighterBundle, spawn_fighter};

use bevy::prelude::*;

use crate::core::{SimSet, StartupSet};
use crate::roster::systems::{handle_roster_events, spawn_lineup};

pub struct RosterPlugin;

impl Plugin for RosterPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Roster>()
            .add_message::<SpawnFighterEvent>()
            .add_message::<RemoveFighterEvent>()
            .add_message::<RosterResetEvent>()
            .add_systems(Startup, spawn_lineup.in_set(StartupSet::Spawn))
            .add_systems(Update, handle_roster_events.in_set(SimSet::Input));
    }
}
