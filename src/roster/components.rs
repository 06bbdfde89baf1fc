//! Roster domain: fighter identity and body profile.

use std::collections::HashMap;
use std::fmt;

use bevy::prelude::*;

use crate::rig::BoneLengths;

/// Stable fighter identity; never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FighterId(pub u32);

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FighterRole {
    #[default]
    Player,
    Npc,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Fighter {
    pub id: FighterId,
    /// Content id of the `FighterDef` this fighter was built from.
    pub def_id: String,
    pub role: FighterRole,
}

/// Scale and proportions used by the rig, collider sampler and hit detection.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct FighterBody {
    pub actor_scale: f32,
    /// Unscaled body hitbox height.
    pub hitbox_height: f32,
    pub lengths: BoneLengths,
}

impl Default for FighterBody {
    fn default() -> Self {
        Self {
            actor_scale: 1.0,
            hitbox_height: 120.0,
            lengths: BoneLengths::default(),
        }
    }
}

/// Abilities a fighter can trigger by slot, plus its rest pose.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Loadout {
    pub abilities: Vec<String>,
    pub stance_pose: String,
}

impl Loadout {
    pub fn ability(&self, slot: usize) -> Option<&str> {
        self.abilities.get(slot).map(String::as_str)
    }
}

/// Live fighters by id. Ids are handed out monotonically.
#[derive(Resource, Debug, Default)]
pub struct Roster {
    entities: HashMap<FighterId, Entity>,
    next_id: u32,
}

impl Roster {
    pub fn allocate(&mut self) -> FighterId {
        let id = FighterId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn register(&mut self, id: FighterId, entity: Entity) {
        self.entities.insert(id, entity);
    }

    pub fn remove(&mut self, id: FighterId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn entity(&self, id: FighterId) -> Option<Entity> {
        self.entities.get(&id).copied()
    }

    /// Forget every fighter; ids keep counting up.
    pub fn drain(&mut self) -> Vec<(FighterId, Entity)> {
        self.entities.drain().collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
