//! ContentRegistry resource providing HashMap lookups for all loaded content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;
use crate::rig::{Pose, PoseKeyframe};

/// Central registry for all loaded fighter content.
/// Provides O(1) lookup by id for any content type.
#[derive(Resource, Debug, Clone, Default)]
pub struct ContentRegistry {
    pub fighters: HashMap<String, FighterDef>,
    pub poses: HashMap<String, PoseDef>,
    pub moves: HashMap<String, MoveDef>,
    pub abilities: HashMap<String, AbilityDef>,
}

impl ContentRegistry {
    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded:\n\
             - Fighters: {}\n\
             - Poses: {}\n\
             - Moves: {}\n\
             - Abilities: {}",
            self.fighters.len(),
            self.poses.len(),
            self.moves.len(),
            self.abilities.len(),
        )
    }

    /// Returns total count of all loaded items.
    pub fn total_count(&self) -> usize {
        self.fighters.len() + self.poses.len() + self.moves.len() + self.abilities.len()
    }

    /// Resolve a pose id into a keyframe the animator can blend to.
    pub fn pose_keyframe(&self, id: &str) -> Option<PoseKeyframe> {
        self.poses.get(id).map(|def| PoseKeyframe {
            pose: Pose::from_tagged(&def.angles),
            aim_disabled: def.aim_disabled,
            mirror: def.mirror,
        })
    }

    /// Move `index` of an ability's sequence.
    pub fn ability_move(&self, ability: &AbilityDef, index: usize) -> Option<&MoveDef> {
        ability.sequence.get(index).and_then(|id| self.moves.get(id))
    }

    pub fn insert_fighter(&mut self, def: FighterDef) {
        self.fighters.insert(def.id.clone(), def);
    }

    pub fn insert_pose(&mut self, def: PoseDef) {
        self.poses.insert(def.id.clone(), def);
    }

    pub fn insert_move(&mut self, def: MoveDef) {
        self.moves.insert(def.id.clone(), def);
    }

    pub fn insert_ability(&mut self, def: AbilityDef) {
        self.abilities.insert(def.id.clone(), def);
    }
}
