//! Data definitions for all content files.
//!
//! These structs mirror the structure in assets/data/*.ron (or .json) and are
//! used for deserialization. The ContentRegistry provides lookup by id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::aim::AimTuning;
use crate::camera::CameraTuning;
use crate::combat::{ColliderKey, ColliderTuning, HitTuning, SparringTuning};
use crate::movement::MovementTuning;
use crate::rig::{BoneLengths, SecondaryTuning};

// ============================================================================
// Common wrapper for list files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Fighters (fighters.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FighterDef {
    pub id: String,
    pub name: String,
    #[serde(default = "default_actor_scale")]
    pub actor_scale: f32,
    /// Unscaled height of the body hitbox.
    pub hitbox_height: f32,
    pub max_health: f32,
    #[serde(default)]
    pub bone_lengths: BoneLengths,
    pub stance_pose: String,
    pub ability_ids: Vec<String>,
    pub stamina: StaminaDef,
}

fn default_actor_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaminaDef {
    pub max: f32,
    pub drain_per_sec: f32,
    pub regen_per_sec: f32,
}

// ============================================================================
// Poses (poses.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PoseDef {
    pub id: String,
    /// Joint tag -> degrees. Tags accept `left_elbow`, `l_elbow` or `LeftElbow`.
    pub angles: HashMap<String, f32>,
    #[serde(default)]
    pub aim_disabled: bool,
    #[serde(default)]
    pub mirror: bool,
}

// ============================================================================
// Moves (moves.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveDef {
    pub id: String,
    pub name: String,
    pub phases: Vec<PhaseDef>,
    pub colliders: Vec<ColliderKey>,
    #[serde(default)]
    pub damage: f32,
    #[serde(default)]
    pub knockback: f32,
    /// Extra hit windows inside this move (multi-hit strikes).
    #[serde(default)]
    pub sequence: Vec<SequenceStepDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhaseDef {
    pub phase: String,
    pub pose_id: String,
    pub duration_ms: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SequenceStepDef {
    pub offset_ms: f32,
    pub move_id: String,
    #[serde(default)]
    pub colliders: Option<Vec<ColliderKey>>,
}

// ============================================================================
// Abilities (abilities.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum TriggerKind {
    #[default]
    Single,
    Combo,
    HoldRelease,
    Defensive,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AbilityDef {
    pub id: String,
    pub name: String,
    pub trigger: TriggerKind,
    /// Move ids; combos walk them in order.
    pub sequence: Vec<String>,
    /// Index combos wrap back to after the last move.
    #[serde(default)]
    pub loop_from: usize,
    #[serde(default)]
    pub combo_window_ms: f32,
    #[serde(default)]
    pub max_charge_ms: f32,
    #[serde(default)]
    pub charge_damage_bonus: f32,
}

// ============================================================================
// Balance (balance.ron, single struct)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BalanceDef {
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub aim: AimTuning,
    #[serde(default)]
    pub colliders: ColliderTuning,
    #[serde(default)]
    pub hits: HitTuning,
    #[serde(default)]
    pub movement: MovementTuning,
    #[serde(default)]
    pub secondary: SecondaryTuning,
    #[serde(default)]
    pub sparring: SparringTuning,
    #[serde(default)]
    pub camera: CameraTuning,
}
