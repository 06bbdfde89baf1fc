//! Roster domain: building fighter entities from content definitions.

use bevy::prelude::*;

use crate::aim::AimState;
use crate::combat::{
    AttackTimeline, ChargeState, ComboState, Health, HitCounters, HitStun, HitTracker, SparringBrain,
    Stamina,
};
use crate::content::{ContentRegistry, FighterDef};
use crate::core::FighterInput;
use crate::movement::{Facing, FighterMotion};
use crate::rig::{Bones, PoseAnimator, PoseKeyframe, SecondaryMotion};
use crate::roster::components::{Fighter, FighterBody, FighterId, FighterRole, Loadout, Roster};

/// Everything a fighter entity carries.
#[derive(Bundle)]
pub struct FighterBundle {
    pub fighter: Fighter,
    pub body: FighterBody,
    pub loadout: Loadout,
    pub motion: FighterMotion,
    pub input: FighterInput,
    pub timeline: AttackTimeline,
    pub animator: PoseAnimator,
    pub aim: AimState,
    pub bones: Bones,
    pub secondary: SecondaryMotion,
    pub health: Health,
    pub counters: HitCounters,
    pub stun: HitStun,
    pub tracker: HitTracker,
    pub stamina: Stamina,
    pub combo: ComboState,
    pub charge: ChargeState,
    pub transform: Transform,
}

impl FighterBundle {
    pub fn new(
        id: FighterId,
        def: &FighterDef,
        role: FighterRole,
        position: Vec2,
        facing: Facing,
        stance: PoseKeyframe,
    ) -> Self {
        let actor_scale = if def.actor_scale.is_finite() && def.actor_scale > 0.0 {
            def.actor_scale
        } else {
            warn!("Fighter '{}' has invalid actor_scale {}; using 1.0", def.id, def.actor_scale);
            1.0
        };

        Self {
            fighter: Fighter {
                id,
                def_id: def.id.clone(),
                role,
            },
            body: FighterBody {
                actor_scale,
                hitbox_height: def.hitbox_height,
                lengths: def.bone_lengths,
            },
            loadout: Loadout {
                abilities: def.ability_ids.clone(),
                stance_pose: def.stance_pose.clone(),
            },
            motion: FighterMotion::at(position, facing),
            input: FighterInput::default(),
            timeline: AttackTimeline::default(),
            animator: PoseAnimator::at_rest(stance),
            aim: AimState::default(),
            bones: Bones::default(),
            secondary: SecondaryMotion::default(),
            health: Health::new(def.max_health),
            counters: HitCounters::default(),
            stun: HitStun::default(),
            tracker: HitTracker::default(),
            stamina: Stamina::new(def.stamina.max, def.stamina.drain_per_sec, def.stamina.regen_per_sec),
            combo: ComboState::default(),
            charge: ChargeState::default(),
            transform: Transform::from_xyz(position.x, position.y, 0.0),
        }
    }
}

/// Spawn a fighter from its definition. Unknown definitions spawn nothing.
pub fn spawn_fighter(
    commands: &mut Commands,
    roster: &mut Roster,
    registry: &ContentRegistry,
    def_id: &str,
    role: FighterRole,
    position: Vec2,
    facing: Facing,
) -> Option<FighterId> {
    let Some(def) = registry.fighters.get(def_id) else {
        warn!("Unknown fighter definition '{}'; not spawning", def_id);
        return None;
    };
    let stance = registry.pose_keyframe(&def.stance_pose).unwrap_or_else(|| {
        warn!("Fighter '{}' stance pose '{}' not found; using neutral", def.id, def.stance_pose);
        PoseKeyframe::default()
    });

    let id = roster.allocate();
    let mut entity = commands.spawn(FighterBundle::new(id, def, role, position, facing, stance));
    if role == FighterRole::Npc {
        entity.insert(SparringBrain::default());
    }
    roster.register(id, entity.id());
    info!("Spawned fighter {} ('{}', {:?}) at {:?}", id, def.id, role, position);
    Some(id)
}
