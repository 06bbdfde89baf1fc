//! Combat domain: attack timelines, collider sampling, hit detection and the
//! per-frame combat orchestration.

mod ai;
mod colliders;
mod combo;
mod components;
mod events;
mod hits;
mod presets;
mod stamina;
mod systems;
mod timeline;

#[cfg(test)]
mod tests;

pub use ai::{SparringBrain, SparringIntent, SparringRng, SparringTuning, think};
pub use colliders::{ColliderKey, ColliderSample, ColliderSamples, ColliderTuning, LimbColliders, sample_limb};
pub use combo::{ChargeState, ComboState, advance_combo_index, charge_damage_scale, charge_fraction};
pub use components::{Health, HitCounters, HitStun};
pub use events::{
    AttackFinishedEvent, AttackStartedEvent, FighterDownEvent, HitBlockedEvent, HitLandedEvent,
};
pub use hits::{
    BodyCircle, HitError, HitTarget, HitTracker, HitTuning, apply_default_knockback, circles_overlap,
    colliding_keys, is_strike_phase, record_hit,
};
pub use presets::{AttackPlan, apply_step, damage_hook, plan_move};
pub use stamina::Stamina;
pub use systems::{apply_timeline_events, cancel_attack, start_ability_move};
pub use timeline::{
    ActiveAttack, AttackContext, AttackTimeline, OnHitFn, PhaseSegment, PoseTransition, REST_BLEND_MS,
    REST_PHASE, SegmentSpec, SequenceStep, StepSpec, TimelineEvent,
};

use bevy::prelude::*;

use crate::combat::ai::{drive_sparring_ai, seed_sparring_rng};
use crate::combat::systems::{
    advance_attack_timelines, apply_hit_reactions, cancel_attacks_on_dash, detect_hits,
    handle_attack_input, sample_fighter_colliders, tick_combat_timers, update_stamina,
};
use crate::core::{SimSet, StartupSet};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ColliderTuning>()
            .init_resource::<ColliderSamples>()
            .init_resource::<HitTuning>()
            .init_resource::<SparringTuning>()
            .add_message::<AttackStartedEvent>()
            .add_message::<AttackFinishedEvent>()
            .add_message::<HitLandedEvent>()
            .add_message::<HitBlockedEvent>()
            .add_message::<FighterDownEvent>()
            .add_systems(Startup, seed_sparring_rng.in_set(StartupSet::Content))
            .add_systems(Update, drive_sparring_ai.in_set(SimSet::Input))
            .add_systems(
                Update,
                (
                    tick_combat_timers,
                    cancel_attacks_on_dash,
                    advance_attack_timelines,
                    handle_attack_input,
                    update_stamina,
                )
                    .chain()
                    .in_set(SimSet::Timeline),
            )
            .add_systems(Update, sample_fighter_colliders.in_set(SimSet::Colliders))
            .add_systems(Update, detect_hits.in_set(SimSet::Hits))
            .add_systems(Update, apply_hit_reactions.in_set(SimSet::Reactions));
    }
}
