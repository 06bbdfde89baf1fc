//! Combat domain: attack input, timeline advancement, stamina, collider
//! sampling, hit detection and hit reactions.

use std::collections::HashSet;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::colliders::{ColliderKey, ColliderSamples, ColliderTuning};
use crate::combat::combo::{ChargeState, ComboState, charge_damage_scale};
use crate::combat::components::{Health, HitCounters, HitStun};
use crate::combat::events::{
    AttackFinishedEvent, AttackStartedEvent, FighterDownEvent, HitBlockedEvent, HitLandedEvent,
};
use crate::combat::hits::{
    BodyCircle, HitTarget, HitTracker, HitTuning, apply_default_knockback, colliding_keys,
    is_strike_phase, record_hit,
};
use crate::combat::presets::{apply_step, plan_move};
use crate::combat::stamina::Stamina;
use crate::combat::timeline::{AttackTimeline, OnHitFn, PoseTransition, TimelineEvent};
use crate::content::{ContentRegistry, TriggerKind};
use crate::core::FighterInput;
use crate::movement::{DashStartedEvent, Facing, FighterMotion};
use crate::rig::{Bones, PoseAnimator};
use crate::roster::{Fighter, FighterBody, FighterId, Loadout};

// ============================================================================
// Timeline plumbing
// ============================================================================

fn transition_animator(registry: &ContentRegistry, animator: &mut PoseAnimator, transition: &PoseTransition) {
    match registry.pose_keyframe(&transition.pose) {
        Some(keyframe) => animator.transition_to(keyframe, &transition.phase, transition.duration_ms),
        None => {
            warn!(
                "Pose '{}' for phase '{}' not found; holding current pose",
                transition.pose, transition.phase
            );
            animator.phase = transition.phase.clone();
        }
    }
}

/// Route timeline events into the animator, the running context and combo
/// bookkeeping. Returns `Some(cancelled)` when the attack ended.
pub fn apply_timeline_events(
    events: Vec<TimelineEvent>,
    ability_id: &str,
    registry: &ContentRegistry,
    timeline: &mut AttackTimeline,
    animator: &mut PoseAnimator,
    combo: &mut ComboState,
) -> Option<bool> {
    let mut ended = None;
    for event in events {
        match event {
            TimelineEvent::Step(step) => {
                let Some(step_move) = registry.moves.get(&step.move_id) else {
                    debug!("Sequence step move '{}' not found; skipping", step.move_id);
                    continue;
                };
                if let Some(context) = timeline.context_mut() {
                    apply_step(context, step_move, step.colliders.as_deref());
                }
            }
            TimelineEvent::MirrorReset => animator.clear_mirror(),
            TimelineEvent::PhaseTransition(transition) => {
                transition_animator(registry, animator, &transition);
            }
            TimelineEvent::Finished { cancelled } => {
                match registry.abilities.get(ability_id) {
                    Some(ability) if !cancelled => combo.finish(ability),
                    _ => combo.reset(),
                }
                ended = Some(cancelled);
            }
        }
    }
    ended
}

/// Start move `index` of an ability. Returns the started move id.
pub fn start_ability_move(
    registry: &ContentRegistry,
    ability_id: &str,
    damage_scale: f32,
    stance_pose: &str,
    timeline: &mut AttackTimeline,
    animator: &mut PoseAnimator,
    combo: &mut ComboState,
) -> Option<String> {
    let Some(ability) = registry.abilities.get(ability_id) else {
        debug!("Ability preset '{}' not found; ignoring", ability_id);
        return None;
    };
    let index = combo.select(ability);
    let Some(mv) = registry.ability_move(ability, index) else {
        debug!("Ability '{}' has no move at index {}; ignoring", ability_id, index);
        combo.reset();
        return None;
    };

    let plan = plan_move(ability, mv, damage_scale, stance_pose);
    let first = plan.segments.first().map(|segment| PoseTransition {
        pose: segment.pose.clone(),
        phase: segment.phase.clone(),
        duration_ms: segment.duration_ms,
    });
    if !timeline.start(plan.segments, plan.steps, plan.context) {
        combo.reset();
        return None;
    }
    if let Some(first) = first {
        transition_animator(registry, animator, &first);
    }
    Some(mv.id.clone())
}

/// Cancel the running attack with the same event sequence as completion.
/// Returns the cancelled ability id.
pub fn cancel_attack(
    registry: &ContentRegistry,
    timeline: &mut AttackTimeline,
    animator: &mut PoseAnimator,
    combo: &mut ComboState,
) -> Option<String> {
    let ability_id = timeline.context()?.preset_id.clone();
    let mut events = Vec::new();
    timeline.cancel(|event| events.push(event));
    apply_timeline_events(events, &ability_id, registry, timeline, animator, combo);
    Some(ability_id)
}

// ============================================================================
// Timeline set
// ============================================================================

pub(crate) fn tick_combat_timers(
    time: Res<Time>,
    mut query: Query<(&mut HitStun, &mut ComboState, &mut ChargeState)>,
) {
    let dt = time.delta_secs();

    for (mut stun, mut combo, mut charge) in &mut query {
        stun.tick(dt);
        combo.tick(dt);
        charge.tick(dt);
    }
}

pub(crate) fn cancel_attacks_on_dash(
    registry: Res<ContentRegistry>,
    mut dashes: MessageReader<DashStartedEvent>,
    mut finished: MessageWriter<AttackFinishedEvent>,
    mut query: Query<(
        &Fighter,
        &mut AttackTimeline,
        &mut PoseAnimator,
        &mut ComboState,
        &mut ChargeState,
    )>,
) {
    for dash in dashes.read() {
        let Ok((fighter, mut timeline, mut animator, mut combo, mut charge)) = query.get_mut(dash.entity) else {
            continue;
        };
        charge.cancel();
        if let Some(ability_id) = cancel_attack(&registry, &mut timeline, &mut animator, &mut combo) {
            debug!("Fighter {} dash-cancelled '{}'", fighter.id, ability_id);
            finished.write(AttackFinishedEvent {
                entity: dash.entity,
                fighter: fighter.id,
                ability_id,
                cancelled: true,
            });
        }
    }
}

pub(crate) fn advance_attack_timelines(
    time: Res<Time>,
    registry: Res<ContentRegistry>,
    mut finished: MessageWriter<AttackFinishedEvent>,
    mut query: Query<(
        Entity,
        &Fighter,
        &mut AttackTimeline,
        &mut PoseAnimator,
        &mut ComboState,
    )>,
) {
    let dt = time.delta_secs();

    for (entity, fighter, mut timeline, mut animator, mut combo) in &mut query {
        let Some(ability_id) = timeline.context().map(|context| context.preset_id.clone()) else {
            continue;
        };
        let mut events = Vec::new();
        timeline.update(dt, |event| events.push(event));
        if let Some(cancelled) =
            apply_timeline_events(events, &ability_id, &registry, &mut timeline, &mut animator, &mut combo)
        {
            finished.write(AttackFinishedEvent {
                entity,
                fighter: fighter.id,
                ability_id,
                cancelled,
            });
        }
    }
}

pub(crate) fn handle_attack_input(
    registry: Res<ContentRegistry>,
    mut started: MessageWriter<AttackStartedEvent>,
    mut query: Query<(
        Entity,
        &Fighter,
        &Loadout,
        &FighterInput,
        &HitStun,
        &Stamina,
        &mut AttackTimeline,
        &mut PoseAnimator,
        &mut ComboState,
        &mut ChargeState,
    )>,
) {
    for (entity, fighter, loadout, input, stun, stamina, mut timeline, mut animator, mut combo, mut charge) in
        &mut query
    {
        let mut to_start: Option<(String, f32)> = None;

        if let Some(slot) = input.ability_released {
            let released = loadout.ability(slot);
            if released.is_some() && charge.ability_id.as_deref() == released {
                if let Some((ability_id, held_ms)) = charge.release() {
                    let scale = registry
                        .abilities
                        .get(&ability_id)
                        .map(|ability| charge_damage_scale(held_ms, ability))
                        .unwrap_or(1.0);
                    debug!(
                        "Fighter {} released '{}' after {:.0} ms (x{:.2})",
                        fighter.id, ability_id, held_ms, scale
                    );
                    to_start = Some((ability_id, scale));
                }
            }
        }

        if to_start.is_none() {
            if let Some(slot) = input.ability_pressed {
                if timeline.is_active() || charge.is_charging() {
                    debug!("Fighter {} busy; ignoring press of slot {}", fighter.id, slot);
                    continue;
                }
                if stun.is_stunned() || stamina.is_exhausted() {
                    debug!("Fighter {} cannot attack (stunned or exhausted)", fighter.id);
                    continue;
                }
                let Some(ability_id) = loadout.ability(slot) else {
                    debug!("Fighter {} has no ability in slot {}", fighter.id, slot);
                    continue;
                };
                match registry.abilities.get(ability_id) {
                    Some(ability) if ability.trigger == TriggerKind::HoldRelease => {
                        debug!("Fighter {} charging '{}'", fighter.id, ability_id);
                        charge.begin(ability_id);
                    }
                    _ => to_start = Some((ability_id.to_string(), 1.0)),
                }
            }
        }

        let Some((ability_id, scale)) = to_start else {
            continue;
        };
        if timeline.is_active() {
            continue;
        }
        if let Some(move_id) = start_ability_move(
            &registry,
            &ability_id,
            scale,
            &loadout.stance_pose,
            &mut timeline,
            &mut animator,
            &mut combo,
        ) {
            debug!("Fighter {} started '{}' / '{}'", fighter.id, ability_id, move_id);
            started.write(AttackStartedEvent {
                entity,
                fighter: fighter.id,
                ability_id,
                move_id,
            });
        }
    }
}

pub(crate) fn update_stamina(time: Res<Time>, mut query: Query<(&AttackTimeline, &mut Stamina)>) {
    let dt = time.delta_secs();
    for (timeline, mut stamina) in &mut query {
        stamina.tick(dt, timeline.is_active());
    }
}

// ============================================================================
// Colliders set
// ============================================================================

pub(crate) fn sample_fighter_colliders(
    tuning: Res<ColliderTuning>,
    mut samples: ResMut<ColliderSamples>,
    query: Query<(&Fighter, &FighterBody, &Bones)>,
) {
    let active: HashSet<FighterId> = query.iter().map(|(fighter, _, _)| fighter.id).collect();
    samples.prune(&active);
    for (fighter, body, bones) in &query {
        samples.sample(fighter.id, bones, body.actor_scale, &tuning);
    }
}

// ============================================================================
// Hits set
// ============================================================================

struct Striker {
    entity: Entity,
    id: FighterId,
    facing: Facing,
    phase: String,
    colliders: Vec<ColliderKey>,
    on_hit: Option<OnHitFn>,
}

struct Target {
    entity: Entity,
    id: FighterId,
    body: BodyCircle,
    guarding: bool,
}

pub(crate) fn detect_hits(
    tuning: Res<HitTuning>,
    samples: Res<ColliderSamples>,
    mut landed: MessageWriter<HitLandedEvent>,
    mut blocked: MessageWriter<HitBlockedEvent>,
    mut query: Query<(
        Entity,
        &Fighter,
        &FighterBody,
        &mut FighterMotion,
        &AttackTimeline,
        &mut HitTracker,
        &mut Health,
        &mut HitCounters,
    )>,
) {
    let mut strikers = Vec::new();
    let mut targets = Vec::new();

    for (entity, fighter, body, motion, timeline, mut tracker, _, _) in &mut query {
        let phase = timeline.current_phase();
        let window_open = tracker.observe(phase);
        let trigger = timeline.context().map(|context| context.trigger);
        let guarding = trigger == Some(TriggerKind::Defensive) && phase.is_some_and(is_strike_phase);

        targets.push(Target {
            entity,
            id: fighter.id,
            body: BodyCircle::new(
                motion.position,
                body.hitbox_height,
                body.actor_scale,
                tuning.body_radius_fraction,
            ),
            guarding,
        });

        if !window_open || trigger == Some(TriggerKind::Defensive) {
            continue;
        }
        if let (Some(context), Some(phase)) = (timeline.context(), phase) {
            strikers.push(Striker {
                entity,
                id: fighter.id,
                facing: motion.facing,
                phase: phase.to_string(),
                colliders: context.colliders.clone(),
                on_hit: context.on_hit.clone(),
            });
        }
    }

    for striker in strikers {
        let Some(colliders) = samples.get(striker.id) else {
            continue;
        };
        for target in targets.iter().filter(|target| target.entity != striker.entity) {
            let keys = colliding_keys(colliders, &striker.colliders, &target.body);
            if keys.is_empty() {
                continue;
            }

            if target.guarding {
                debug!("Fighter {} blocked {} ({})", target.id, striker.id, striker.phase);
                blocked.write(HitBlockedEvent {
                    attacker: striker.entity,
                    defender: target.entity,
                    attacker_id: striker.id,
                    defender_id: target.id,
                });
            } else if let Ok((_, _, _, mut motion, _, _, mut health, mut counters)) =
                query.get_mut(target.entity)
            {
                let was_standing = !health.is_dead();
                record_hit(&mut counters, &keys);
                let result = match &striker.on_hit {
                    Some(hook) => {
                        let mut hit = HitTarget {
                            id: target.id,
                            health: &mut *health,
                            motion: &mut *motion,
                            attacker: striker.id,
                            attacker_facing: striker.facing,
                        };
                        hook(&mut hit, &keys)
                    }
                    None => {
                        apply_default_knockback(&mut motion, striker.facing, tuning.default_knockback);
                        Ok(())
                    }
                };
                if let Err(e) = result {
                    warn!("On-hit hook for {} -> {} failed: {}", striker.id, target.id, e);
                }
                debug!(
                    "Fighter {} hit {} in '{}' with {:?}",
                    striker.id, target.id, striker.phase, keys
                );
                landed.write(HitLandedEvent {
                    attacker: striker.entity,
                    defender: target.entity,
                    attacker_id: striker.id,
                    defender_id: target.id,
                    phase: striker.phase.clone(),
                    keys,
                    knocked_out: was_standing && health.is_dead(),
                });
            }

            if let Ok((_, _, _, _, _, mut tracker, _, _)) = query.get_mut(striker.entity) {
                tracker.mark_scored();
            }
            break;
        }
    }
}

// ============================================================================
// Reactions set
// ============================================================================

pub(crate) fn apply_hit_reactions(
    tuning: Res<HitTuning>,
    registry: Res<ContentRegistry>,
    mut landed: MessageReader<HitLandedEvent>,
    mut finished: MessageWriter<AttackFinishedEvent>,
    mut downs: MessageWriter<FighterDownEvent>,
    mut query: Query<(
        &Fighter,
        &mut HitStun,
        &mut AttackTimeline,
        &mut PoseAnimator,
        &mut ComboState,
        &mut ChargeState,
    )>,
) {
    for hit in landed.read() {
        let Ok((fighter, mut stun, mut timeline, mut animator, mut combo, mut charge)) = query.get_mut(hit.defender)
        else {
            continue;
        };
        stun.stun(tuning.hit_stun_ms);
        charge.cancel();
        if let Some(ability_id) = cancel_attack(&registry, &mut timeline, &mut animator, &mut combo) {
            debug!("Fighter {} interrupted out of '{}'", fighter.id, ability_id);
            finished.write(AttackFinishedEvent {
                entity: hit.defender,
                fighter: fighter.id,
                ability_id,
                cancelled: true,
            });
        }
        if hit.knocked_out {
            info!("Fighter {} is down (hit by {})", fighter.id, hit.attacker_id);
            downs.write(FighterDownEvent {
                entity: hit.defender,
                fighter: fighter.id,
            });
        }
    }
}
