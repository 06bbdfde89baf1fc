//! Combat domain: turning ability and move definitions into timeline input.

use std::sync::Arc;

use crate::combat::colliders::ColliderKey;
use crate::combat::hits::{HitError, HitTarget};
use crate::combat::timeline::{AttackContext, OnHitFn, SegmentSpec, StepSpec};
use crate::content::{AbilityDef, MoveDef};

/// Everything `AttackTimeline::start` needs for one move.
#[derive(Debug, Clone)]
pub struct AttackPlan {
    pub segments: Vec<SegmentSpec>,
    pub steps: Vec<StepSpec>,
    pub context: AttackContext,
}

/// Hook that deals `damage` and pushes the defender along the attacker's facing.
pub fn damage_hook(damage: f32, knockback: f32) -> OnHitFn {
    Arc::new(move |target: &mut HitTarget<'_>, _keys: &[ColliderKey]| {
        if target.health.is_dead() {
            return Err(HitError::DefenderDown(target.id));
        }
        let push = target.attacker_facing.forward().x * knockback;
        if !push.is_finite() {
            return Err(HitError::InvalidKnockback {
                defender: target.id,
                knockback,
            });
        }
        target.health.take_damage(damage);
        target.motion.position.x += push;
        Ok(())
    })
}

/// Plan `mv` as part of `ability`. `damage_scale` multiplies the move damage
/// (hold-release charge).
pub fn plan_move(ability: &AbilityDef, mv: &MoveDef, damage_scale: f32, rest_pose: &str) -> AttackPlan {
    let segments = mv
        .phases
        .iter()
        .map(|phase| SegmentSpec::new(&phase.phase, &phase.pose_id, phase.duration_ms))
        .collect();
    let steps = mv
        .sequence
        .iter()
        .map(|step| StepSpec {
            offset_ms: step.offset_ms,
            move_id: step.move_id.clone(),
            colliders: step.colliders.clone(),
        })
        .collect();

    let mut context = AttackContext::new(&ability.id, &mv.id);
    context.trigger = ability.trigger;
    context.colliders = mv.colliders.clone();
    context.rest_pose = rest_pose.to_string();
    context.on_hit = Some(damage_hook(mv.damage * damage_scale, mv.knockback));

    AttackPlan {
        segments,
        steps,
        context,
    }
}

/// Retarget a running attack at a sequence step's move: its colliders (unless
/// the step overrides them) and its damage.
pub fn apply_step(context: &mut AttackContext, step_move: &MoveDef, colliders: Option<&[ColliderKey]>) {
    context.move_id = step_move.id.clone();
    context.colliders = colliders.map(<[_]>::to_vec).unwrap_or_else(|| step_move.colliders.clone());
    context.on_hit = Some(damage_hook(step_move.damage, step_move.knockback));
}
