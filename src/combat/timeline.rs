//! Combat domain: the attack timeline.
//!
//! An attack is an ordered list of contiguous phase segments
//! (windup → strike → recoil → stance) plus optional sequence steps scheduled
//! at absolute offsets. `update` walks the elapsed cursor forward and reports
//! every step and boundary it crosses, in time order, through an event sink.

use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;

use crate::combat::colliders::ColliderKey;
use crate::combat::hits::{HitError, HitTarget};
use crate::content::TriggerKind;

/// Pose used when an attack ends or is cancelled.
pub const REST_PHASE: &str = "Stance";
/// Blend time back to the rest pose after the last segment.
pub const REST_BLEND_MS: f32 = 120.0;

/// Hook run by hit detection on the first scoring collision of a strike phase.
pub type OnHitFn = Arc<dyn Fn(&mut HitTarget<'_>, &[ColliderKey]) -> Result<(), HitError> + Send + Sync>;

/// Input description of one phase.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSpec {
    pub phase: String,
    pub pose: String,
    pub duration_ms: f32,
}

impl SegmentSpec {
    pub fn new(phase: impl Into<String>, pose: impl Into<String>, duration_ms: f32) -> Self {
        Self {
            phase: phase.into(),
            pose: pose.into(),
            duration_ms,
        }
    }
}

/// A normalized phase with absolute offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSegment {
    pub phase: String,
    pub pose: String,
    pub duration_ms: f32,
    pub start_ms: f32,
    pub end_ms: f32,
}

/// Input description of a sequence step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSpec {
    pub offset_ms: f32,
    pub move_id: String,
    pub colliders: Option<Vec<ColliderKey>>,
}

/// A scheduled sub-event, e.g. the next hit window of a multi-hit move.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceStep {
    pub start_ms: f32,
    pub move_id: String,
    pub colliders: Option<Vec<ColliderKey>>,
}

/// What the attack is and who consumes its results.
#[derive(Clone)]
pub struct AttackContext {
    pub preset_id: String,
    pub move_id: String,
    pub trigger: TriggerKind,
    /// Collider keys that can score for the current move.
    pub colliders: Vec<ColliderKey>,
    pub rest_pose: String,
    pub on_hit: Option<OnHitFn>,
}

impl fmt::Debug for AttackContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackContext")
            .field("preset_id", &self.preset_id)
            .field("move_id", &self.move_id)
            .field("trigger", &self.trigger)
            .field("colliders", &self.colliders)
            .field("rest_pose", &self.rest_pose)
            .field("on_hit", &self.on_hit.is_some())
            .finish()
    }
}

impl AttackContext {
    pub fn new(preset_id: impl Into<String>, move_id: impl Into<String>) -> Self {
        Self {
            preset_id: preset_id.into(),
            move_id: move_id.into(),
            trigger: TriggerKind::Single,
            colliders: ColliderKey::ALL.to_vec(),
            rest_pose: REST_PHASE.to_ascii_lowercase(),
            on_hit: None,
        }
    }
}

/// Pose change requested at a phase boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseTransition {
    pub pose: String,
    pub phase: String,
    pub duration_ms: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineEvent {
    Step(SequenceStep),
    /// Clear any left/right limb swap before the next pose applies.
    MirrorReset,
    PhaseTransition(PoseTransition),
    Finished { cancelled: bool },
}

#[derive(Debug, Clone)]
pub struct ActiveAttack {
    pub context: AttackContext,
    pub segments: Vec<PhaseSegment>,
    pub steps: Vec<SequenceStep>,
    pub elapsed_ms: f32,
    pub segment_index: usize,
    next_step: usize,
}

impl ActiveAttack {
    pub fn current_segment(&self) -> &PhaseSegment {
        &self.segments[self.segment_index]
    }

    pub fn total_ms(&self) -> f32 {
        self.segments.last().map(|segment| segment.end_ms).unwrap_or(0.0)
    }

    pub fn pending_steps(&self) -> &[SequenceStep] {
        &self.steps[self.next_step..]
    }
}

/// Attack state of one fighter. `None` inside means no attack is running.
#[derive(Component, Debug, Clone, Default)]
pub struct AttackTimeline {
    active: Option<ActiveAttack>,
}

fn is_stance(phase: &str) -> bool {
    phase.eq_ignore_ascii_case(REST_PHASE)
}

impl AttackTimeline {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveAttack> {
        self.active.as_ref()
    }

    pub fn context(&self) -> Option<&AttackContext> {
        self.active.as_ref().map(|attack| &attack.context)
    }

    pub fn context_mut(&mut self) -> Option<&mut AttackContext> {
        self.active.as_mut().map(|attack| &mut attack.context)
    }

    pub fn current_phase(&self) -> Option<&str> {
        self.active
            .as_ref()
            .map(|attack| attack.current_segment().phase.as_str())
    }

    pub fn elapsed_ms(&self) -> Option<f32> {
        self.active.as_ref().map(|attack| attack.elapsed_ms)
    }

    /// Begin an attack. Empty or malformed segment lists leave the timeline
    /// untouched and return `false`.
    pub fn start(&mut self, segments: Vec<SegmentSpec>, steps: Vec<StepSpec>, context: AttackContext) -> bool {
        if segments.is_empty() {
            debug!("Attack '{}' has no segments; not starting", context.preset_id);
            return false;
        }
        if let Some(bad) = segments
            .iter()
            .find(|segment| !segment.duration_ms.is_finite() || segment.duration_ms < 0.0)
        {
            warn!(
                "Attack '{}' has malformed phase '{}' ({} ms); not starting",
                context.preset_id, bad.phase, bad.duration_ms
            );
            return false;
        }

        let mut cursor = 0.0;
        let normalized: Vec<PhaseSegment> = segments
            .into_iter()
            .map(|spec| {
                let start_ms = cursor;
                cursor += spec.duration_ms;
                PhaseSegment {
                    phase: spec.phase,
                    pose: spec.pose,
                    duration_ms: spec.duration_ms,
                    start_ms,
                    end_ms: cursor,
                }
            })
            .collect();

        let mut steps: Vec<SequenceStep> = steps
            .into_iter()
            .filter(|step| step.offset_ms.is_finite())
            .map(|step| SequenceStep {
                start_ms: step.offset_ms.max(0.0),
                move_id: step.move_id,
                colliders: step.colliders,
            })
            .collect();
        steps.sort_by(|a, b| a.start_ms.total_cmp(&b.start_ms));

        self.active = Some(ActiveAttack {
            context,
            segments: normalized,
            steps,
            elapsed_ms: 0.0,
            segment_index: 0,
            next_step: 0,
        });
        true
    }

    /// Advance by `dt` seconds, reporting every crossed step and boundary.
    pub fn update(&mut self, dt: f32, mut on_event: impl FnMut(TimelineEvent)) {
        if !dt.is_finite() || dt < 0.0 {
            return;
        }
        let Some(attack) = self.active.as_mut() else {
            return;
        };
        attack.elapsed_ms += dt * 1000.0;

        let mut finished = false;
        loop {
            let elapsed = attack.elapsed_ms;
            let boundary = attack.current_segment().end_ms;
            let boundary_due = elapsed >= boundary;
            let step_due = attack
                .steps
                .get(attack.next_step)
                .filter(|step| elapsed >= step.start_ms)
                .map(|step| step.start_ms);

            match step_due {
                Some(at) if !boundary_due || at <= boundary => {
                    let step = attack.steps[attack.next_step].clone();
                    attack.next_step += 1;
                    on_event(TimelineEvent::Step(step));
                }
                _ if boundary_due => {
                    let next_index = attack.segment_index + 1;
                    if let Some(next) = attack.segments.get(next_index) {
                        if is_stance(&next.phase) {
                            on_event(TimelineEvent::MirrorReset);
                        }
                        on_event(TimelineEvent::PhaseTransition(PoseTransition {
                            pose: next.pose.clone(),
                            phase: next.phase.clone(),
                            duration_ms: next.duration_ms,
                        }));
                        attack.segment_index = next_index;
                    } else {
                        emit_rest(&attack.context, &mut on_event);
                        finished = true;
                        break;
                    }
                }
                _ => break,
            }
        }

        if finished {
            self.active = None;
            on_event(TimelineEvent::Finished { cancelled: false });
        }
    }

    /// Stop early (dash cancel, hit-stun). Emits the same events as natural
    /// completion so phase-specific overrides never leak.
    pub fn cancel(&mut self, mut on_event: impl FnMut(TimelineEvent)) -> bool {
        let Some(attack) = self.active.take() else {
            return false;
        };
        emit_rest(&attack.context, &mut on_event);
        on_event(TimelineEvent::Finished { cancelled: true });
        true
    }
}

fn emit_rest(context: &AttackContext, on_event: &mut impl FnMut(TimelineEvent)) {
    on_event(TimelineEvent::MirrorReset);
    on_event(TimelineEvent::PhaseTransition(PoseTransition {
        pose: context.rest_pose.clone(),
        phase: REST_PHASE.to_string(),
        duration_ms: REST_BLEND_MS,
    }));
}
