//! Combat domain: tests for timelines, colliders, hits, combos and the sparring AI.

use std::collections::HashSet;

use bevy::prelude::*;

use super::{
    AttackContext, AttackTimeline, ChargeState, ColliderKey, ColliderSamples, ColliderTuning,
    ComboState, Health, HitCounters, HitError, HitStun, HitTarget, HitTracker, PoseTransition,
    REST_BLEND_MS, REST_PHASE, SegmentSpec, SequenceStep, SparringBrain, SparringRng, SparringTuning,
    Stamina, StepSpec, TimelineEvent, advance_combo_index, apply_default_knockback, apply_step, apply_timeline_events,
    cancel_attack, charge_damage_scale, charge_fraction, circles_overlap, colliding_keys, damage_hook,
    is_strike_phase, plan_move, record_hit, sample_limb, start_ability_move, think,
};
use crate::combat::BodyCircle;
use crate::content::{ContentRegistry, TriggerKind, builtin_content};
use crate::movement::{Facing, FighterMotion};
use crate::rig::{Bone, BoneLengths, Bones, Joint, Pose, PoseAnimator, solve_bones};
use crate::roster::FighterId;

fn registry() -> ContentRegistry {
    builtin_content().0
}

fn basic_segments() -> Vec<SegmentSpec> {
    vec![
        SegmentSpec::new("Windup", "w", 120.0),
        SegmentSpec::new("Strike", "s", 100.0),
        SegmentSpec::new("Recoil", "r", 80.0),
        SegmentSpec::new("Stance", "stance", 60.0),
    ]
}

fn step_at(offset_ms: f32, move_id: &str) -> StepSpec {
    StepSpec {
        offset_ms,
        move_id: move_id.to_string(),
        colliders: None,
    }
}

fn transition(pose: &str, phase: &str, duration_ms: f32) -> TimelineEvent {
    TimelineEvent::PhaseTransition(PoseTransition {
        pose: pose.to_string(),
        phase: phase.to_string(),
        duration_ms,
    })
}

fn rest_events(cancelled: bool) -> Vec<TimelineEvent> {
    vec![
        TimelineEvent::MirrorReset,
        transition("stance", REST_PHASE, REST_BLEND_MS),
        TimelineEvent::Finished { cancelled },
    ]
}

fn collect(timeline: &mut AttackTimeline, dt: f32) -> Vec<TimelineEvent> {
    let mut events = Vec::new();
    timeline.update(dt, |event| events.push(event));
    events
}

// -----------------------------------------------------------------------------
// AttackTimeline tests
// -----------------------------------------------------------------------------

#[test]
fn test_timeline_walks_phases_in_order() {
    let mut timeline = AttackTimeline::default();
    assert!(timeline.start(
        basic_segments(),
        vec![step_at(180.0, "follow_up")],
        AttackContext::new("combo", "basic"),
    ));
    assert_eq!(timeline.current_phase(), Some("Windup"));

    assert!(collect(&mut timeline, 0.06).is_empty());
    assert_eq!(collect(&mut timeline, 0.06), vec![transition("s", "Strike", 100.0)]);

    let events = collect(&mut timeline, 0.06);
    assert_eq!(
        events,
        vec![TimelineEvent::Step(SequenceStep {
            start_ms: 180.0,
            move_id: "follow_up".to_string(),
            colliders: None,
        })]
    );
    assert_eq!(timeline.current_phase(), Some("Strike"));

    assert_eq!(collect(&mut timeline, 0.06), vec![transition("r", "Recoil", 80.0)]);
    assert_eq!(
        collect(&mut timeline, 0.06),
        vec![TimelineEvent::MirrorReset, transition("stance", "Stance", 60.0)]
    );
    assert_eq!(collect(&mut timeline, 0.06), rest_events(false));
    assert!(!timeline.is_active());
}

#[test]
fn test_large_step_reports_everything_in_time_order() {
    let mut timeline = AttackTimeline::default();
    timeline.start(
        basic_segments(),
        vec![step_at(180.0, "follow_up")],
        AttackContext::new("combo", "basic"),
    );

    let events = collect(&mut timeline, 0.5);
    let mut expected = vec![
        transition("s", "Strike", 100.0),
        TimelineEvent::Step(SequenceStep {
            start_ms: 180.0,
            move_id: "follow_up".to_string(),
            colliders: None,
        }),
        transition("r", "Recoil", 80.0),
        TimelineEvent::MirrorReset,
        transition("stance", "Stance", 60.0),
    ];
    expected.extend(rest_events(false));
    assert_eq!(events, expected);
}

#[test]
fn test_step_on_boundary_fires_before_transition() {
    let mut timeline = AttackTimeline::default();
    timeline.start(
        basic_segments(),
        vec![step_at(120.0, "follow_up")],
        AttackContext::new("combo", "basic"),
    );
    let events = collect(&mut timeline, 0.2);
    assert!(matches!(events[0], TimelineEvent::Step(_)));
    assert_eq!(events[1], transition("s", "Strike", 100.0));
}

#[test]
fn test_negative_step_offset_fires_immediately() {
    let mut timeline = AttackTimeline::default();
    timeline.start(
        basic_segments(),
        vec![step_at(-50.0, "early"), step_at(f32::NAN, "broken")],
        AttackContext::new("combo", "basic"),
    );
    let active = timeline.active().map(|a| a.pending_steps().len());
    assert_eq!(active, Some(1));

    let events = collect(&mut timeline, 0.0);
    assert_eq!(
        events,
        vec![TimelineEvent::Step(SequenceStep {
            start_ms: 0.0,
            move_id: "early".to_string(),
            colliders: None,
        })]
    );
}

#[test]
fn test_cancel_matches_completion_sequence() {
    let mut timeline = AttackTimeline::default();
    timeline.start(basic_segments(), Vec::new(), AttackContext::new("combo", "basic"));
    collect(&mut timeline, 0.15);

    let mut events = Vec::new();
    assert!(timeline.cancel(|event| events.push(event)));
    assert_eq!(events, rest_events(true));
    assert!(!timeline.is_active());

    assert!(!timeline.cancel(|_| panic!("no events when idle")));
}

#[test]
fn test_malformed_segments_do_not_start() {
    let mut timeline = AttackTimeline::default();
    assert!(!timeline.start(Vec::new(), Vec::new(), AttackContext::new("a", "b")));
    assert!(!timeline.start(
        vec![SegmentSpec::new("Windup", "w", f32::NAN)],
        Vec::new(),
        AttackContext::new("a", "b"),
    ));
    assert!(!timeline.start(
        vec![SegmentSpec::new("Windup", "w", -5.0)],
        Vec::new(),
        AttackContext::new("a", "b"),
    ));
    assert!(!timeline.is_active());
}

#[test]
fn test_invalid_dt_does_not_advance() {
    let mut timeline = AttackTimeline::default();
    timeline.start(basic_segments(), Vec::new(), AttackContext::new("a", "b"));
    assert!(collect(&mut timeline, f32::NAN).is_empty());
    assert!(collect(&mut timeline, -1.0).is_empty());
    assert_eq!(timeline.elapsed_ms(), Some(0.0));
}

#[test]
fn test_total_duration() {
    let mut timeline = AttackTimeline::default();
    timeline.start(basic_segments(), Vec::new(), AttackContext::new("a", "b"));
    assert_eq!(timeline.active().map(|a| a.total_ms()), Some(360.0));
}

// -----------------------------------------------------------------------------
// Collider tests
// -----------------------------------------------------------------------------

fn neutral_bones() -> Bones {
    let mut bones = Bones::default();
    solve_bones(Vec2::ZERO, &Pose::neutral(), &BoneLengths::default(), 1.0, &mut bones);
    bones
}

#[test]
fn test_sample_limb_uses_bone_end_and_scale() {
    let bones = neutral_bones();
    let tuning = ColliderTuning::default();

    let hand = sample_limb(&bones, ColliderKey::HandL, 1.5, &tuning).expect("hand resolves");
    assert!((hand.point - Vec2::new(0.0, -12.0)).length() < 1e-3);
    assert!((hand.radius - 15.0).abs() < 1e-4);

    let foot = sample_limb(&bones, ColliderKey::FootR, 1.0, &tuning).expect("foot resolves");
    assert!((foot.radius - 12.0).abs() < 1e-4);
}

#[test]
fn test_unresolvable_limb_samples_none() {
    let mut bones = neutral_bones();
    bones.insert(
        Joint::LeftHand,
        Bone {
            base: Vec2::new(f32::NAN, 0.0),
            angle: 0.0,
            length: 8.0,
            facing_sign: 1.0,
            end: Some(Vec2::new(f32::NAN, f32::NAN)),
        },
    );
    let tuning = ColliderTuning::default();
    assert_eq!(sample_limb(&bones, ColliderKey::HandL, 1.0, &tuning), None);

    let mut samples = ColliderSamples::default();
    samples.sample(FighterId(0), &bones, 1.0, &tuning);
    let limbs = samples.get(FighterId(0)).expect("fighter sampled");
    assert!(limbs.iter().any(|(key, sample)| key == ColliderKey::HandL && sample.is_none()));
    assert_eq!(limbs.get(ColliderKey::HandL), None);
    assert!(limbs.get(ColliderKey::HandR).is_some());
}

#[test]
fn test_missing_bones_sample_none() {
    let tuning = ColliderTuning::default();
    assert_eq!(sample_limb(&Bones::default(), ColliderKey::FootL, 1.0, &tuning), None);
}

#[test]
fn test_samples_prune_departed_fighters() {
    let bones = neutral_bones();
    let tuning = ColliderTuning::default();
    let mut samples = ColliderSamples::default();
    samples.sample(FighterId(0), &bones, 1.0, &tuning);
    samples.sample(FighterId(1), &bones, 1.0, &tuning);

    let active: HashSet<FighterId> = [FighterId(1)].into_iter().collect();
    samples.prune(&active);
    assert_eq!(samples.len(), 1);
    assert!(samples.get(FighterId(0)).is_none());
}

// -----------------------------------------------------------------------------
// Hit detection tests
// -----------------------------------------------------------------------------

#[test]
fn test_strike_phase_names() {
    assert!(is_strike_phase("Strike"));
    assert!(is_strike_phase("ImpactStrike"));
    assert!(is_strike_phase("GuardStrike"));
    assert!(!is_strike_phase("Windup"));
    assert!(!is_strike_phase("Stance"));
}

#[test]
fn test_circles_touching_overlap() {
    assert!(circles_overlap(Vec2::ZERO, 1.0, Vec2::new(2.0, 0.0), 1.0));
    assert!(!circles_overlap(Vec2::ZERO, 1.0, Vec2::new(2.1, 0.0), 1.0));
}

#[test]
fn test_colliding_keys_filters_active_limbs() {
    let bones = neutral_bones();
    let mut samples = ColliderSamples::default();
    samples.sample(FighterId(0), &bones, 1.0, &ColliderTuning::default());
    let limbs = samples.get(FighterId(0)).expect("sampled");

    let body = BodyCircle {
        center: Vec2::new(0.0, -12.0),
        radius: 5.0,
    };
    assert_eq!(colliding_keys(limbs, &[ColliderKey::HandL], &body), vec![ColliderKey::HandL]);
    assert_eq!(
        colliding_keys(limbs, &ColliderKey::ALL, &body),
        vec![ColliderKey::HandL, ColliderKey::HandR]
    );

    let broken = BodyCircle {
        center: Vec2::new(f32::NAN, 0.0),
        radius: 5.0,
    };
    assert!(colliding_keys(limbs, &ColliderKey::ALL, &broken).is_empty());
}

#[test]
fn test_body_circle_scales() {
    let body = BodyCircle::new(Vec2::new(5.0, 0.0), 120.0, 1.1, 0.35);
    assert!((body.radius - 46.2).abs() < 1e-3);
    assert_eq!(body.center, Vec2::new(5.0, 0.0));
}

#[test]
fn test_one_hit_per_strike_phase() {
    let mut tracker = HitTracker::default();
    assert!(!tracker.observe(Some("Windup")));
    assert!(tracker.observe(Some("Strike")));
    tracker.mark_scored();
    assert!(!tracker.observe(Some("Strike")));
    assert!(!tracker.observe(Some("Reload")));
    assert!(tracker.observe(Some("ImpactStrike")));
    assert!(!tracker.observe(None));
    assert_eq!(tracker.last_phase, None);
}

#[test]
fn test_record_hit_counts_limbs() {
    let mut counters = HitCounters::default();
    record_hit(&mut counters, &[ColliderKey::HandL, ColliderKey::FootR]);
    record_hit(&mut counters, &[ColliderKey::HandL]);
    assert_eq!(counters.body, 2);
    assert_eq!(counters.by_limb(ColliderKey::HandL), 2);
    assert_eq!(counters.by_limb(ColliderKey::FootR), 1);
    assert_eq!(counters.by_limb(ColliderKey::HandR), 0);
}

fn hit_target<'a>(health: &'a mut Health, motion: &'a mut FighterMotion, facing: Facing) -> HitTarget<'a> {
    HitTarget {
        id: FighterId(1),
        health,
        motion,
        attacker: FighterId(0),
        attacker_facing: facing,
    }
}

#[test]
fn test_damage_hook_damages_and_pushes() {
    let hook = damage_hook(6.0, 4.0);
    let mut health = Health::new(10.0);
    let mut motion = FighterMotion::default();

    let mut target = hit_target(&mut health, &mut motion, Facing::Left);
    assert_eq!(hook(&mut target, &[ColliderKey::HandL]), Ok(()));
    assert_eq!(health.current, 4.0);
    assert_eq!(motion.position.x, -4.0);

    let mut target = hit_target(&mut health, &mut motion, Facing::Left);
    assert_eq!(hook(&mut target, &[ColliderKey::HandL]), Ok(()));
    assert_eq!(health.current, 0.0);
    assert!(health.is_dead());
}

#[test]
fn test_default_knockback_follows_attacker_facing() {
    let mut motion = FighterMotion::default();
    apply_default_knockback(&mut motion, Facing::Left, 6.0);
    assert_eq!(motion.position, Vec2::new(-6.0, 0.0));
    apply_default_knockback(&mut motion, Facing::Right, 2.0);
    assert_eq!(motion.position, Vec2::new(-4.0, 0.0));
    apply_default_knockback(&mut motion, Facing::Right, f32::NAN);
    assert_eq!(motion.position, Vec2::new(-4.0, 0.0));
}

#[test]
fn test_damage_hook_errors() {
    let mut health = Health::new(10.0);
    health.take_damage(10.0);
    let mut motion = FighterMotion::default();
    let mut target = hit_target(&mut health, &mut motion, Facing::Right);
    assert_eq!(
        damage_hook(5.0, 1.0)(&mut target, &[]),
        Err(HitError::DefenderDown(FighterId(1)))
    );

    let mut health = Health::new(10.0);
    let mut target = hit_target(&mut health, &mut motion, Facing::Right);
    let result = damage_hook(5.0, f32::INFINITY)(&mut target, &[]);
    assert!(matches!(result, Err(HitError::InvalidKnockback { .. })));
    assert_eq!(health.current, 10.0);
}

// -----------------------------------------------------------------------------
// Health / stun / stamina tests
// -----------------------------------------------------------------------------

#[test]
fn test_health_damage_is_clamped() {
    let mut health = Health::new(10.0);
    assert_eq!(health.take_damage(-3.0), 0.0);
    assert_eq!(health.take_damage(f32::NAN), 0.0);
    assert_eq!(health.take_damage(25.0), 10.0);
    assert_eq!(health.current, 0.0);
    assert_eq!(health.percent(), 0.0);
}

#[test]
fn test_hit_stun_keeps_longest() {
    let mut stun = HitStun::default();
    stun.stun(200.0);
    stun.stun(50.0);
    assert_eq!(stun.timer_ms, 200.0);
    stun.tick(0.1);
    assert!(stun.is_stunned());
    stun.tick(0.2);
    assert!(!stun.is_stunned());
    assert_eq!(stun.timer_ms, 0.0);
}

#[test]
fn test_stamina_stays_in_bounds() {
    let mut stamina = Stamina::new(100.0, 25.0, 18.0);
    stamina.tick(1.0, false);
    assert_eq!(stamina.current, 100.0);

    for _ in 0..10 {
        stamina.tick(1.0, true);
    }
    assert_eq!(stamina.current, 0.0);
    assert!(stamina.is_exhausted());

    stamina.tick(1.0, false);
    assert!((stamina.current - 18.0).abs() < 1e-4);
    stamina.tick(f32::NAN, false);
    assert!((stamina.current - 18.0).abs() < 1e-4);
    assert!((stamina.percent() - 0.18).abs() < 1e-4);
}

// -----------------------------------------------------------------------------
// Combo / charge tests
// -----------------------------------------------------------------------------

#[test]
fn test_advance_combo_index() {
    assert_eq!(advance_combo_index(0, 3, 0), 1);
    assert_eq!(advance_combo_index(2, 3, 0), 0);
    assert_eq!(advance_combo_index(2, 3, 1), 1);
    assert_eq!(advance_combo_index(2, 3, 7), 2);
    assert_eq!(advance_combo_index(4, 0, 0), 0);
}

#[test]
fn test_charge_fraction_clamps() {
    assert_eq!(charge_fraction(400.0, 800.0), 0.5);
    assert_eq!(charge_fraction(1200.0, 800.0), 1.0);
    assert_eq!(charge_fraction(-10.0, 800.0), 0.0);
    assert_eq!(charge_fraction(400.0, 0.0), 0.0);
    assert_eq!(charge_fraction(f32::NAN, 800.0), 0.0);
}

#[test]
fn test_charge_damage_scale() {
    let registry = registry();
    let haymaker = &registry.abilities["haymaker"];
    assert_eq!(charge_damage_scale(400.0, haymaker), 1.5);
    assert_eq!(charge_damage_scale(5000.0, haymaker), 2.0);
    assert_eq!(charge_damage_scale(0.0, haymaker), 1.0);
}

#[test]
fn test_charge_state_lifecycle() {
    let mut charge = ChargeState::default();
    charge.tick(0.5);
    assert_eq!(charge.held_ms, 0.0);

    charge.begin("haymaker");
    charge.tick(0.25);
    charge.tick(0.25);
    assert!(charge.is_charging());
    assert_eq!(charge.release(), Some(("haymaker".to_string(), 500.0)));
    assert!(!charge.is_charging());
    assert_eq!(charge.release(), None);

    charge.begin("haymaker");
    charge.cancel();
    assert!(!charge.is_charging());
}

#[test]
fn test_combo_window_chains_then_expires() {
    let registry = registry();
    let mut timeline = AttackTimeline::default();
    let mut animator = PoseAnimator::default();
    let mut combo = ComboState::default();

    let run_to_end = |timeline: &mut AttackTimeline, animator: &mut PoseAnimator, combo: &mut ComboState| {
        let mut events = Vec::new();
        timeline.update(1.0, |event| events.push(event));
        apply_timeline_events(events, "boxing_combo", &registry, timeline, animator, combo)
    };

    let started = start_ability_move(&registry, "boxing_combo", 1.0, "stance", &mut timeline, &mut animator, &mut combo);
    assert_eq!(started.as_deref(), Some("jab"));
    assert_eq!(run_to_end(&mut timeline, &mut animator, &mut combo), Some(false));
    assert!(combo.window_open());

    let started = start_ability_move(&registry, "boxing_combo", 1.0, "stance", &mut timeline, &mut animator, &mut combo);
    assert_eq!(started.as_deref(), Some("cross"));
    run_to_end(&mut timeline, &mut animator, &mut combo);

    let started = start_ability_move(&registry, "boxing_combo", 1.0, "stance", &mut timeline, &mut animator, &mut combo);
    assert_eq!(started.as_deref(), Some("hook"));
    run_to_end(&mut timeline, &mut animator, &mut combo);
    // Wraps to loop_from.
    assert_eq!(combo.index, 0);

    combo.index = 1;
    combo.tick(0.4);
    assert!(!combo.window_open());
    let started = start_ability_move(&registry, "boxing_combo", 1.0, "stance", &mut timeline, &mut animator, &mut combo);
    assert_eq!(started.as_deref(), Some("jab"));
}

#[test]
fn test_single_ability_never_chains() {
    let registry = registry();
    let kick = &registry.abilities["front_kick"];
    let mut combo = ComboState::default();
    combo.select(kick);
    combo.finish(kick);
    assert!(!combo.window_open());
    assert_eq!(combo.ability_id, None);
}

// -----------------------------------------------------------------------------
// Orchestration tests
// -----------------------------------------------------------------------------

#[test]
fn test_start_transitions_animator_to_first_phase() {
    let registry = registry();
    let mut timeline = AttackTimeline::default();
    let mut animator = PoseAnimator::default();
    let mut combo = ComboState::default();

    let started = start_ability_move(&registry, "front_kick", 1.0, "stance", &mut timeline, &mut animator, &mut combo);
    assert_eq!(started.as_deref(), Some("front_kick"));
    assert_eq!(animator.phase, "Windup");
    assert!(animator.aim_disabled());

    let context = timeline.context().expect("attack running");
    assert_eq!(context.preset_id, "front_kick");
    assert_eq!(context.colliders, vec![ColliderKey::FootR]);
    assert_eq!(context.rest_pose, "stance");
    assert!(context.on_hit.is_some());
}

#[test]
fn test_unknown_ability_is_noop() {
    let registry = registry();
    let mut timeline = AttackTimeline::default();
    let mut animator = PoseAnimator::default();
    let mut combo = ComboState::default();

    let started = start_ability_move(&registry, "spin_kick", 1.0, "stance", &mut timeline, &mut animator, &mut combo);
    assert_eq!(started, None);
    assert!(!timeline.is_active());
    assert_eq!(animator.phase, "Stance");
}

#[test]
fn test_sequence_step_retargets_running_attack() {
    let registry = registry();
    let mut timeline = AttackTimeline::default();
    let mut animator = PoseAnimator::default();
    let mut combo = ComboState::default();
    start_ability_move(&registry, "flurry", 1.0, "stance", &mut timeline, &mut animator, &mut combo);

    let mut events = Vec::new();
    timeline.update(0.25, |event| events.push(event));
    let step_index = events.iter().position(|e| matches!(e, TimelineEvent::Step(_)));
    let impact_index = events
        .iter()
        .position(|e| matches!(e, TimelineEvent::PhaseTransition(t) if t.phase == "ImpactStrike"));
    assert!(step_index.is_some() && step_index < impact_index);

    let ended = apply_timeline_events(events, "flurry", &registry, &mut timeline, &mut animator, &mut combo);
    assert_eq!(ended, None);
    assert_eq!(timeline.current_phase(), Some("ImpactStrike"));
    assert_eq!(animator.phase, "ImpactStrike");
    let context = timeline.context().expect("still running");
    assert_eq!(context.move_id, "flurry_finisher");
    assert_eq!(context.preset_id, "flurry");
}

#[test]
fn test_cancel_attack_restores_rest_pose() {
    let registry = registry();
    let mut timeline = AttackTimeline::default();
    let mut animator = PoseAnimator::default();
    let mut combo = ComboState::default();

    start_ability_move(&registry, "boxing_combo", 1.0, "stance", &mut timeline, &mut animator, &mut combo);
    let mut events = Vec::new();
    timeline.update(0.1, |event| events.push(event));
    apply_timeline_events(events, "boxing_combo", &registry, &mut timeline, &mut animator, &mut combo);
    assert_eq!(animator.phase, "Strike");

    let cancelled = cancel_attack(&registry, &mut timeline, &mut animator, &mut combo);
    assert_eq!(cancelled.as_deref(), Some("boxing_combo"));
    assert!(!timeline.is_active());
    assert_eq!(animator.phase, REST_PHASE);
    assert!(!animator.mirrored);
    assert!(!combo.window_open());

    assert_eq!(cancel_attack(&registry, &mut timeline, &mut animator, &mut combo), None);
}

#[test]
fn test_mirrored_move_clears_on_rest() {
    let registry = registry();
    let mut timeline = AttackTimeline::default();
    let mut animator = PoseAnimator::default();
    let mut combo = ComboState {
        ability_id: Some("boxing_combo".to_string()),
        index: 1,
        window_ms: 100.0,
    };

    let started = start_ability_move(&registry, "boxing_combo", 1.0, "stance", &mut timeline, &mut animator, &mut combo);
    assert_eq!(started.as_deref(), Some("cross"));
    assert!(animator.mirrored);

    let mut events = Vec::new();
    timeline.update(1.0, |event| events.push(event));
    apply_timeline_events(events, "boxing_combo", &registry, &mut timeline, &mut animator, &mut combo);
    assert!(!animator.mirrored);
}

#[test]
fn test_plan_move_scales_damage() {
    let registry = registry();
    let ability = &registry.abilities["haymaker"];
    let mv = &registry.moves["haymaker"];
    let plan = plan_move(ability, mv, 2.0, "stance");

    assert_eq!(plan.segments.len(), mv.phases.len());
    assert_eq!(plan.context.trigger, TriggerKind::HoldRelease);

    let hook = plan.context.on_hit.expect("damage hook");
    let mut health = Health::new(100.0);
    let mut motion = FighterMotion::default();
    let mut target = hit_target(&mut health, &mut motion, Facing::Right);
    assert_eq!(hook(&mut target, &[ColliderKey::HandR]), Ok(()));
    assert_eq!(health.current, 72.0);
    assert_eq!(motion.position.x, 18.0);
}

#[test]
fn test_apply_step_collider_override() {
    let registry = registry();
    let finisher = &registry.moves["flurry_finisher"];
    let mut context = AttackContext::new("flurry", "flurry");

    apply_step(&mut context, finisher, Some(&[ColliderKey::FootL][..]));
    assert_eq!(context.move_id, "flurry_finisher");
    assert_eq!(context.colliders, vec![ColliderKey::FootL]);

    apply_step(&mut context, finisher, None);
    assert_eq!(context.colliders, finisher.colliders);
}

// -----------------------------------------------------------------------------
// Sparring AI tests
// -----------------------------------------------------------------------------

const SLOTS: [TriggerKind; 3] = [TriggerKind::Combo, TriggerKind::Single, TriggerKind::Defensive];

#[test]
fn test_same_seed_same_decisions() {
    let tuning = SparringTuning::default();
    let run = |seed: u64| {
        let mut rng = SparringRng::from_seed(seed);
        let mut brain = SparringBrain::default();
        (0..300)
            .map(|i| {
                let offset = if i % 50 < 25 { 40.0 } else { -200.0 };
                think(&mut brain, &mut rng.0, offset, &SLOTS, false, &tuning, 1.0 / 60.0)
            })
            .collect::<Vec<_>>()
    };

    let a = run(7);
    assert_eq!(a, run(7));
    assert!(a.iter().any(|intent| intent.press.is_some()));
}

#[test]
fn test_walks_in_when_out_of_range() {
    let tuning = SparringTuning::default();
    let mut rng = SparringRng::from_seed(1);
    let mut brain = SparringBrain::default();

    for _ in 0..120 {
        let intent = think(&mut brain, &mut rng.0, -300.0, &SLOTS, false, &tuning, 1.0 / 60.0);
        assert_eq!(intent.axis_x, -1.0);
        assert_eq!(intent.face_toward, Some(Facing::Left));
        assert_eq!(intent.press, None);
    }
}

#[test]
fn test_no_presses_while_attacking() {
    let tuning = SparringTuning {
        aggression: 1.0,
        ..default()
    };
    let mut rng = SparringRng::from_seed(3);
    let mut brain = SparringBrain::default();

    for _ in 0..120 {
        let intent = think(&mut brain, &mut rng.0, 30.0, &SLOTS, true, &tuning, 1.0 / 60.0);
        assert_eq!(intent.press, None);
        assert_eq!(intent.axis_x, 0.0);
    }
}

#[test]
fn test_hold_release_slot_is_released_later() {
    let tuning = SparringTuning {
        aggression: 1.0,
        ..default()
    };
    let mut rng = SparringRng::from_seed(11);
    let mut brain = SparringBrain::default();

    let first = think(&mut brain, &mut rng.0, 30.0, &[TriggerKind::HoldRelease], false, &tuning, 1.0 / 60.0);
    assert_eq!(first.press, Some(0));
    assert!(brain.holding.is_some());

    let released = (0..10).find_map(|_| {
        think(&mut brain, &mut rng.0, 30.0, &[TriggerKind::HoldRelease], false, &tuning, 0.1).release
    });
    assert_eq!(released, Some(0));
    assert!(brain.holding.is_none());
}
