//! Combat domain: seeded sparring AI for non-player fighters.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::aim::{AimState, FaceLock};
use crate::combat::timeline::AttackTimeline;
use crate::content::{ContentRegistry, TriggerKind};
use crate::core::{FighterInput, RunConfig};
use crate::movement::{Facing, FighterMotion};
use crate::rig::Bones;
use crate::roster::Loadout;

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SparringTuning {
    /// Horizontal distance at which the AI stops walking in and starts attacking.
    pub engage_range: f32,
    pub think_min_ms: f32,
    pub think_max_ms: f32,
    pub charge_min_ms: f32,
    pub charge_max_ms: f32,
    /// Chance to attack when a think tick lands in range.
    pub aggression: f32,
}

impl Default for SparringTuning {
    fn default() -> Self {
        Self {
            engage_range: 70.0,
            think_min_ms: 250.0,
            think_max_ms: 700.0,
            charge_min_ms: 200.0,
            charge_max_ms: 800.0,
            aggression: 0.8,
        }
    }
}

/// Run-wide AI random source, seeded from the run config.
#[derive(Resource, Debug, Clone)]
pub struct SparringRng(pub ChaCha8Rng);

impl SparringRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct SparringBrain {
    /// Time until the next decision.
    pub think_ms: f32,
    /// Slot being held and time left before releasing it.
    pub holding: Option<(usize, f32)>,
}

/// What the AI wants to do this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparringIntent {
    pub axis_x: f32,
    pub face_toward: Option<Facing>,
    pub press: Option<usize>,
    pub release: Option<usize>,
}

fn random_between(rng: &mut impl Rng, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if !lo.is_finite() || !hi.is_finite() {
        return 0.0;
    }
    if lo == hi { lo } else { rng.random_range(lo..hi) }
}

/// One decision step. `offset_x` is the target's position minus ours;
/// `triggers` lists the trigger kind of each loadout slot.
pub fn think(
    brain: &mut SparringBrain,
    rng: &mut impl Rng,
    offset_x: f32,
    triggers: &[TriggerKind],
    attacking: bool,
    tuning: &SparringTuning,
    dt: f32,
) -> SparringIntent {
    let dt_ms = if dt.is_finite() && dt > 0.0 { dt * 1000.0 } else { 0.0 };
    let mut intent = SparringIntent {
        face_toward: Facing::from_axis(offset_x.signum()),
        ..default()
    };

    if let Some((slot, remaining)) = brain.holding {
        let remaining = remaining - dt_ms;
        if remaining <= 0.0 {
            intent.release = Some(slot);
            brain.holding = None;
        } else {
            brain.holding = Some((slot, remaining));
        }
        return intent;
    }

    let in_range = offset_x.abs() <= tuning.engage_range;
    if !in_range && !attacking {
        intent.axis_x = offset_x.signum();
    }
    if attacking {
        return intent;
    }

    brain.think_ms -= dt_ms;
    if brain.think_ms > 0.0 {
        return intent;
    }
    brain.think_ms = random_between(rng, tuning.think_min_ms, tuning.think_max_ms);

    if in_range && !triggers.is_empty() && rng.random::<f32>() < tuning.aggression {
        let slot = rng.random_range(0..triggers.len());
        intent.press = Some(slot);
        if triggers[slot] == TriggerKind::HoldRelease {
            let hold = random_between(rng, tuning.charge_min_ms, tuning.charge_max_ms);
            brain.holding = Some((slot, hold));
        }
    }
    intent
}

pub(crate) fn seed_sparring_rng(mut commands: Commands, config: Res<RunConfig>) {
    info!("Sparring AI seed: {}", config.seed);
    commands.insert_resource(SparringRng::from_seed(config.seed));
}

pub(crate) fn drive_sparring_ai(
    time: Res<Time>,
    tuning: Res<SparringTuning>,
    registry: Res<ContentRegistry>,
    mut rng: ResMut<SparringRng>,
    mut npcs: Query<(
        Entity,
        &FighterMotion,
        &Loadout,
        &AttackTimeline,
        &mut FighterInput,
        &mut AimState,
        &mut SparringBrain,
    )>,
    targets: Query<(Entity, &FighterMotion, &Bones)>,
) {
    let dt = time.delta_secs();

    for (entity, motion, loadout, timeline, mut input, mut aim, mut brain) in &mut npcs {
        let nearest = targets
            .iter()
            .filter(|(other, _, _)| *other != entity)
            .min_by(|a, b| {
                let da = a.1.position.distance_squared(motion.position);
                let db = b.1.position.distance_squared(motion.position);
                da.total_cmp(&db)
            });
        let Some((_, target_motion, target_bones)) = nearest else {
            input.axis = Vec2::ZERO;
            aim.unlock();
            continue;
        };

        aim.lock(FaceLock::Point(target_bones.neck().unwrap_or(target_motion.position)));

        let triggers: Vec<TriggerKind> = loadout
            .abilities
            .iter()
            .map(|id| {
                registry
                    .abilities
                    .get(id)
                    .map(|ability| ability.trigger)
                    .unwrap_or_default()
            })
            .collect();
        let intent = think(
            &mut brain,
            &mut rng.0,
            target_motion.position.x - motion.position.x,
            &triggers,
            timeline.is_active(),
            &tuning,
            dt,
        );

        input.axis = Vec2::new(intent.axis_x, 0.0);
        input.face_toward = intent.face_toward;
        if intent.press.is_some() {
            input.ability_pressed = intent.press;
        }
        if intent.release.is_some() {
            input.ability_released = intent.release;
        }
    }
}
