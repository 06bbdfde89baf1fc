//! Debug domain: periodic fighter state logging.

use bevy::prelude::*;

use crate::combat::{AttackTimeline, ColliderSamples, Health, HitCounters, Stamina};
use crate::debug::DebugState;
use crate::roster::Fighter;

pub(crate) fn log_fighter_state(
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    samples: Res<ColliderSamples>,
    query: Query<(&Fighter, &AttackTimeline, &Health, &Stamina, &HitCounters)>,
) {
    if !debug_state.show_info {
        return;
    }
    debug_state.log_timer.tick(time.delta());
    if !debug_state.log_timer.just_finished() {
        return;
    }

    for (fighter, timeline, health, stamina, counters) in &query {
        let resolved = samples
            .get(fighter.id)
            .map(|limbs| limbs.iter().filter(|(_, sample)| sample.is_some()).count())
            .unwrap_or(0);
        debug!(
            "[debug] {} '{}': phase={} hp={:.0}/{:.0} stamina={:.0}/{:.0} hits_taken={} colliders={}/4",
            fighter.id,
            fighter.def_id,
            timeline.current_phase().unwrap_or("-"),
            health.current,
            health.max,
            stamina.current,
            stamina.max,
            counters.body,
            resolved
        );
    }
}
