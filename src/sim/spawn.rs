//! Spawning and difficulty progression
//!
//! Hazard kinds are introduced one at a time as the score climbs, then
//! mixed once the player has seen them all.

use rand::Rng;

use super::state::{GameState, HazardKind, Obstacle};
use crate::tuning::Tuning;

/// One rung of the curriculum: from `min_score` upward, spawn these kinds
#[derive(Debug, Clone, Copy)]
pub struct LadderRung {
    pub min_score: f32,
    pub kinds: &'static [HazardKind],
}

/// Score-gated kind selection, sorted by ascending threshold
pub const KIND_LADDER: &[LadderRung] = &[
    LadderRung {
        min_score: 0.0,
        kinds: &[HazardKind::Road],
    },
    LadderRung {
        min_score: 100.0,
        kinds: &[HazardKind::Fire],
    },
    LadderRung {
        min_score: 250.0,
        kinds: &[HazardKind::Hail],
    },
    LadderRung {
        min_score: 400.0,
        kinds: &[HazardKind::Quake],
    },
    LadderRung {
        min_score: 550.0,
        kinds: &[HazardKind::Flood],
    },
    LadderRung {
        min_score: 700.0,
        kinds: &HazardKind::ALL,
    },
];

/// Kinds allowed at the given score
pub fn allowed_kinds(score: f32) -> &'static [HazardKind] {
    KIND_LADDER
        .iter()
        .rev()
        .find(|rung| score >= rung.min_score)
        .unwrap_or(&KIND_LADDER[0])
        .kinds
}

/// Pick a kind for the next obstacle (uniform among the allowed kinds)
pub fn pick_kind<R: Rng>(score: f32, rng: &mut R) -> HazardKind {
    let kinds = allowed_kinds(score);
    if kinds.len() == 1 {
        return kinds[0];
    }
    kinds[rng.random_range(0..kinds.len())]
}

/// Raise speed by one step every `ramp_interval` ticks, up to the cap.
/// Returns true if the speed changed.
pub fn apply_difficulty_ramp(state: &mut GameState, tuning: &Tuning) -> bool {
    if !state.tick.is_multiple_of(tuning.ramp_interval) || state.speed >= tuning.max_speed {
        return false;
    }
    state.speed = (state.speed + 1.0).min(tuning.max_speed);
    log::debug!("Speed up to {} at tick {}", state.speed, state.tick);
    true
}

/// Spawn an obstacle if this tick lands on the cadence.
/// Returns the spawned obstacle's kind.
pub fn maybe_spawn(state: &mut GameState, tuning: &Tuning) -> Option<HazardKind> {
    let interval = tuning.spawn_interval(state.speed);
    if !state.tick.is_multiple_of(interval) {
        return None;
    }

    let kind = pick_kind(state.score, &mut state.rng);
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle::new(id, state.speed, kind));
    log::debug!("Spawned {} obstacle #{} at tick {}", kind.as_str(), id, state.tick);
    Some(kind)
}
