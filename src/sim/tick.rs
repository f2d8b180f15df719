//! Fixed-step simulation tick
//!
//! Core game loop step that advances the session deterministically.

use super::collision::first_hit;
use super::quiz::begin_quiz;
use super::spawn::{apply_difficulty_ramp, maybe_spawn};
use super::state::{GameState, HazardKind, QuizRequest};
use crate::tuning::Tuning;

/// What a single tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// False when the tick was skipped (not running, or a quiz is open)
    pub advanced: bool,
    /// Speed went up this tick
    pub sped_up: bool,
    /// Kind of the obstacle spawned this tick
    pub spawned: Option<HazardKind>,
    /// Quiz opened by a collision this tick
    pub quiz: Option<QuizRequest>,
}

/// Advance the game state by one tick.
///
/// Order: tick counter, difficulty ramp, spawn, entity updates, culling,
/// collision scan (first hit only), passive scoring.
pub fn tick(state: &mut GameState, tuning: &Tuning) -> TickReport {
    let mut report = TickReport::default();

    // Nothing moves while a quiz is open
    if !state.running || state.is_awaiting_answer() {
        return report;
    }

    state.tick += 1;
    report.sped_up = apply_difficulty_ramp(state, tuning);
    report.spawned = maybe_spawn(state, tuning);

    state.runner.update(tuning.gravity);
    let speed = state.speed;
    for obstacle in &mut state.obstacles {
        obstacle.speed = speed;
        obstacle.update();
    }
    state.obstacles.retain(|o| o.active);

    if let Some(index) = first_hit(&state.runner, &state.obstacles) {
        report.quiz = Some(begin_quiz(state, index));
    }

    state.add_score(tuning.accrual_rate * state.speed);
    report.advanced = true;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::quiz::{Resolution, resolve_quiz};
    use crate::sim::state::{GamePhase, Obstacle, QuizOutcome};

    fn running_state(seed: u64) -> (GameState, Tuning) {
        let tuning = Tuning::default();
        let mut state = GameState::new(seed, &tuning);
        state.reset(&tuning);
        (state, tuning)
    }

    /// Put an obstacle of `kind` right in front of the runner
    fn place_obstacle(state: &mut GameState, kind: HazardKind) {
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::new(id, state.speed, kind);
        obstacle.pos.x = RUNNER_X + RUNNER_WIDTH + 2.0;
        state.obstacles.push(obstacle);
    }

    #[test]
    fn test_idle_state_does_not_tick() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        let report = tick(&mut state, &tuning);
        assert!(!report.advanced);
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn test_tick_accrues_score() {
        let (mut state, tuning) = running_state(1);
        let report = tick(&mut state, &tuning);
        assert!(report.advanced);
        assert_eq!(state.tick, 1);
        assert!((state.score - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_first_spawn_at_cadence() {
        let (mut state, tuning) = running_state(1);
        for _ in 0..103 {
            assert_eq!(tick(&mut state, &tuning).spawned, None);
        }
        assert_eq!(tick(&mut state, &tuning).spawned, Some(HazardKind::Road));
        assert_eq!(state.obstacles.len(), 1);
        // Spawned then moved once in the same tick
        assert_eq!(state.obstacles[0].pos.x, OBSTACLE_SPAWN_X - 6.0);
    }

    #[test]
    fn test_unjumped_runner_hits_first_obstacle() {
        let (mut state, tuning) = running_state(1);
        let mut quiz = None;
        for _ in 0..1000 {
            let report = tick(&mut state, &tuning);
            if report.quiz.is_some() {
                quiz = report.quiz;
                break;
            }
        }
        let quiz = quiz.expect("runner should collide eventually");
        assert_eq!(quiz.kind, HazardKind::Road);
        assert_eq!(state.phase, GamePhase::AwaitingAnswer);
    }

    #[test]
    fn test_collision_opens_quiz_and_deactivates_obstacle() {
        let (mut state, tuning) = running_state(1);
        place_obstacle(&mut state, HazardKind::Fire);

        let report = tick(&mut state, &tuning);
        let request = report.quiz.expect("collision expected");
        assert_eq!(request.kind, HazardKind::Fire);
        assert!(state.is_awaiting_answer());
        assert!(state.obstacles.is_empty());
        assert!(!state.pending_quiz.as_ref().unwrap().obstacle.active);
    }

    #[test]
    fn test_only_one_quiz_per_tick() {
        let (mut state, tuning) = running_state(1);
        place_obstacle(&mut state, HazardKind::Fire);
        place_obstacle(&mut state, HazardKind::Hail);

        let report = tick(&mut state, &tuning);
        assert_eq!(report.quiz.map(|q| q.kind), Some(HazardKind::Fire));
        assert_eq!(state.quiz_queue.len(), 1);
        // The second obstacle survives; it is still overlapping but frozen
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].kind, HazardKind::Hail);
    }

    #[test]
    fn test_paused_ticks_change_nothing() {
        let (mut state, tuning) = running_state(1);
        place_obstacle(&mut state, HazardKind::Fire);
        // A far obstacle that would otherwise move
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::new(id, state.speed, HazardKind::Road));
        tick(&mut state, &tuning);
        assert!(state.is_awaiting_answer());

        let frozen = state.clone();
        for _ in 0..500 {
            let report = tick(&mut state, &tuning);
            assert!(!report.advanced);
        }
        assert_eq!(state.tick, frozen.tick);
        assert_eq!(state.score, frozen.score);
        assert_eq!(state.speed, frozen.speed);
        assert_eq!(state.runner, frozen.runner);
        assert_eq!(state.obstacles, frozen.obstacles);
    }

    #[test]
    fn test_wrong_answer_scenario() {
        let (mut state, tuning) = running_state(5);
        assert_eq!((state.score, state.lives, state.speed), (0.0, 3, 6.0));

        place_obstacle(&mut state, HazardKind::Fire);
        let request = tick(&mut state, &tuning).quiz.unwrap();
        assert!(state.is_awaiting_answer());
        let prev_score = state.score;
        let prev_speed = state.speed;

        let resolution =
            resolve_quiz(&mut state, request.quiz_id, QuizOutcome::Incorrect, &tuning).unwrap();
        assert_eq!(resolution, Resolution::Resumed);
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, (prev_score - 20.0).max(0.0));
        assert_eq!(state.speed, (prev_speed - 1.0).max(tuning.min_speed));
        assert!(!state.is_awaiting_answer());

        // Resumes immediately
        assert!(tick(&mut state, &tuning).advanced);
    }

    #[test]
    fn test_determinism() {
        let (mut a, tuning) = running_state(99999);
        let (mut b, _) = running_state(99999);
        a.score = 800.0;
        b.score = 800.0;

        for i in 0..3000 {
            if i % 37 == 0 {
                a.runner.jump(tuning.jump_impulse);
                b.runner.jump(tuning.jump_impulse);
            }
            let ra = tick(&mut a, &tuning);
            let rb = tick(&mut b, &tuning);
            assert_eq!(ra, rb);
            if let Some(request) = ra.quiz {
                resolve_quiz(&mut a, request.quiz_id, QuizOutcome::Correct, &tuning).unwrap();
                resolve_quiz(&mut b, request.quiz_id, QuizOutcome::Correct, &tuning).unwrap();
            }
        }
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.score, b.score);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn numeric_state_stays_in_range(
                seed in 0u64..1000,
                jumps in proptest::collection::vec(any::<bool>(), 50..400),
                answers in proptest::collection::vec(any::<bool>(), 1..40),
            ) {
                let (mut state, tuning) = running_state(seed);
                let mut answers = answers.into_iter().cycle();

                for &jump in &jumps {
                    for _ in 0..20 {
                        if jump {
                            state.runner.jump(tuning.jump_impulse);
                        }
                        if let Some(request) = tick(&mut state, &tuning).quiz {
                            let outcome = QuizOutcome::from(answers.next().unwrap_or(true));
                            let resolution =
                                resolve_quiz(&mut state, request.quiz_id, outcome, &tuning).unwrap();
                            if let Resolution::LivesExhausted { .. } = resolution {
                                state.reset(&tuning);
                            }
                        }

                        prop_assert!(state.score >= 0.0);
                        prop_assert!(state.speed >= tuning.min_speed);
                        prop_assert!(state.speed <= tuning.max_speed);
                        prop_assert!(state.lives <= tuning.start_lives);
                        prop_assert!(state.runner.pos.y <= GROUND_Y);
                    }
                }
            }

            #[test]
            fn mid_air_jump_is_noop(ticks_in_air in 1usize..20) {
                let (mut state, tuning) = running_state(1);
                state.runner.jump(tuning.jump_impulse);
                for _ in 0..ticks_in_air {
                    state.runner.update(tuning.gravity);
                }
                prop_assume!(!state.runner.on_ground);

                let before = state.runner.clone();
                prop_assert!(!state.runner.jump(tuning.jump_impulse));
                prop_assert_eq!(&state.runner, &before);
            }
        }
    }
}
