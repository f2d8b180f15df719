//! Session driver
//!
//! `Game` owns the session state and wires the simulation to its
//! collaborators: it runs one tick per accepted frame, hands quiz requests
//! to the answer UI, applies answers, and resets the session on restart or
//! when the last life is lost.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::questions::QuestionBank;
use crate::renderer::{Frame, Renderer};
use crate::scheduler::{FrameLoop, FrameScheduler, FrameToken};
use crate::sim::{
    AnswerRejected, GameState, QuizOutcome, Resolution, TickReport, next_request, resolve_quiz,
    tick,
};
use crate::tuning::Tuning;
use crate::ui::{AnswerUi, Hud, HudSnapshot};

/// Offsets the question RNG from the kind RNG so both streams differ
const QUIZ_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Receives finished runs
pub trait ScoreSink {
    fn record_run(&mut self, final_score: f32, at: f64);
}

impl<T: ScoreSink> ScoreSink for Rc<RefCell<T>> {
    fn record_run(&mut self, final_score: f32, at: f64) {
        self.borrow_mut().record_run(final_score, at);
    }
}

/// Everything outside the core the driver talks to
pub struct Collaborators {
    pub renderer: Box<dyn Renderer>,
    pub hud: Box<dyn Hud>,
    pub answer_ui: Box<dyn AnswerUi>,
    pub score_sink: Box<dyn ScoreSink>,
    pub scheduler: Box<dyn FrameScheduler>,
    /// Wall clock in milliseconds since the epoch
    pub clock: fn() -> f64,
}

/// Result of delivering a frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    /// Token was not the pending request; nothing happened
    Stale,
    /// A quiz is open; the next frame was requested but nothing moved
    Suspended,
    /// One tick ran
    Advanced(TickReport),
}

/// A game session and its collaborators
pub struct Game {
    state: GameState,
    tuning: Tuning,
    bank: QuestionBank,
    quiz_rng: Pcg32,
    frames: FrameLoop,
    io: Collaborators,
}

impl Game {
    /// Create an idle game; call `start` to begin
    pub fn new(seed: u64, tuning: Tuning, bank: QuestionBank, io: Collaborators) -> Self {
        let tuning = tuning.sanitized();
        Self {
            state: GameState::new(seed, &tuning),
            tuning,
            bank,
            quiz_rng: Pcg32::seed_from_u64(seed ^ QUIZ_STREAM),
            frames: FrameLoop::new(),
            io,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tools and tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn hud_snapshot(&self) -> HudSnapshot {
        HudSnapshot::from_state(&self.state)
    }

    /// Start the first session
    pub fn start(&mut self) {
        log::info!("Starting session with seed {}", self.state.seed);
        self.reset();
    }

    /// Jump input. Ignored while idle or while a quiz is open.
    pub fn jump(&mut self) -> bool {
        if !self.state.running || self.state.is_awaiting_answer() {
            return false;
        }
        self.state.runner.jump(self.tuning.jump_impulse)
    }

    /// Restart input. Ignored while a quiz is open.
    pub fn restart(&mut self) -> bool {
        if self.state.is_awaiting_answer() {
            log::warn!("Restart ignored while a quiz is open");
            return false;
        }
        self.reset();
        true
    }

    /// Record the finished run, reinitialize the session and restart the loop
    pub fn reset(&mut self) {
        self.frames.cancel(self.io.scheduler.as_mut());

        if self.state.running && self.state.score > 0.0 {
            let at = (self.io.clock)();
            self.io.score_sink.record_run(self.state.score, at);
        }

        self.state.reset(&self.tuning);
        self.publish_hud();
        self.frames.schedule(self.io.scheduler.as_mut());
        log::info!(
            "Session reset: speed {}, lives {}",
            self.state.speed,
            self.state.lives
        );
    }

    /// Handle a fired frame request
    pub fn frame(&mut self, token: FrameToken) -> FrameStatus {
        if !self.frames.accept(token) {
            log::debug!("Dropping stale frame {}", token.id());
            return FrameStatus::Stale;
        }

        // Keep the chain alive even while suspended
        self.frames.schedule(self.io.scheduler.as_mut());
        if self.state.is_awaiting_answer() {
            return FrameStatus::Suspended;
        }

        let report = tick(&mut self.state, &self.tuning);
        self.serve_quiz_requests();

        self.io.renderer.render(&Frame::from_state(&self.state));
        self.publish_hud();
        FrameStatus::Advanced(report)
    }

    /// Apply the answer to the open quiz
    pub fn answer(
        &mut self,
        quiz_id: u32,
        outcome: QuizOutcome,
    ) -> Result<Resolution, AnswerRejected> {
        let resolution = resolve_quiz(&mut self.state, quiz_id, outcome, &self.tuning)
            .inspect_err(|e| log::warn!("Ignoring answer: {}", e))?;

        match resolution {
            Resolution::Resumed => self.publish_hud(),
            Resolution::LivesExhausted { final_score } => {
                log::info!("Out of lives with {:.0} points", final_score);
                self.reset();
            }
        }
        Ok(resolution)
    }

    fn serve_quiz_requests(&mut self) {
        while let Some(request) = next_request(&mut self.state) {
            let question = self.bank.pick(request.kind, &mut self.quiz_rng);
            self.io.answer_ui.show_question(request.quiz_id, question);
        }
    }

    fn publish_hud(&mut self) {
        self.io.hud.update(&HudSnapshot::from_state(&self.state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::questions::Question;
    use crate::scheduler::ManualScheduler;
    use crate::sim::{HazardKind, Obstacle};

    #[derive(Default)]
    struct Record {
        renders: usize,
        huds: Vec<HudSnapshot>,
        questions: Vec<(u32, String)>,
        runs: Vec<(f32, f64)>,
    }

    type Shared = Rc<RefCell<Record>>;

    struct Fake(Shared);

    impl Renderer for Fake {
        fn render(&mut self, _frame: &Frame<'_>) {
            self.0.borrow_mut().renders += 1;
        }
    }

    impl Hud for Fake {
        fn update(&mut self, hud: &HudSnapshot) {
            self.0.borrow_mut().huds.push(*hud);
        }
    }

    impl AnswerUi for Fake {
        fn show_question(&mut self, quiz_id: u32, question: &Question) {
            self.0
                .borrow_mut()
                .questions
                .push((quiz_id, question.kind.clone()));
        }
    }

    impl ScoreSink for Fake {
        fn record_run(&mut self, final_score: f32, at: f64) {
            self.0.borrow_mut().runs.push((final_score, at));
        }
    }

    fn fixed_clock() -> f64 {
        1_700_000_000_000.0
    }

    fn game() -> (Game, Shared, ManualScheduler) {
        let record = Shared::default();
        let scheduler = ManualScheduler::new();
        let io = Collaborators {
            renderer: Box::new(Fake(record.clone())),
            hud: Box::new(Fake(record.clone())),
            answer_ui: Box::new(Fake(record.clone())),
            score_sink: Box::new(Fake(record.clone())),
            scheduler: Box::new(scheduler.clone()),
            clock: fixed_clock,
        };
        let mut game = Game::new(7, Tuning::default(), QuestionBank::default(), io);
        game.start();
        (game, record, scheduler)
    }

    /// Deliver the next outstanding frame
    fn step(game: &mut Game, scheduler: &ManualScheduler) -> FrameStatus {
        let token = scheduler.take_next().expect("a frame should be pending");
        game.frame(token)
    }

    /// Put an obstacle where the next tick will overlap the runner
    fn place_obstacle(game: &mut Game, kind: HazardKind) {
        let state = game.state_mut();
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::new(id, state.speed, kind);
        obstacle.pos.x = RUNNER_X + RUNNER_WIDTH + 2.0;
        state.obstacles.push(obstacle);
    }

    /// Run into a hazard and return the quiz id shown
    fn collide(game: &mut Game, scheduler: &ManualScheduler, record: &Shared) -> u32 {
        place_obstacle(game, HazardKind::Fire);
        let status = step(game, scheduler);
        assert!(matches!(status, FrameStatus::Advanced(ref r) if r.quiz.is_some()));
        record.borrow().questions.last().expect("question shown").0
    }

    #[test]
    fn test_start_schedules_one_frame() {
        let (game, record, scheduler) = game();
        assert!(game.state().running);
        assert_eq!(scheduler.outstanding(), 1);
        assert_eq!(record.borrow().huds.len(), 1);
        assert!(record.borrow().runs.is_empty());
    }

    #[test]
    fn test_frames_render_and_update_hud() {
        let (mut game, record, scheduler) = game();
        for _ in 0..10 {
            assert!(matches!(
                step(&mut game, &scheduler),
                FrameStatus::Advanced(_)
            ));
            assert_eq!(scheduler.outstanding(), 1);
        }
        assert_eq!(game.state().tick, 10);
        assert_eq!(record.borrow().renders, 10);
        assert_eq!(record.borrow().huds.len(), 11);
        assert!(game.state().score > 0.0);
    }

    #[test]
    fn test_wrong_answer_costs_a_life() {
        let (mut game, record, scheduler) = game();
        let quiz_id = collide(&mut game, &scheduler, &record);

        assert!(game.state().is_awaiting_answer());
        assert!(game.state().obstacles.is_empty());
        assert_eq!(record.borrow().questions[0].1, "fire");

        let result = game.answer(quiz_id, QuizOutcome::Incorrect);
        assert_eq!(result, Ok(Resolution::Resumed));

        let state = game.state();
        assert!(!state.is_awaiting_answer());
        assert_eq!(state.lives, 2);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.speed, 5.0);

        // Resumes on the very next frame
        assert!(matches!(
            step(&mut game, &scheduler),
            FrameStatus::Advanced(_)
        ));
    }

    #[test]
    fn test_correct_answer_rewards() {
        let (mut game, record, scheduler) = game();
        let quiz_id = collide(&mut game, &scheduler, &record);
        let before = game.state().score;

        assert_eq!(
            game.answer(quiz_id, QuizOutcome::Correct),
            Ok(Resolution::Resumed)
        );
        assert_eq!(game.state().score, before + 20.0);
        assert_eq!(game.state().lives, 3);
        assert_eq!(game.state().speed, 6.0);
    }

    #[test]
    fn test_frames_suspended_while_quiz_open() {
        let (mut game, record, scheduler) = game();
        collide(&mut game, &scheduler, &record);

        let score = game.state().score;
        let runner = game.state().runner.clone();
        let renders = record.borrow().renders;
        for _ in 0..5 {
            assert_eq!(step(&mut game, &scheduler), FrameStatus::Suspended);
            assert_eq!(scheduler.outstanding(), 1);
        }
        assert_eq!(game.state().score, score);
        assert_eq!(game.state().runner, runner);
        assert_eq!(record.borrow().renders, renders);
    }

    #[test]
    fn test_last_life_resets_session() {
        let (mut game, record, scheduler) = game();
        game.state_mut().lives = 1;
        game.state_mut().score = 50.0;
        let quiz_id = collide(&mut game, &scheduler, &record);
        let old_token = game.frames.pending().expect("frame pending");

        let result = game.answer(quiz_id, QuizOutcome::Incorrect);
        assert!(matches!(result, Ok(Resolution::LivesExhausted { .. })));

        let state = game.state();
        assert!(state.running);
        assert!(!state.is_awaiting_answer());
        assert_eq!(state.score, 0.0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.speed, 6.0);
        assert!(state.obstacles.is_empty());

        // Finished run reported, old frame cancelled and replaced
        let runs = record.borrow().runs.clone();
        assert_eq!(runs.len(), 1);
        assert!(runs[0].0 > 50.0);
        assert_eq!(runs[0].1, fixed_clock());
        assert!(scheduler.cancelled().contains(&old_token));
        assert_eq!(scheduler.outstanding(), 1);
        assert_eq!(game.frame(old_token), FrameStatus::Stale);
    }

    #[test]
    fn test_restart_ignored_while_quiz_open() {
        let (mut game, record, scheduler) = game();
        let quiz_id = collide(&mut game, &scheduler, &record);

        assert!(!game.restart());
        assert!(game.state().is_awaiting_answer());
        assert!(record.borrow().runs.is_empty());
        assert!(game.answer(quiz_id, QuizOutcome::Correct).is_ok());
    }

    #[test]
    fn test_restart_records_scored_runs_only() {
        let (mut game, record, scheduler) = game();
        assert!(game.restart());
        assert!(record.borrow().runs.is_empty(), "zero score is not recorded");

        for _ in 0..30 {
            step(&mut game, &scheduler);
        }
        assert!(game.restart());
        assert_eq!(record.borrow().runs.len(), 1);
        assert_eq!(game.state().tick, 0);
        assert_eq!(scheduler.outstanding(), 1);
    }

    #[test]
    fn test_stale_and_repeated_answers_ignored() {
        let (mut game, record, scheduler) = game();
        let quiz_id = collide(&mut game, &scheduler, &record);

        assert_eq!(
            game.answer(quiz_id + 1, QuizOutcome::Correct),
            Err(AnswerRejected::StaleQuiz {
                pending: quiz_id,
                answered: quiz_id + 1
            })
        );
        assert!(game.state().is_awaiting_answer());

        assert!(game.answer(quiz_id, QuizOutcome::Incorrect).is_ok());
        assert_eq!(
            game.answer(quiz_id, QuizOutcome::Incorrect),
            Err(AnswerRejected::NotAwaiting)
        );
        assert_eq!(game.state().lives, 2);
    }

    #[test]
    fn test_jump_blocked_during_quiz() {
        let (mut game, record, scheduler) = game();
        assert!(game.jump());
        assert!(!game.jump(), "no double jump");

        // Land, then hit a hazard
        while !game.state().runner.on_ground {
            step(&mut game, &scheduler);
        }
        collide(&mut game, &scheduler, &record);
        assert!(!game.jump());
        assert!(game.state().runner.on_ground);
    }

    #[test]
    fn test_same_seed_same_session() {
        let (mut a, _, sa) = game();
        let (mut b, _, sb) = game();
        for i in 0..600 {
            if i % 45 == 0 {
                a.jump();
                b.jump();
            }
            step(&mut a, &sa);
            step(&mut b, &sb);
        }
        assert_eq!(a.state().score, b.state().score);
        assert_eq!(a.state().obstacles, b.state().obstacles);
    }
}
