//! Game state and core simulation types
//!
//! Everything a session needs to advance deterministically lives here.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Hazard types; each has its own icon and question pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    Road,
    Fire,
    Hail,
    Quake,
    Flood,
}

impl HazardKind {
    pub const ALL: [HazardKind; 5] = [
        HazardKind::Road,
        HazardKind::Fire,
        HazardKind::Hail,
        HazardKind::Quake,
        HazardKind::Flood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Road => "road",
            HazardKind::Fire => "fire",
            HazardKind::Hail => "hail",
            HazardKind::Quake => "quake",
            HazardKind::Flood => "flood",
        }
    }

    /// Look up a kind by name; unknown names yield None
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// The player's avatar
///
/// `pos.y` is the bottom edge, so a grounded runner sits at `GROUND_Y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Runner {
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (negative = up)
    pub vy: f32,
    pub on_ground: bool,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            pos: Vec2::new(RUNNER_X, GROUND_Y),
            size: Vec2::new(RUNNER_WIDTH, RUNNER_HEIGHT),
            vy: 0.0,
            on_ground: true,
        }
    }
}

impl Runner {
    /// Start a jump. No double-jumps: returns false and changes nothing mid-air.
    pub fn jump(&mut self, impulse: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = impulse;
        self.on_ground = false;
        true
    }

    /// Apply gravity and integrate one tick, landing on the baseline
    pub fn update(&mut self, gravity: f32) {
        self.vy += gravity;
        self.pos.y += self.vy;
        if self.pos.y >= GROUND_Y {
            self.pos.y = GROUND_Y;
            self.vy = 0.0;
            self.on_ground = true;
        }
    }

    pub fn bbox(&self) -> Aabb {
        Aabb::from_bottom_left(self.pos, self.size)
    }
}

/// A hazard scrolling toward the runner
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward speed in pixels per tick
    pub speed: f32,
    pub kind: HazardKind,
    /// Cleared once off-screen or after triggering a quiz; never set again
    pub active: bool,
}

impl Obstacle {
    /// Create an obstacle at the right edge of the field
    pub fn new(id: u32, speed: f32, kind: HazardKind) -> Self {
        Self {
            id,
            pos: Vec2::new(OBSTACLE_SPAWN_X, GROUND_Y),
            size: Vec2::splat(OBSTACLE_SIZE),
            speed,
            kind,
            active: true,
        }
    }

    pub fn update(&mut self) {
        self.pos.x -= self.speed;
        if self.pos.x < CULL_X {
            self.active = false;
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn bbox(&self) -> Aabb {
        Aabb::from_bottom_left(self.pos, self.size)
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advances every frame
    Running,
    /// A quiz is open; nothing advances until it is answered
    AwaitingAnswer,
}

/// Result reported by the answer UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizOutcome {
    Correct,
    Incorrect,
}

impl From<bool> for QuizOutcome {
    fn from(correct: bool) -> Self {
        if correct {
            QuizOutcome::Correct
        } else {
            QuizOutcome::Incorrect
        }
    }
}

/// A request for a question, served by the question bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRequest {
    pub quiz_id: u32,
    pub kind: HazardKind,
}

/// The quiz currently awaiting an answer
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuiz {
    pub quiz_id: u32,
    pub kind: HazardKind,
    /// The obstacle that triggered it (already deactivated)
    pub obstacle: Obstacle,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Kind selection RNG; continues across resets
    pub rng: Pcg32,
    /// False until the first reset starts the session
    pub running: bool,
    pub speed: f32,
    pub score: f32,
    /// Simulation tick counter
    pub tick: u64,
    pub lives: u8,
    pub phase: GamePhase,
    pub runner: Runner,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Questions requested but not yet shown
    pub quiz_queue: VecDeque<QuizRequest>,
    pub pending_quiz: Option<PendingQuiz>,
    /// Next entity ID
    next_id: u32,
    /// Next quiz ID (not reset, so late answers from an old session stay stale)
    next_quiz_id: u32,
}

impl GameState {
    /// Create an idle session; call `reset` to start it
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            running: false,
            speed: tuning.start_speed,
            score: 0.0,
            tick: 0,
            lives: tuning.start_lives,
            phase: GamePhase::Running,
            runner: Runner::default(),
            obstacles: Vec::new(),
            quiz_queue: VecDeque::new(),
            pending_quiz: None,
            next_id: 1,
            next_quiz_id: 1,
        }
    }

    /// Reinitialize every session field and mark the session running
    pub fn reset(&mut self, tuning: &Tuning) {
        self.running = true;
        self.speed = tuning.start_speed;
        self.score = 0.0;
        self.tick = 0;
        self.lives = tuning.start_lives;
        self.phase = GamePhase::Running;
        self.runner = Runner::default();
        self.obstacles.clear();
        self.quiz_queue.clear();
        self.pending_quiz = None;
        self.next_id = 1;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Allocate a new quiz ID
    pub fn next_quiz_id(&mut self) -> u32 {
        let id = self.next_quiz_id;
        self.next_quiz_id += 1;
        id
    }

    pub fn is_awaiting_answer(&self) -> bool {
        self.phase == GamePhase::AwaitingAnswer
    }

    /// Add to the score, saturating at zero from below
    pub fn add_score(&mut self, delta: f32) {
        self.score = (self.score + delta).max(0.0);
    }
}
