//! Hazard Runner - A side-scrolling runner with safety quizzes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, quiz state machine)
//! - `game`: Session driver wiring the simulation to its collaborators
//! - `scheduler`: Frame request bookkeeping (one loop chain at a time)
//! - `questions`: Safety quiz question bank
//! - `leaderboard`: Top-10 scores with name memory and JSON export/import
//! - `renderer`: Scene construction and Canvas 2D drawing
//! - `ui`: HUD formatting and the quiz answer panel
//! - `settings`: Display preferences
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod leaderboard;
pub mod platform;
pub mod questions;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::{Collaborators, Game};
pub use leaderboard::Leaderboard;
pub use questions::{Question, QuestionBank};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

/// Playfield geometry (screen pixels, y grows downward)
pub mod consts {
    /// Visible field width
    pub const FIELD_WIDTH: f32 = 960.0;
    /// Visible field height
    pub const FIELD_HEIGHT: f32 = 360.0;
    /// Ground baseline; entities stand with their bottom edge here
    pub const GROUND_Y: f32 = FIELD_HEIGHT - 60.0;

    /// Runner defaults
    pub const RUNNER_X: f32 = 120.0;
    pub const RUNNER_WIDTH: f32 = 36.0;
    pub const RUNNER_HEIGHT: f32 = 48.0;

    /// Obstacle defaults
    pub const OBSTACLE_SIZE: f32 = 32.0;
    /// Obstacles enter just past the right edge
    pub const OBSTACLE_SPAWN_X: f32 = FIELD_WIDTH + 40.0;
    /// Obstacles left of this are culled
    pub const CULL_X: f32 = -60.0;
}
