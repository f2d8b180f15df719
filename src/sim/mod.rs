//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod quiz;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, collide, first_hit};
pub use quiz::{AnswerRejected, Resolution, begin_quiz, next_request, resolve_quiz};
pub use spawn::{KIND_LADDER, LadderRung, allowed_kinds, pick_kind};
pub use state::{
    GamePhase, GameState, HazardKind, Obstacle, PendingQuiz, QuizOutcome, QuizRequest, Runner,
};
pub use tick::{TickReport, tick};
