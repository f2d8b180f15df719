//! Quiz coordination state machine
//!
//! `Running -> AwaitingAnswer` on a collision, `AwaitingAnswer -> Running`
//! when an answer arrives. Running out of lives ends the session; the
//! caller performs the reset because it owns the frame loop and score sink.

use std::fmt;

use super::state::{GamePhase, GameState, PendingQuiz, QuizOutcome, QuizRequest};
use crate::tuning::Tuning;

/// What happened after an answer was applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Outcome applied, simulation resumes
    Resumed,
    /// Last life lost; the session must be reset
    LivesExhausted { final_score: f32 },
}

/// Why an answer was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerRejected {
    /// No quiz is open
    NotAwaiting,
    /// The answer belongs to a quiz that is no longer pending
    StaleQuiz { pending: u32, answered: u32 },
}

impl fmt::Display for AnswerRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerRejected::NotAwaiting => write!(f, "no quiz is awaiting an answer"),
            AnswerRejected::StaleQuiz { pending, answered } => {
                write!(f, "answer for quiz {answered} but quiz {pending} is pending")
            }
        }
    }
}

impl std::error::Error for AnswerRejected {}

/// Suspend the simulation for the obstacle at `index`.
///
/// The obstacle is deactivated and removed at once so it can never
/// trigger a second quiz.
pub fn begin_quiz(state: &mut GameState, index: usize) -> QuizRequest {
    let mut obstacle = state.obstacles.remove(index);
    obstacle.deactivate();

    let request = QuizRequest {
        quiz_id: state.next_quiz_id(),
        kind: obstacle.kind,
    };
    log::info!(
        "Hit {} hazard #{} at tick {}, opening quiz {}",
        request.kind.as_str(),
        obstacle.id,
        state.tick,
        request.quiz_id
    );

    state.phase = GamePhase::AwaitingAnswer;
    state.quiz_queue.push_back(request);
    state.pending_quiz = Some(PendingQuiz {
        quiz_id: request.quiz_id,
        kind: request.kind,
        obstacle,
    });
    request
}

/// Take the next question request to show, if any
pub fn next_request(state: &mut GameState) -> Option<QuizRequest> {
    state.quiz_queue.pop_front()
}

/// Apply an answer to the pending quiz and leave `AwaitingAnswer`
pub fn resolve_quiz(
    state: &mut GameState,
    quiz_id: u32,
    outcome: QuizOutcome,
    tuning: &Tuning,
) -> Result<Resolution, AnswerRejected> {
    let pending = match (&state.phase, &state.pending_quiz) {
        (GamePhase::AwaitingAnswer, Some(pending)) => pending.quiz_id,
        _ => return Err(AnswerRejected::NotAwaiting),
    };
    if pending != quiz_id {
        return Err(AnswerRejected::StaleQuiz {
            pending,
            answered: quiz_id,
        });
    }

    state.pending_quiz = None;
    state.quiz_queue.retain(|r| r.quiz_id != quiz_id);
    state.phase = GamePhase::Running;

    let resolution = match outcome {
        QuizOutcome::Correct => {
            state.add_score(tuning.correct_reward);
            Resolution::Resumed
        }
        QuizOutcome::Incorrect => {
            state.lives = state.lives.saturating_sub(1);
            if state.lives == 0 {
                Resolution::LivesExhausted {
                    final_score: state.score,
                }
            } else {
                state.speed = tuning.clamp_speed(state.speed - tuning.speed_penalty);
                state.add_score(-tuning.wrong_penalty);
                Resolution::Resumed
            }
        }
    };

    log::info!(
        "Quiz {} answered {:?}: score {:.0}, speed {}, lives {}",
        quiz_id,
        outcome,
        state.score,
        state.speed,
        state.lives
    );
    Ok(resolution)
}
