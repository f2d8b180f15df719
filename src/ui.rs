//! UI-side state: HUD text and the quiz answer panel
//!
//! The answer panel enforces the single-fire contract on the UI side: once
//! an option is chosen the options lock, and the continue action reports
//! the outcome exactly once.

use serde::Serialize;

use crate::questions::Question;
use crate::sim::{GameState, QuizOutcome};

/// Shows score, speed and lives
pub trait Hud {
    fn update(&mut self, hud: &HudSnapshot);
}

/// Presents a question; the answer comes back through `Game::answer`
pub trait AnswerUi {
    fn show_question(&mut self, quiz_id: u32, question: &Question);
}

/// Read-only HUD values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: f32,
    pub speed: f32,
    pub lives: u8,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            speed: state.speed,
            lives: state.lives,
        }
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score.floor() as u64)
    }

    pub fn speed_text(&self) -> String {
        format!("Speed: {:.0}", self.speed)
    }

    pub fn lives_text(&self) -> String {
        format!("Lives: {}", self.lives)
    }
}

/// Feedback shown after an option is chosen
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceFeedback {
    pub chosen: usize,
    pub correct: bool,
    /// Option to highlight as the right answer
    pub correct_index: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
enum PanelState {
    #[default]
    Hidden,
    Choosing {
        quiz_id: u32,
        question: Question,
    },
    Chosen {
        quiz_id: u32,
        question: Question,
        feedback: ChoiceFeedback,
    },
}

/// Quiz modal state machine: Hidden -> Choosing -> Chosen -> Hidden
#[derive(Debug, Clone, Default)]
pub struct AnswerPanel {
    state: PanelState,
}

impl AnswerPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a question, replacing whatever was open
    pub fn open(&mut self, quiz_id: u32, question: Question) {
        self.state = PanelState::Choosing { quiz_id, question };
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, PanelState::Hidden)
    }

    /// True once an option has been chosen (options are locked)
    pub fn is_locked(&self) -> bool {
        matches!(self.state, PanelState::Chosen { .. })
    }

    pub fn question(&self) -> Option<&Question> {
        match &self.state {
            PanelState::Hidden => None,
            PanelState::Choosing { question, .. } | PanelState::Chosen { question, .. } => {
                Some(question)
            }
        }
    }

    /// Choose an option. Ignored when hidden, locked, or out of range.
    pub fn choose(&mut self, index: usize) -> Option<ChoiceFeedback> {
        let PanelState::Choosing { quiz_id, question } = &self.state else {
            return None;
        };
        let option = question.options.get(index)?;

        let message = if option.correct {
            "Correct! Nice decision.".to_string()
        } else {
            format!("Not quite. {}", option.explanation).trim_end().to_string()
        };
        let feedback = ChoiceFeedback {
            chosen: index,
            correct: option.correct,
            correct_index: question.correct_index(),
            message,
        };
        self.state = PanelState::Chosen {
            quiz_id: *quiz_id,
            question: question.clone(),
            feedback: feedback.clone(),
        };
        Some(feedback)
    }

    /// Close the panel and report the outcome. Fires once per question.
    pub fn confirm(&mut self) -> Option<(u32, QuizOutcome)> {
        match std::mem::take(&mut self.state) {
            PanelState::Chosen {
                quiz_id, feedback, ..
            } => Some((quiz_id, QuizOutcome::from(feedback.correct))),
            other => {
                self.state = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QuestionBank;

    fn fire_question() -> Question {
        QuestionBank::default().questions()[1].clone()
    }

    #[test]
    fn test_hud_text() {
        let hud = HudSnapshot {
            score: 41.97,
            speed: 7.0,
            lives: 2,
        };
        assert_eq!(hud.score_text(), "Score: 41");
        assert_eq!(hud.speed_text(), "Speed: 7");
        assert_eq!(hud.lives_text(), "Lives: 2");
    }

    #[test]
    fn test_choice_locks_panel() {
        let mut panel = AnswerPanel::new();
        panel.open(4, fire_question());
        assert!(panel.is_open());
        assert!(!panel.is_locked());

        let feedback = panel.choose(0).unwrap();
        assert!(!feedback.correct);
        assert_eq!(feedback.correct_index, Some(1));
        assert_eq!(feedback.message, "Not quite. Water can spread grease fires.");
        assert!(panel.is_locked());

        // Locked: a second choice is ignored
        assert_eq!(panel.choose(1), None);
        assert_eq!(panel.confirm(), Some((4, QuizOutcome::Incorrect)));
    }

    #[test]
    fn test_confirm_fires_once() {
        let mut panel = AnswerPanel::new();
        panel.open(9, fire_question());
        assert_eq!(panel.confirm(), None, "nothing chosen yet");

        let feedback = panel.choose(1).unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.message, "Correct! Nice decision.");

        assert_eq!(panel.confirm(), Some((9, QuizOutcome::Correct)));
        assert_eq!(panel.confirm(), None);
        assert!(!panel.is_open());
    }

    #[test]
    fn test_out_of_range_choice_keeps_panel_open() {
        let mut panel = AnswerPanel::new();
        panel.open(1, fire_question());
        assert_eq!(panel.choose(17), None);
        assert!(panel.is_open());
        assert!(!panel.is_locked());
        assert!(panel.choose(2).is_some());
    }

    #[test]
    fn test_hidden_panel_ignores_input() {
        let mut panel = AnswerPanel::new();
        assert_eq!(panel.choose(0), None);
        assert_eq!(panel.confirm(), None);
        assert!(panel.question().is_none());
    }
}
