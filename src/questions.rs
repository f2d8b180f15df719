//! Safety quiz question bank
//!
//! Questions are keyed by hazard kind name. A bank can be loaded from JSON;
//! entries naming an unknown kind are kept and only served through the
//! full-bank fallback.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::HazardKind;

/// One answer choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    pub correct: bool,
    #[serde(default)]
    pub explanation: String,
}

/// A multiple-choice question about one hazard kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Hazard kind name (e.g. "fire")
    pub kind: String,
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

impl Question {
    pub fn hazard_kind(&self) -> Option<HazardKind> {
        HazardKind::from_name(&self.kind)
    }

    /// Whether the option at `index` is correct (None if out of range)
    pub fn is_correct(&self, index: usize) -> Option<bool> {
        self.options.get(index).map(|o| o.correct)
    }

    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.correct)
    }
}

/// Why a question bank was rejected
#[derive(Debug)]
pub enum QuestionBankError {
    /// Not valid JSON / wrong shape
    Parse(serde_json::Error),
    /// A bank needs at least one question
    Empty,
    /// Question at this index has no options
    NoOptions(usize),
}

impl fmt::Display for QuestionBankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionBankError::Parse(e) => write!(f, "invalid question bank: {e}"),
            QuestionBankError::Empty => write!(f, "question bank is empty"),
            QuestionBankError::NoOptions(i) => write!(f, "question {i} has no options"),
        }
    }
}

impl std::error::Error for QuestionBankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuestionBankError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for QuestionBankError {
    fn from(e: serde_json::Error) -> Self {
        QuestionBankError::Parse(e)
    }
}

/// A non-empty set of questions
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            questions: builtin_questions(),
        }
    }
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }
        if let Some(i) = questions.iter().position(|q| q.options.is_empty()) {
            return Err(QuestionBankError::NoOptions(i));
        }
        Ok(Self { questions })
    }

    /// Load a bank from a JSON array of questions
    pub fn from_json(json: &str) -> Result<Self, QuestionBankError> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Pick a question for `kind`: a random exact match if there is one,
    /// otherwise a random question from the whole bank
    pub fn pick<R: Rng>(&self, kind: HazardKind, rng: &mut R) -> &Question {
        let matching: Vec<&Question> = self
            .questions
            .iter()
            .filter(|q| q.hazard_kind() == Some(kind))
            .collect();

        if matching.is_empty() {
            log::debug!("No {} questions, falling back to full bank", kind.as_str());
            &self.questions[rng.random_range(0..self.questions.len())]
        } else {
            matching[rng.random_range(0..matching.len())]
        }
    }
}

fn question(kind: &str, prompt: &str, options: [(&str, bool, &str); 3]) -> Question {
    Question {
        kind: kind.to_string(),
        prompt: prompt.to_string(),
        options: options
            .into_iter()
            .map(|(text, correct, explanation)| QuizOption {
                text: text.to_string(),
                correct,
                explanation: explanation.to_string(),
            })
            .collect(),
    }
}

/// The built-in bank: one question per hazard kind
fn builtin_questions() -> Vec<Question> {
    vec![
        question(
            "road",
            "You approach a flooded street while driving. What's the safest choice?",
            [
                (
                    "Drive through slowly to avoid waves",
                    false,
                    "Even shallow water can stall or sweep a car.",
                ),
                (
                    "Turn around and find an alternate route",
                    true,
                    "Turn Around, Don't Drown.",
                ),
                (
                    "Follow the car ahead closely",
                    false,
                    "Their weight doesn't make it safe for you.",
                ),
            ],
        ),
        question(
            "fire",
            "There's smoke from a pan on the stove. Best first step?",
            [
                ("Throw water on the pan", false, "Water can spread grease fires."),
                (
                    "Cover with a lid and turn off heat",
                    true,
                    "Smothers oxygen; cutting heat stops the source.",
                ),
                (
                    "Carry the pan outside",
                    false,
                    "Moving it risks burns and spreading fire.",
                ),
            ],
        ),
        question(
            "hail",
            "Hailstorm ahead while driving. What do you do?",
            [
                (
                    "Stop under an overpass and block traffic",
                    false,
                    "Unsafe to stop in traffic lanes.",
                ),
                (
                    "Pull over safely, angle car so hail hits windshield",
                    true,
                    "Windshields are reinforced; side glass is weaker.",
                ),
                (
                    "Speed up to get out quickly",
                    false,
                    "Speeding reduces traction and visibility.",
                ),
            ],
        ),
        question(
            "quake",
            "During an earthquake at home, safest immediate action?",
            [
                (
                    "Run outside down the stairs",
                    false,
                    "Falling objects and stairs can be dangerous.",
                ),
                (
                    "Drop, cover, and hold on under sturdy furniture",
                    true,
                    "Protects from falling debris.",
                ),
                (
                    "Stand in a doorway",
                    false,
                    "Doorways are not the safest spot in modern homes.",
                ),
            ],
        ),
        question(
            "flood",
            "Flash flood warning while you're walking near a wash?",
            [
                (
                    "Get closer to see the water level",
                    false,
                    "Fast water can rise suddenly and sweep you.",
                ),
                (
                    "Move to higher ground immediately",
                    true,
                    "Gain elevation quickly and avoid channels.",
                ),
                (
                    "Call a friend to pick you up under the bridge",
                    false,
                    "Underpasses can collect water fast.",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_builtin_bank_covers_every_kind() {
        let bank = QuestionBank::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for kind in HazardKind::ALL {
            let q = bank.pick(kind, &mut rng);
            assert_eq!(q.hazard_kind(), Some(kind));
            assert_eq!(q.options.iter().filter(|o| o.correct).count(), 1);
        }
    }

    #[test]
    fn test_falls_back_to_full_bank() {
        let json = r#"[
            { "kind": "fire", "prompt": "F?", "options": [{ "text": "a", "correct": true }] },
            { "kind": "tornado", "prompt": "T?", "options": [{ "text": "b", "correct": false }] }
        ]"#;
        let bank = QuestionBank::from_json(json).unwrap();
        let mut rng = Pcg32::seed_from_u64(9);

        // Exact match always wins
        for _ in 0..20 {
            assert_eq!(bank.pick(HazardKind::Fire, &mut rng).prompt, "F?");
        }

        // No hail questions: any question may come back, including unknown kinds
        let prompts: std::collections::HashSet<_> = (0..100)
            .map(|_| bank.pick(HazardKind::Hail, &mut rng).prompt.clone())
            .collect();
        assert_eq!(prompts.len(), 2);
    }

    #[test]
    fn test_rejects_empty_or_malformed_banks() {
        assert!(matches!(
            QuestionBank::from_json("[]"),
            Err(QuestionBankError::Empty)
        ));
        assert!(matches!(
            QuestionBank::from_json(r#"{"kind": "fire"}"#),
            Err(QuestionBankError::Parse(_))
        ));
        assert!(matches!(
            QuestionBank::from_json(r#"[{ "kind": "fire", "prompt": "?", "options": [] }]"#),
            Err(QuestionBankError::NoOptions(0))
        ));
    }

    #[test]
    fn test_option_lookup() {
        let bank = QuestionBank::default();
        let q = &bank.questions()[1];
        assert_eq!(q.correct_index(), Some(1));
        assert_eq!(q.is_correct(0), Some(false));
        assert_eq!(q.is_correct(1), Some(true));
        assert_eq!(q.is_correct(7), None);
    }
}
