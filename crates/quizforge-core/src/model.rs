//! Core data model types for quizforge.
//!
//! These are the quiz, question and attempt types that every other crate
//! in the workspace builds on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest number of questions a quiz may be generated with.
pub const MIN_QUESTIONS: u32 = 1;
/// Largest number of questions a quiz may be generated with.
pub const MAX_QUESTIONS: u32 = 50;
/// Question count used when the caller does not ask for one.
pub const DEFAULT_QUESTIONS: u32 = 3;

/// Minimum number of options on a normalized question.
pub const MIN_OPTIONS: usize = 3;
/// Maximum number of options on a normalized question.
pub const MAX_OPTIONS: usize = 4;

/// A generated quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Display title.
    pub title: String,
    /// Number of questions; always equal to `questions.len()`.
    pub num_questions: u32,
    /// Difficulty the quiz was generated for.
    pub difficulty: Difficulty,
    /// The questions, in presentation order.
    pub questions: Vec<Question>,
}

impl Quiz {
    /// The answer key, one entry per question.
    pub fn answer_key(&self) -> Vec<&str> {
        self.questions.iter().map(|q| q.answer.as_str()).collect()
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text, without numbering.
    pub question: String,
    /// Between 3 and 4 unique, non-empty options.
    pub options: Vec<String>,
    /// The correct option. Always one of `options`.
    pub answer: String,
}

/// Quiz difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Options controlling quiz generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOptions {
    /// Exact number of questions to produce.
    #[serde(default = "default_num_questions")]
    pub num_questions: u32,
    /// Requested difficulty.
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            num_questions: DEFAULT_QUESTIONS,
            difficulty: Difficulty::default(),
        }
    }
}

fn default_num_questions() -> u32 {
    DEFAULT_QUESTIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" MEDIUM ".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("extreme".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn quiz_serializes_camel_case() {
        let quiz = Quiz {
            title: "Quiz: Rust".into(),
            num_questions: 1,
            difficulty: Difficulty::Easy,
            questions: vec![Question {
                question: "What is a borrow?".into(),
                options: vec!["A".into(), "B".into(), "C".into()],
                answer: "A".into(),
            }],
        };
        let json = serde_json::to_value(&quiz).unwrap();
        assert_eq!(json["numQuestions"], 1);
        assert_eq!(json["difficulty"], "easy");
        assert_eq!(json["questions"][0]["answer"], "A");
        assert_eq!(quiz.answer_key(), vec!["A"]);
    }

    #[test]
    fn generate_options_defaults() {
        let opts: GenerateOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.num_questions, 3);
        assert_eq!(opts.difficulty, Difficulty::Medium);
    }
}
