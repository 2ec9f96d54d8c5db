//! Persisted records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quizforge_core::Quiz;

/// A stored quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub quiz: Quiz,
}

impl QuizRecord {
    /// Wrap a freshly generated quiz with a new id and the current time.
    pub fn new(quiz: Quiz) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz,
        }
    }
}

/// A scored attempt at a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub id: Uuid,
    pub quiz_id: Uuid,
    /// Answers in question order; `None` for unanswered questions.
    pub user_answers: Vec<Option<String>>,
    pub score: u32,
    pub created_at: DateTime<Utc>,
}

impl Attempt {
    pub fn new(quiz_id: Uuid, user_answers: Vec<Option<String>>, score: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            quiz_id,
            user_answers,
            score,
            created_at: Utc::now(),
        }
    }
}

/// An attempt with its quiz resolved.
///
/// `quiz` is `None` when the referenced quiz no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptView {
    #[serde(flatten)]
    pub attempt: Attempt,
    pub quiz: Option<QuizRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::{Difficulty, Question};

    fn quiz() -> Quiz {
        Quiz {
            title: "Oceans".into(),
            num_questions: 1,
            difficulty: Difficulty::Hard,
            questions: vec![Question {
                question: "Largest ocean?".into(),
                options: vec!["Pacific".into(), "Atlantic".into(), "Indian".into()],
                answer: "Pacific".into(),
            }],
        }
    }

    #[test]
    fn quiz_record_serializes_flat_camel_case() {
        let record = QuizRecord::new(quiz());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["title"], "Oceans");
        assert_eq!(value["numQuestions"], 1);
        assert_eq!(value["difficulty"], "hard");
        assert!(value["createdAt"].is_string());
        assert_eq!(value["id"], record.id.to_string());

        let back: QuizRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn attempt_view_embeds_quiz() {
        let record = QuizRecord::new(quiz());
        let attempt = Attempt::new(record.id, vec![Some("Pacific".into()), None], 1);
        let view = AttemptView {
            attempt,
            quiz: Some(record.clone()),
        };
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["quizId"], record.id.to_string());
        assert_eq!(value["userAnswers"], serde_json::json!(["Pacific", null]));
        assert_eq!(value["score"], 1);
        assert_eq!(value["quiz"]["title"], "Oceans");
    }
}
