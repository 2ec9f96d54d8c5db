//! Request bodies.
//!
//! Fields are kept as raw JSON values so that wrong types are reported
//! through the same validation messages as missing or out-of-range values.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use quizforge_core::error::ValidationError;
use quizforge_core::model::{MAX_QUESTIONS, MIN_QUESTIONS};
use quizforge_core::validate::{validate_request, ValidRequest};

use crate::error::ApiError;

/// `POST /api/quizzes`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    #[serde(default)]
    pub topic: Option<Value>,
    #[serde(default)]
    pub num_questions: Option<Value>,
    #[serde(default)]
    pub difficulty: Option<Value>,
}

impl CreateQuizRequest {
    pub fn validate(&self) -> Result<ValidRequest, ValidationError> {
        let num_questions = match &self.num_questions {
            None => None,
            Some(v) => Some(v.as_i64().ok_or(ValidationError::QuestionCountOutOfRange {
                min: MIN_QUESTIONS,
                max: MAX_QUESTIONS,
            })?),
        };
        let difficulty = match &self.difficulty {
            None => None,
            Some(v) => Some(v.as_str().ok_or(ValidationError::InvalidDifficulty)?),
        };
        validate_request(
            self.topic.as_ref().and_then(Value::as_str),
            num_questions,
            difficulty,
        )
    }
}

/// `POST /api/attempts`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptRequest {
    #[serde(default)]
    pub quiz_id: Option<Value>,
    #[serde(default)]
    pub user_answers: Option<Value>,
}

/// A validated attempt submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAttempt {
    pub quiz_id: Uuid,
    /// Non-string entries become `None`; they can never match an answer.
    pub user_answers: Vec<Option<String>>,
}

impl SubmitAttemptRequest {
    pub fn validate(&self) -> Result<ValidAttempt, ApiError> {
        let quiz_id = match self.quiz_id.as_ref().and_then(Value::as_str) {
            None => return Err(ApiError::BadRequest("Missing 'quizId' in request body".into())),
            Some(raw) => Uuid::parse_str(raw.trim())
                .map_err(|_| ApiError::BadRequest("'quizId' is not a valid id".into()))?,
        };

        let Some(Value::Array(answers)) = &self.user_answers else {
            return Err(ApiError::BadRequest("'userAnswers' must be an array".into()));
        };

        let user_answers = answers
            .iter()
            .map(|a| a.as_str().map(str::to_string))
            .collect();

        Ok(ValidAttempt {
            quiz_id,
            user_answers,
        })
    }
}
