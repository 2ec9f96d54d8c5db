//! Request-boundary validation for quiz generation.
//!
//! Shared by the HTTP API and the CLI so both reject the same inputs before
//! any generation is attempted.

use crate::error::ValidationError;
use crate::model::{Difficulty, GenerateOptions, MAX_QUESTIONS, MIN_QUESTIONS};

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRequest {
    /// Trimmed, non-empty topic.
    pub topic: String,
    pub options: GenerateOptions,
}

/// Validate raw caller input.
///
/// `num_questions` and `difficulty` fall back to their defaults when absent.
pub fn validate_request(
    topic: Option<&str>,
    num_questions: Option<i64>,
    difficulty: Option<&str>,
) -> Result<ValidRequest, ValidationError> {
    let topic = topic
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ValidationError::MissingTopic)?;

    let defaults = GenerateOptions::default();

    let num_questions = match num_questions {
        None => defaults.num_questions,
        Some(n) if (MIN_QUESTIONS as i64..=MAX_QUESTIONS as i64).contains(&n) => n as u32,
        Some(_) => {
            return Err(ValidationError::QuestionCountOutOfRange {
                min: MIN_QUESTIONS,
                max: MAX_QUESTIONS,
            })
        }
    };

    let difficulty = match difficulty {
        None => defaults.difficulty,
        Some(d) => d
            .parse::<Difficulty>()
            .map_err(|_| ValidationError::InvalidDifficulty)?,
    };

    Ok(ValidRequest {
        topic: topic.to_string(),
        options: GenerateOptions {
            num_questions,
            difficulty,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let req = validate_request(Some("  Oceans "), None, None).unwrap();
        assert_eq!(req.topic, "Oceans");
        assert_eq!(req.options.num_questions, 3);
        assert_eq!(req.options.difficulty, Difficulty::Medium);
    }

    #[test]
    fn explicit_values() {
        let req = validate_request(Some("Oceans"), Some(4), Some("hard")).unwrap();
        assert_eq!(req.options.num_questions, 4);
        assert_eq!(req.options.difficulty, Difficulty::Hard);
    }

    #[test]
    fn missing_topic() {
        assert_eq!(
            validate_request(None, None, None),
            Err(ValidationError::MissingTopic)
        );
        assert_eq!(
            validate_request(Some("   "), None, None),
            Err(ValidationError::MissingTopic)
        );
    }

    #[test]
    fn count_bounds() {
        assert!(validate_request(Some("t"), Some(1), None).is_ok());
        assert!(validate_request(Some("t"), Some(50), None).is_ok());
        for bad in [0, 51, -3, i64::MAX] {
            assert!(matches!(
                validate_request(Some("t"), Some(bad), None),
                Err(ValidationError::QuestionCountOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn bad_difficulty() {
        assert_eq!(
            validate_request(Some("t"), None, Some("impossible")),
            Err(ValidationError::InvalidDifficulty)
        );
    }
}
