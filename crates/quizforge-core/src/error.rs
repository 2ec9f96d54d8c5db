//! Error types for the generation pipeline.
//!
//! Each stage of the pipeline reports a typed failure. None of these escape
//! [`QuizGenerator::generate`](crate::generator::QuizGenerator::generate);
//! they are logged and replaced by the fallback quiz.

use thiserror::Error;

/// The provider text did not contain a parseable JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// The text was empty after stripping code fences.
    #[error("response was empty")]
    Empty,

    /// No `{ ... }` span parsed as a JSON object.
    #[error("no JSON object found in response")]
    NoJsonObject,
}

/// A parsed object could not be turned into a valid quiz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The object had no `questions` array.
    #[error("candidate has no `questions` array")]
    MissingQuestions,

    /// Fewer usable questions than requested.
    #[error("expected {expected} questions, got {actual}")]
    QuestionCount { expected: usize, actual: usize },
}

/// Caller input rejected before generation is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing or invalid 'topic' in request body")]
    MissingTopic,

    #[error("'numQuestions' must be an integer between {min} and {max}")]
    QuestionCountOutOfRange { min: u32, max: u32 },

    #[error("'difficulty' must be one of easy, medium, hard")]
    InvalidDifficulty,
}

/// Why a provider-backed generation did not produce a quiz.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The provider call failed (network, HTTP status, response shape).
    #[error("provider '{provider}' failed: {error:#}")]
    Provider {
        provider: String,
        error: anyhow::Error,
    },

    /// The provider call did not finish in time.
    #[error("provider '{provider}' timed out after {secs}s")]
    Timeout { provider: String, secs: u64 },

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}
