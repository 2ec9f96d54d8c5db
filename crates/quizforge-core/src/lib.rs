//! quizforge-core: Quiz model, generation pipeline, and scoring.
//!
//! This crate defines the quiz data model, the normalization pipeline that
//! turns untrusted provider text into a valid quiz, the deterministic
//! fallback generator, and attempt scoring.

pub mod error;
pub mod extract;
pub mod fallback;
pub mod generator;
pub mod model;
pub mod normalize;
pub mod sanitize;
pub mod scoring;
pub mod traits;
pub mod validate;

pub use generator::{GeneratorConfig, QuizGenerator, QuizSource};
pub use model::{Difficulty, GenerateOptions, Question, Quiz};
