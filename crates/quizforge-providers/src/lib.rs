//! quizforge-providers: Generative-text provider integrations.
//!
//! Implements the `LlmProvider` trait for Google Gemini and OpenAI-compatible
//! chat completion endpoints, plus a mock for tests, and loads the
//! `quizforge.toml` configuration that selects between them.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod openai;

pub use config::{
    build_generator, create_provider, load_config, ProviderConfig, QuizforgeConfig,
};
pub use error::ProviderError;
