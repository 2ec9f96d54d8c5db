//! Quiz generation orchestrator.
//!
//! Runs provider call → JSON extraction → normalization, and substitutes the
//! deterministic fallback quiz on any failure. [`QuizGenerator::generate`]
//! is total: it always returns a valid quiz.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::instrument;

use crate::error::GenerationError;
use crate::extract::extract_json;
use crate::fallback::fallback_quiz;
use crate::model::{GenerateOptions, Quiz, MAX_OPTIONS, MIN_OPTIONS};
use crate::normalize::normalize_quiz;
use crate::traits::{GenerateRequest, LlmProvider, DEFAULT_SYSTEM_PROMPT};

/// Configuration for the generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Model identifier passed to the provider.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Max tokens for generation.
    pub max_tokens: u32,
    /// Upper bound on a single provider call.
    pub timeout: Duration,
    /// Optional system prompt override.
    pub system_prompt_override: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            timeout: Duration::from_secs(30),
            system_prompt_override: None,
        }
    }
}

/// Where a generated quiz came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizSource {
    /// Provider output that passed normalization.
    Provider { name: String },
    /// The deterministic fallback.
    Fallback { reason: FallbackReason },
}

/// Why the fallback quiz was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No provider is configured.
    NotConfigured,
    /// The provider path failed; the message is for operators.
    Failed(String),
}

impl fmt::Display for QuizSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizSource::Provider { name } => write!(f, "provider ({name})"),
            QuizSource::Fallback {
                reason: FallbackReason::NotConfigured,
            } => write!(f, "fallback (no provider configured)"),
            QuizSource::Fallback {
                reason: FallbackReason::Failed(msg),
            } => write!(f, "fallback ({msg})"),
        }
    }
}

/// A quiz plus where it came from.
#[derive(Debug, Clone)]
pub struct Generated {
    pub quiz: Quiz,
    pub source: QuizSource,
}

/// The quiz generation orchestrator.
pub struct QuizGenerator {
    provider: Option<Arc<dyn LlmProvider>>,
    config: GeneratorConfig,
}

impl QuizGenerator {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>, config: GeneratorConfig) -> Self {
        Self { provider, config }
    }

    /// A generator with no provider; always produces the fallback quiz.
    pub fn offline() -> Self {
        Self::new(None, GeneratorConfig::default())
    }

    /// Name of the configured provider, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    /// Generate a quiz. Never fails.
    pub async fn generate(&self, topic: &str, options: &GenerateOptions) -> Quiz {
        self.generate_detailed(topic, options).await.quiz
    }

    /// Generate a quiz and report whether the provider or the fallback
    /// produced it.
    #[instrument(skip(self), fields(provider = self.provider_name().unwrap_or("none")))]
    pub async fn generate_detailed(&self, topic: &str, options: &GenerateOptions) -> Generated {
        let count = options.num_questions as usize;

        let Some(provider) = &self.provider else {
            tracing::debug!(topic, reason = "not configured", "using fallback quiz");
            return Generated {
                quiz: fallback_quiz(topic, count, options.difficulty),
                source: QuizSource::Fallback {
                    reason: FallbackReason::NotConfigured,
                },
            };
        };

        match self.try_generate(provider.as_ref(), topic, options).await {
            Ok(quiz) => Generated {
                quiz,
                source: QuizSource::Provider {
                    name: provider.name().to_string(),
                },
            },
            Err(e) => {
                tracing::warn!(topic, reason = %e, "quiz generation failed, using fallback quiz");
                Generated {
                    quiz: fallback_quiz(topic, count, options.difficulty),
                    source: QuizSource::Fallback {
                        reason: FallbackReason::Failed(e.to_string()),
                    },
                }
            }
        }
    }

    async fn try_generate(
        &self,
        provider: &dyn LlmProvider,
        topic: &str,
        options: &GenerateOptions,
    ) -> Result<Quiz, GenerationError> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: build_prompt(topic, options),
            system_prompt: Some(
                self.config
                    .system_prompt_override
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            ),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let start = Instant::now();
        let response = tokio::time::timeout(self.config.timeout, provider.generate(&request))
            .await
            .map_err(|_| GenerationError::Timeout {
                provider: provider.name().to_string(),
                secs: self.config.timeout.as_secs(),
            })?
            .map_err(|error| GenerationError::Provider {
                provider: provider.name().to_string(),
                error,
            })?;

        tracing::debug!(
            model = %response.model,
            latency_ms = start.elapsed().as_millis() as u64,
            total_tokens = response.token_usage.total_tokens,
            "provider responded"
        );

        let candidate = extract_json(&response.content)?;
        let quiz = normalize_quiz(
            &candidate,
            topic,
            options.num_questions as usize,
            options.difficulty,
        )?;
        Ok(quiz)
    }
}

/// Build the strict instruction prompt for a topic.
pub fn build_prompt(topic: &str, options: &GenerateOptions) -> String {
    let n = options.num_questions;
    let difficulty = options.difficulty;
    format!(
        "Create a {difficulty} quiz about the topic \"{topic}\".\n\
         Respond with VALID JSON ONLY, no prose and no code fences, in exactly this shape:\n\
         {{\n  \"title\": string,\n  \"questions\": [\n    {{ \"question\": string, \"options\": [string], \"answer\": string }}\n  ]\n}}\n\
         Rules:\n\
         - Produce exactly {n} questions.\n\
         - Each question has between {MIN_OPTIONS} and {MAX_OPTIONS} distinct options.\n\
         - The \"answer\" must match exactly one of that question's options, character for character.\n\
         - Do not number questions or options, and do not prefix them with difficulty labels.\n\
         - Every question must match the {difficulty} difficulty level."
    )
}
