//! Mock provider for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use quizforge_core::traits::{
    GenerateRequest, GenerateResponse, LlmProvider, ModelInfo, TokenUsage,
};

/// A mock provider for exercising the generator and the HTTP layer without
/// real API calls.
///
/// Returns configurable responses based on prompt content matching, or fails
/// every call when built with [`MockProvider::failing`].
pub struct MockProvider {
    /// Map of prompt substring → response text.
    responses: HashMap<String, String>,
    default_response: String,
    failure: Option<String>,
    call_count: AtomicU32,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockProvider {
    /// Create a mock with the given prompt→response mappings.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: "{}".to_string(),
            failure: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            default_response: response.to_string(),
            ..Self::new(HashMap::new())
        }
    }

    /// Create a mock whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(HashMap::new())
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request.clone());

        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }

        let content = self
            .responses
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_response.clone());

        // Rough estimate
        let prompt_tokens = (request.prompt.len() / 4) as u32;
        let completion_tokens = (content.len() / 4) as u32;

        Ok(GenerateResponse {
            content,
            model: request.model.clone(),
            token_usage: TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
            latency_ms: 1,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "mock-model".into(),
            name: "Mock Model".into(),
            provider: "mock".into(),
            max_context: 100_000,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quizforge_core::generator::{FallbackReason, GeneratorConfig, QuizSource};
    use quizforge_core::model::{Difficulty, GenerateOptions};
    use quizforge_core::QuizGenerator;

    fn request(prompt: &str) -> GenerateRequest {
        GenerateRequest {
            model: "mock".into(),
            prompt: prompt.into(),
            system_prompt: None,
            max_tokens: 100,
            temperature: 0.0,
        }
    }

    #[tokio::test]
    async fn fixed_response() {
        let provider = MockProvider::with_fixed_response("{\"title\": \"x\"}");
        let response = provider.generate(&request("anything")).await.unwrap();
        assert_eq!(response.content, "{\"title\": \"x\"}");
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.last_request().unwrap().prompt, "anything");
    }

    #[tokio::test]
    async fn prompt_matching() {
        let mut responses = HashMap::new();
        responses.insert("Oceans".to_string(), "{\"title\": \"Oceans\"}".to_string());
        responses.insert("Volcanoes".to_string(), "{\"title\": \"Volcanoes\"}".to_string());
        let provider = MockProvider::new(responses);

        let resp = provider.generate(&request("a quiz about Oceans")).await.unwrap();
        assert!(resp.content.contains("Oceans"));

        let resp = provider
            .generate(&request("a quiz about Volcanoes"))
            .await
            .unwrap();
        assert!(resp.content.contains("Volcanoes"));

        let resp = provider.generate(&request("a quiz about Deserts")).await.unwrap();
        assert_eq!(resp.content, "{}");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn failing_mock_errors() {
        let provider = MockProvider::failing("quota exhausted");
        let err = provider.generate(&request("x")).await.unwrap_err();
        assert_eq!(err.to_string(), "quota exhausted");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn generator_sends_strict_prompt() {
        let provider = Arc::new(MockProvider::with_fixed_response(
            r#"{"questions": [{"question": "Q?", "options": ["a", "b", "c"], "answer": "b"}]}"#,
        ));
        let generator = QuizGenerator::new(Some(provider.clone()), GeneratorConfig::default());

        let generated = generator
            .generate_detailed(
                "Rivers",
                &GenerateOptions {
                    num_questions: 1,
                    difficulty: Difficulty::Easy,
                },
            )
            .await;

        assert_eq!(
            generated.source,
            QuizSource::Provider {
                name: "mock".into()
            }
        );
        assert_eq!(generated.quiz.title, "Quiz: Rivers");
        let sent = provider.last_request().unwrap();
        assert!(sent.prompt.contains("exactly 1 questions"));
        assert!(sent.system_prompt.is_some());
        assert_eq!(sent.model, "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn generator_falls_back_when_mock_fails() {
        let generator = QuizGenerator::new(
            Some(Arc::new(MockProvider::failing("boom"))),
            GeneratorConfig::default(),
        );
        let generated = generator
            .generate_detailed("Rivers", &GenerateOptions::default())
            .await;
        assert_eq!(
            generated.source,
            QuizSource::Fallback {
                reason: FallbackReason::Failed("provider 'mock' failed: boom".into())
            }
        );
    }
}
