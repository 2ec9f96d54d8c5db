//! Configuration loading and provider factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizforge_core::generator::GeneratorConfig;
use quizforge_core::traits::LlmProvider;
use quizforge_core::QuizGenerator;

use crate::gemini::GeminiProvider;
use crate::openai::OpenAiProvider;

/// Configuration for a single provider.
///
/// Debug output masks API keys.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
}

impl ProviderConfig {
    pub fn api_key(&self) -> &str {
        match self {
            ProviderConfig::Gemini { api_key, .. } | ProviderConfig::OpenAI { api_key, .. } => {
                api_key
            }
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Gemini {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
        }
    }
}

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Provider used for generation. `None` means fallback quizzes only.
    #[serde(default)]
    pub default_provider: Option<String>,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Upper bound on a single provider call, in seconds.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// JSON snapshot file for persistence. `None` keeps data in memory.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_max_tokens() -> u32 {
    2048
}
fn default_timeout() -> u64 {
    30
}
fn default_bind_addr() -> String {
    "127.0.0.1:4000".to_string()
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: None,
            default_model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_timeout(),
            bind_addr: default_bind_addr(),
            data_file: None,
        }
    }
}

impl QuizforgeConfig {
    /// The default provider's name and config, if one is selected, present
    /// and has a non-empty API key.
    pub fn active_provider(&self) -> Option<(&str, &ProviderConfig)> {
        let name = self.default_provider.as_deref()?;
        self.providers
            .get(name)
            .filter(|p| !p.api_key().trim().is_empty())
            .map(|p| (name, p))
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            model: self.default_model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.request_timeout_secs),
            system_prompt_override: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied through as-is and never rescanned.
fn resolve_env_vars(s: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&lookup(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_provider_config(
    config: &ProviderConfig,
    lookup: &impl Fn(&str) -> Option<String>,
) -> ProviderConfig {
    match config {
        ProviderConfig::Gemini { api_key, base_url } => ProviderConfig::Gemini {
            api_key: resolve_env_vars(api_key, lookup),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u, lookup)),
        },
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key, lookup),
            base_url: base_url.as_ref().map(|u| resolve_env_vars(u, lookup)),
            org_id: org_id.as_ref().map(|o| resolve_env_vars(o, lookup)),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment overrides: `GEMINI_API_KEY` (or `LLM_API_KEY`),
/// `GEMINI_API_URL`, `QUIZFORGE_BIND`, `PORT`, `QUIZFORGE_DATA_FILE`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("quizforge.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizforgeConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

/// Parse a `quizforge.toml` document without applying environment overrides.
pub fn parse_config(content: &str) -> Result<QuizforgeConfig> {
    Ok(toml::from_str(content)?)
}

/// Resolve `${VAR}` references in every provider config, then apply
/// environment overrides. Override values are used verbatim.
pub fn apply_env_overrides(config: &mut QuizforgeConfig, lookup: impl Fn(&str) -> Option<String>) {
    config.providers = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v, &lookup)))
        .collect();

    let gemini_key = lookup("GEMINI_API_KEY")
        .or_else(|| lookup("LLM_API_KEY"))
        .filter(|k| !k.trim().is_empty());
    let gemini_url = lookup("GEMINI_API_URL").filter(|u| !u.trim().is_empty());

    if gemini_key.is_some() || gemini_url.is_some() {
        let entry = config
            .providers
            .entry("gemini".into())
            .or_insert(ProviderConfig::Gemini {
                api_key: String::new(),
                base_url: None,
            });
        if let ProviderConfig::Gemini { api_key, base_url } = entry {
            if let Some(key) = gemini_key {
                *api_key = key;
            }
            if let Some(url) = gemini_url {
                *base_url = Some(url);
            }
        }
        if config.default_provider.is_none() {
            config.default_provider = Some("gemini".into());
        }
    }

    if let Some(bind) = lookup("QUIZFORGE_BIND") {
        config.bind_addr = bind;
    } else if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
        let host = config
            .bind_addr
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        config.bind_addr = format!("{host}:{port}");
    }

    if let Some(file) = lookup("QUIZFORGE_DATA_FILE").filter(|f| !f.trim().is_empty()) {
        config.data_file = Some(PathBuf::from(file));
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}

/// Create a provider instance from its configuration.
pub fn create_provider(config: &ProviderConfig, timeout_secs: u64) -> Box<dyn LlmProvider> {
    match config {
        ProviderConfig::Gemini { api_key, base_url } => Box::new(GeminiProvider::with_timeout(
            api_key,
            base_url.clone(),
            timeout_secs,
        )),
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Box::new(OpenAiProvider::with_timeout(
            api_key,
            base_url.clone(),
            org_id.clone(),
            timeout_secs,
        )),
    }
}

/// Build the quiz generator described by `config`.
///
/// Fails when `default_provider` names a provider that is not configured.
/// A configured provider with an empty API key yields an offline generator.
pub fn build_generator(config: &QuizforgeConfig) -> Result<QuizGenerator> {
    if let Some(name) = &config.default_provider {
        if !config.providers.contains_key(name) {
            anyhow::bail!("default provider '{name}' is not configured");
        }
    }

    let provider: Option<Arc<dyn LlmProvider>> = match config.active_provider() {
        Some((name, provider_config)) => {
            tracing::info!(provider = name, model = %config.default_model, "using provider");
            Some(Arc::from(create_provider(
                provider_config,
                config.request_timeout_secs,
            )))
        }
        None => {
            tracing::info!("no provider API key configured, quizzes will use the fallback");
            None
        }
    };

    Ok(QuizGenerator::new(provider, config.generator_config()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn resolve_env_vars_basic() {
        let lookup = env(&[("_QF_TEST_VAR", "hello")]);
        assert_eq!(resolve_env_vars("${_QF_TEST_VAR}", &lookup), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QF_TEST_VAR}_suffix", &lookup),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${_QF_MISSING}", &lookup), "");
        assert_eq!(resolve_env_vars("${unterminated", &lookup), "${unterminated");
    }

    #[test]
    fn resolved_values_are_not_rescanned() {
        let lookup = env(&[("K", "${K}"), ("A", "${B}"), ("B", "b")]);
        assert_eq!(resolve_env_vars("${K}", &lookup), "${K}");
        assert_eq!(resolve_env_vars("${A}-${B}", &lookup), "${B}-b");
    }

    #[test]
    fn environment_key_is_used_verbatim() {
        let mut config = QuizforgeConfig::default();
        apply_env_overrides(&mut config, env(&[("GEMINI_API_KEY", "abc${GEMINI_API_KEY}")]));
        let (_, provider) = config.active_provider().unwrap();
        assert_eq!(provider.api_key(), "abc${GEMINI_API_KEY}");
    }

    #[test]
    fn default_config() {
        let config = QuizforgeConfig::default();
        assert_eq!(config.default_provider, None);
        assert_eq!(config.default_model, "gemini-2.0-flash");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.bind_addr, "127.0.0.1:4000");
        assert!(config.active_provider().is_none());
    }

    #[test]
    fn parse_provider_config() {
        let toml_str = r#"
default_provider = "gemini"
max_tokens = 1024

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.openai]
type = "openai"
api_key = "sk-openai"
base_url = "http://localhost:8080"
"#;
        let mut config: QuizforgeConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.max_tokens, 1024);
        assert!(matches!(
            config.providers.get("openai"),
            Some(ProviderConfig::OpenAI { .. })
        ));

        apply_env_overrides(&mut config, env(&[("GEMINI_API_KEY", "g-key")]));
        let (name, provider) = config.active_provider().unwrap();
        assert_eq!(name, "gemini");
        assert_eq!(provider.api_key(), "g-key");
    }

    #[test]
    fn gemini_key_from_environment_selects_provider() {
        let mut config = QuizforgeConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("LLM_API_KEY", "legacy"), ("GEMINI_API_URL", "http://mock")]),
        );
        assert_eq!(config.default_provider.as_deref(), Some("gemini"));
        match config.providers.get("gemini") {
            Some(ProviderConfig::Gemini { api_key, base_url }) => {
                assert_eq!(api_key, "legacy");
                assert_eq!(base_url.as_deref(), Some("http://mock"));
            }
            other => panic!("expected gemini config, got {other:?}"),
        }
    }

    #[test]
    fn empty_key_means_not_configured() {
        let mut config: QuizforgeConfig = toml::from_str(
            r#"
default_provider = "gemini"
[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"
"#,
        )
        .unwrap();
        apply_env_overrides(&mut config, env(&[]));
        assert!(config.active_provider().is_none());

        let generator = build_generator(&config).unwrap();
        assert!(generator.provider_name().is_none());
    }

    #[test]
    fn unknown_default_provider_is_an_error() {
        let config = QuizforgeConfig {
            default_provider: Some("claude".into()),
            ..Default::default()
        };
        let err = build_generator(&config).err().unwrap();
        assert!(err.to_string().contains("'claude'"));
    }

    #[test]
    fn build_generator_with_key() {
        let mut config = QuizforgeConfig::default();
        apply_env_overrides(&mut config, env(&[("GEMINI_API_KEY", "k")]));
        let generator = build_generator(&config).unwrap();
        assert_eq!(generator.provider_name(), Some("gemini"));
    }

    #[test]
    fn bind_and_data_file_overrides() {
        let mut config = QuizforgeConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("PORT", "8080"), ("QUIZFORGE_DATA_FILE", "data.json")]),
        );
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.data_file, Some(PathBuf::from("data.json")));

        apply_env_overrides(&mut config, env(&[("QUIZFORGE_BIND", "0.0.0.0:9000")]));
        assert_eq!(config.bind_addr, "0.0.0.0:9000");
    }

    #[test]
    fn debug_masks_api_keys() {
        let config = ProviderConfig::OpenAI {
            api_key: "sk-secret".into(),
            base_url: None,
            org_id: None,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "default_model = \"gemini-2.5-pro\"\nrequest_timeout_secs = 5\n")
            .unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_model, "gemini-2.5-pro");
        assert_eq!(config.generator_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizforge.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
