//! Bridge between the executor's model-client boundary and the `llm` crate.

use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;
use std::env;
use std::str::FromStr;

use super::error::ModelCallError;
use super::GenerationParams;

/// The synchronous request/response capability the chain executor consumes.
///
/// Implementations report internal failures as `Err(ModelCallError)`; the
/// executor converts those to error-text responses at its boundary, so a
/// chain run never aborts on a failing call.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ModelCallError>;
}

/// Production `ModelClient` backed by the `llm` crate.
///
/// The provider is rebuilt per call because temperature and max_tokens are
/// builder-level settings and vary per request.
pub struct LlmClient {
    backend: String,
    model: String,
    api_key: Option<String>,
    base_url: Option<String>,
}

impl LlmClient {
    pub fn new(backend: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            model: model.into(),
            api_key: None,
            base_url: None,
        }
    }

    /// Parses a `provider:model` spec (e.g. `openai:gpt-4o-mini`) and
    /// resolves the API key from the provider's conventional environment
    /// variable.
    pub fn from_spec(spec: &str) -> Result<Self, ModelCallError> {
        let (provider, model) = spec.split_once(':').ok_or_else(|| {
            ModelCallError::Configuration(
                "invalid backend format, use 'provider:model'".to_string(),
            )
        })?;
        let backend = LLMBackend::from_str(provider).map_err(|_| {
            ModelCallError::Configuration(format!("unknown provider: {}", provider))
        })?;

        let mut client = Self::new(provider, model);
        if let Some(env_var) = default_api_key_env(&backend) {
            let key = env::var(env_var).map_err(|_| {
                ModelCallError::Configuration(format!(
                    "API key env var '{}' not found",
                    env_var
                ))
            })?;
            client.api_key = Some(key);
        }
        Ok(client)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

#[async_trait]
impl ModelClient for LlmClient {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ModelCallError> {
        let backend = LLMBackend::from_str(&self.backend).map_err(|_| {
            ModelCallError::Configuration(format!("unknown provider: {}", self.backend))
        })?;

        let mut builder = LLMBuilder::new()
            .backend(backend)
            .model(self.model.as_str())
            .temperature(params.temperature)
            .max_tokens(params.max_tokens);
        if let Some(key) = &self.api_key {
            builder = builder.api_key(key.as_str());
        }
        if let Some(url) = &self.base_url {
            builder = builder.base_url(url.as_str());
        }

        let provider = builder
            .build()
            .map_err(|e| ModelCallError::Configuration(e.to_string()))?;

        let messages = vec![ChatMessage::user().content(prompt).build()];
        let response = provider
            .chat(&messages)
            .await
            .map_err(|e| ModelCallError::Backend(e.to_string()))?;

        Ok(response.text().unwrap_or_default())
    }
}

/// Conventional API-key environment variable per backend. `None` means the
/// backend does not need a key (e.g. a local Ollama server).
pub(crate) fn default_api_key_env(backend: &LLMBackend) -> Option<&'static str> {
    match backend {
        LLMBackend::OpenAI => Some("OPENAI_API_KEY"),
        LLMBackend::Anthropic => Some("ANTHROPIC_API_KEY"),
        LLMBackend::Google => Some("GOOGLE_API_KEY"),
        LLMBackend::Groq => Some("GROQ_API_KEY"),
        LLMBackend::XAI => Some("XAI_API_KEY"),
        LLMBackend::Cohere => Some("COHERE_API_KEY"),
        LLMBackend::DeepSeek => Some("DEEPSEEK_API_KEY"),
        LLMBackend::Mistral => Some("MISTRAL_API_KEY"),
        LLMBackend::Ollama => None,
        _ => None,
    }
}
