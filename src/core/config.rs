//! Loads provider and user configuration from `~/.autoprompt/config.toml`.

use llm::builder::LLMBackend;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::str::FromStr;

use super::storage::AppCtx;
use crate::api::{default_api_key_env, LlmClient};

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub default_provider: Option<String>,
    #[serde(default)]
    pub default_user: Option<String>,
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

#[derive(Deserialize, Debug)]
pub struct ProviderConfig {
    pub backend: String,
    pub model: String,
    pub api_key_env: Option<String>,
    pub base_url: Option<String>,
}

/// Reads `config.toml` from the store directory. A missing file yields the
/// empty default; commands warn the user where that matters.
pub fn load_config(ctx: &AppCtx) -> Result<Config, String> {
    let config_path = ctx.base_dir.join("config.toml");
    if !config_path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read config.toml: {}", e))?;
    toml::from_str(&content).map_err(|e| format!("Failed to parse config.toml: {}", e))
}

/// Resolves the acting user's email: CLI flag first, then config.
pub fn resolve_user(cli_user: Option<&str>, config: &Config) -> Result<String, String> {
    if let Some(user) = cli_user {
        if !user.trim().is_empty() {
            return Ok(user.to_string());
        }
    }
    config.default_user.clone().ok_or_else(|| {
        "No user given. Pass --user <email> or set default_user in ~/.autoprompt/config.toml"
            .to_string()
    })
}

/// Builds the model client for a run.
///
/// `provider` may be a configured provider name or a direct
/// `provider:model` spec (the latter needs no config file at all). With no
/// override, the configured `default_provider` is used; with exactly one
/// configured provider, that one.
pub fn build_model_client(config: &Config, provider: Option<&str>) -> Result<LlmClient, String> {
    if let Some(spec) = provider {
        if !config.providers.contains_key(spec) {
            // Not a configured name; treat it as a provider:model spec.
            return LlmClient::from_spec(spec).map_err(|e| e.to_string());
        }
    }

    let name = match provider {
        Some(name) => name.to_string(),
        None => match &config.default_provider {
            Some(name) => name.clone(),
            None if config.providers.len() == 1 => {
                config.providers.keys().next().cloned().unwrap_or_default()
            }
            None => {
                return Err(
                    "No provider selected. Pass --provider or set default_provider in config.toml"
                        .to_string(),
                )
            }
        },
    };

    let pc = config
        .providers
        .get(&name)
        .ok_or_else(|| format!("Provider '{}' not found in config.toml", name))?;

    let backend = LLMBackend::from_str(&pc.backend)
        .map_err(|_| format!("Invalid backend '{}' for provider '{}'", pc.backend, name))?;

    let api_key_env = pc
        .api_key_env
        .clone()
        .or_else(|| default_api_key_env(&backend).map(str::to_string));

    let mut client = LlmClient::new(pc.backend.clone(), pc.model.clone());
    if let Some(env_var) = api_key_env {
        let key = env::var(&env_var).map_err(|_| {
            format!(
                "Environment variable '{}' not set for provider '{}'",
                env_var, name
            )
        })?;
        client = client.with_api_key(key);
    }
    if let Some(base_url) = &pc.base_url {
        client = client.with_base_url(base_url.clone());
    }
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_resolution_prefers_the_flag() {
        let config = Config {
            default_user: Some("config@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_user(Some("flag@example.com"), &config).unwrap(),
            "flag@example.com"
        );
        assert_eq!(resolve_user(None, &config).unwrap(), "config@example.com");
        assert!(resolve_user(None, &Config::default()).is_err());
    }

    #[test]
    fn provider_config_parses() {
        let config: Config = toml::from_str(
            r#"
default_provider = "fast"
default_user = "jane@example.com"

[providers.fast]
backend = "openai"
model = "gpt-4o-mini"

[providers.local]
backend = "ollama"
model = "llama3"
base_url = "http://localhost:11434"
"#,
        )
        .unwrap();
        assert_eq!(config.default_provider.as_deref(), Some("fast"));
        assert_eq!(config.providers.len(), 2);
        assert_eq!(config.providers["local"].base_url.as_deref(), Some("http://localhost:11434"));
    }

    #[test]
    fn missing_provider_selection_is_an_error() {
        let config: Config = toml::from_str(
            r#"
[providers.a]
backend = "openai"
model = "gpt-4o-mini"

[providers.b]
backend = "anthropic"
model = "claude-sonnet-4-20250514"
"#,
        )
        .unwrap();
        assert!(build_model_client(&config, None).is_err());
    }
}
