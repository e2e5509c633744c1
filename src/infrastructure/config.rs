//! Application configuration, read from the environment
//!
//! `.env` files are loaded by `main` through dotenvy before this runs.

use std::str::FromStr;
use std::time::Duration;

/// Which LLM backend voices the dealer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Ollama,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown LLM provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for LlmProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "ollama" => Ok(LlmProvider::Ollama),
            "none" | "off" => Ok(LlmProvider::None),
            _ => Err(UnknownProvider(s.to_string())),
        }
    }
}

impl LlmProvider {
    /// Pick a provider from the environment. An explicit `LLM_PROVIDER` wins,
    /// otherwise the presence of an API key or Ollama URL decides.
    fn detect() -> Self {
        if let Ok(value) = std::env::var("LLM_PROVIDER") {
            return value.parse().unwrap_or_else(|e: UnknownProvider| {
                tracing::warn!("{}, commentary disabled", e);
                LlmProvider::None
            });
        }

        if std::env::var("OPENAI_API_KEY").is_ok() {
            LlmProvider::OpenAi
        } else if std::env::var("OLLAMA_BASE_URL").is_ok() {
            LlmProvider::Ollama
        } else {
            LlmProvider::None
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Base seed for table random sources; entropy when unset
    pub rng_seed: Option<u64>,
    pub commentary_timeout: Duration,
    /// Tables untouched for this long are dropped
    pub session_idle_timeout: Duration,
    pub llm_provider: LlmProvider,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            rng_seed: None,
            commentary_timeout: Duration::from_secs(10),
            session_idle_timeout: Duration::from_secs(30 * 60),
            llm_provider: LlmProvider::None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env_parse("PORT").unwrap_or(defaults.port),
            rng_seed: env_parse("BLACKJACK_SEED"),
            commentary_timeout: env_parse("COMMENTARY_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.commentary_timeout),
            session_idle_timeout: env_parse("SESSION_IDLE_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_idle_timeout),
            llm_provider: LlmProvider::detect(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
