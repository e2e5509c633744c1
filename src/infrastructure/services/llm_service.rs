//! LLM Service
//!
//! Abstraction for text-generation calls (supports OpenAI-compatible chat
//! completions and Ollama)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// LLM service error
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Timeout")]
    Timeout,
    #[error("Service unavailable")]
    Unavailable,
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// LLM Service trait
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Invoke LLM with system and user prompts
    async fn invoke(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError>;

    /// Check if service is available
    async fn health_check(&self) -> bool;
}

// ============================================================================
// OpenAI-compatible chat completions
// ============================================================================

/// OpenAI service configuration
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            timeout_secs: 30,
            temperature: 0.9,
            max_tokens: 60,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI chat-completions implementation
pub struct OpenAiService {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiService {
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!(
            "OpenAiService initialized: {} (model: {})",
            config.base_url, config.model
        );

        Ok(Self { client, config })
    }

    fn build_request<'a>(&'a self, system_prompt: &'a str, user_prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    fn extract_content(response: ChatResponse) -> Result<String, LlmError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| LlmError::InvalidResponse("No content in response".to_string()))
    }
}

#[async_trait]
impl LlmService for OpenAiService {
    async fn invoke(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let request = self.build_request(system_prompt, user_prompt);

        debug!("Calling chat completions API: {}", url);
        let start = std::time::Instant::now();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Chat completions API error: {} - {}", status, body);
            return Err(LlmError::InvalidResponse(format!("Status: {}", status)));
        }

        let result: ChatResponse = response.json().await?;
        let content = Self::extract_content(result)?;

        debug!(
            "Chat completion received in {:?}: {} chars",
            start.elapsed(),
            content.len()
        );

        Ok(content)
    }

    async fn health_check(&self) -> bool {
        if self.config.api_key.is_empty() {
            warn!("OpenAI health check skipped: no API key configured");
            return false;
        }

        let url = format!("{}/models", self.config.base_url);
        match self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("OpenAI health check failed: {}", e);
                false
            }
        }
    }
}

// ============================================================================
// Ollama
// ============================================================================

/// Ollama service configuration
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),
            timeout_secs: 60,
            temperature: 0.9,
            max_tokens: 60,
        }
    }
}

#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Ollama LLM service implementation
pub struct OllamaService {
    client: Client,
    config: OllamaConfig,
}

impl OllamaService {
    pub fn new(config: OllamaConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        info!(
            "OllamaService initialized: {} (model: {})",
            config.base_url, config.model
        );

        Ok(Self { client, config })
    }

    /// Format prompt in Llama instruction format
    fn format_prompt(&self, system_prompt: &str, user_prompt: &str) -> String {
        format!(
            "<|begin_of_text|><|start_header_id|>system<|end_header_id|>\n\n{}<|eot_id|><|start_header_id|>user<|end_header_id|>\n\n{}<|eot_id|><|start_header_id|>assistant<|end_header_id|>\n\n",
            system_prompt, user_prompt
        )
    }
}

#[async_trait]
impl LlmService for OllamaService {
    async fn invoke(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = OllamaRequest {
            model: self.config.model.clone(),
            prompt: self.format_prompt(system_prompt, user_prompt),
            stream: false,
            options: OllamaOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_tokens,
            },
        };

        debug!("Calling Ollama API: {}", url);

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Ollama API error: {} - {}", status, body);
            return Err(LlmError::InvalidResponse(format!("Status: {}", status)));
        }

        let result: OllamaResponse = response.json().await?;
        let text = result.response.trim().to_string();
        if text.is_empty() {
            return Err(LlmError::InvalidResponse("Empty generation".to_string()));
        }
        Ok(text)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Ollama health check failed: {}", e);
                false
            }
        }
    }
}

// ============================================================================
// Mock
// ============================================================================

/// Mock LLM service for testing
pub struct MockLlmService {
    response: Option<String>,
    delay: Option<Duration>,
}

impl MockLlmService {
    pub fn new(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            delay: None,
        }
    }

    /// A service that always reports itself unavailable
    pub fn failing() -> Self {
        Self {
            response: None,
            delay: None,
        }
    }

    /// Answer only after `delay`, for exercising timeouts
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn invoke(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, LlmError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone().ok_or(LlmError::Unavailable)
    }

    async fn health_check(&self) -> bool {
        self.response.is_some()
    }
}
