use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::repositories::SessionRepository;
use crate::infrastructure::config::{AppConfig, LlmProvider};
use crate::infrastructure::repositories::InMemorySessionRepository;
use crate::infrastructure::services::{
    DealerCommentator, LlmService, OllamaConfig, OllamaService, OpenAiConfig, OpenAiService,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,

    /// Open tables, one per player
    pub session_repo: Arc<InMemorySessionRepository>,

    /// Dealer commentary (works without an LLM, falling back to a placeholder)
    pub commentator: Arc<DealerCommentator>,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        Self::from_config(AppConfig::from_env()).await
    }

    pub async fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let llm_service: Option<Arc<dyn LlmService>> = match config.llm_provider {
            LlmProvider::OpenAi => {
                let service = OpenAiService::new(OpenAiConfig::default())?;
                if service.health_check().await {
                    tracing::info!("OpenAI commentary service initialized and available");
                } else {
                    // Keep it anyway; each failed call degrades to a placeholder
                    tracing::warn!("OpenAI configured but health check failed");
                }
                Some(Arc::new(service) as Arc<dyn LlmService>)
            }
            LlmProvider::Ollama => {
                let service = OllamaService::new(OllamaConfig::default())?;
                if service.health_check().await {
                    tracing::info!("Ollama commentary service initialized and available");
                    Some(Arc::new(service) as Arc<dyn LlmService>)
                } else {
                    tracing::warn!("Ollama configured but not available - dealer stays speechless");
                    None
                }
            }
            LlmProvider::None => {
                tracing::info!("LLM service not configured - dealer stays speechless");
                None
            }
        };

        Ok(Self::with_llm_service(config, llm_service))
    }

    /// Build state around an already constructed LLM service (or none)
    pub fn with_llm_service(config: AppConfig, llm_service: Option<Arc<dyn LlmService>>) -> Self {
        tracing::info!(
            "Tables seeded from {}",
            config
                .rng_seed
                .map(|s| format!("seed {}", s))
                .unwrap_or_else(|| "entropy".to_string())
        );

        let session_repo = Arc::new(
            InMemorySessionRepository::new(config.rng_seed)
                .with_idle_timeout(config.session_idle_timeout),
        );
        let commentator = Arc::new(DealerCommentator::new(
            llm_service,
            config.commentary_timeout,
        ));

        Self {
            config,
            session_repo,
            commentator,
        }
    }

    /// Periodically drop tables nobody has touched within the idle timeout
    pub fn spawn_idle_sweep(&self) -> JoinHandle<()> {
        let repo = self.session_repo.clone();
        let period = (repo.idle_timeout() / 2).max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                if let Err(e) = repo.evict_idle().await {
                    tracing::warn!("Idle table sweep failed: {}", e);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_idle_timeout_reaches_repository() {
        let config = AppConfig {
            session_idle_timeout: Duration::from_secs(5),
            ..AppConfig::default()
        };
        let state = AppState::with_llm_service(config, None);

        assert_eq!(state.session_repo.idle_timeout(), Duration::from_secs(5));
        assert!(!state.commentator.is_enabled());
    }

    #[tokio::test]
    async fn test_idle_sweep_evicts_abandoned_tables() {
        let config = AppConfig {
            session_idle_timeout: Duration::from_secs(60),
            ..AppConfig::default()
        };
        let state = AppState::with_llm_service(config, None);
        let id = state.session_repo.create().await.unwrap();
        {
            let handle = state.session_repo.find_by_id(&id).await.unwrap().unwrap();
            handle.lock().await.last_active -= 3600;
        }

        // The first tick fires immediately
        let sweep = state.spawn_idle_sweep();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(state.session_repo.count().await.unwrap(), 0);
        sweep.abort();
    }
}
