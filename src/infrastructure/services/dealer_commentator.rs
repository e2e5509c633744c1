//! Dealer commentator
//!
//! Turns a player action into a sarcastic one-liner from the LLM. Any failure
//! comes back as `LlmError`; callers decide what to show instead.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::services::hand_value;
use crate::domain::value_objects::{Card, PlayerAction};
use crate::infrastructure::services::{LlmError, LlmService};

const SYSTEM_PROMPT: &str = "You are a sarcastic blackjack dealer in a casino.";

/// What the dealer gets to see when commenting
#[derive(Debug, Clone)]
pub struct CommentaryRequest {
    pub action: PlayerAction,
    pub player_hand: Vec<Card>,
    pub dealer_visible_card: Card,
}

/// Text shown when the dealer has nothing to say
pub fn speechless(err: &LlmError) -> String {
    format!("[Dealer is speechless: {}]", err)
}

pub struct DealerCommentator {
    llm_service: Option<Arc<dyn LlmService>>,
    timeout: Duration,
}

impl DealerCommentator {
    pub fn new(llm_service: Option<Arc<dyn LlmService>>, timeout: Duration) -> Self {
        Self {
            llm_service,
            timeout,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.llm_service.is_some()
    }

    fn build_user_prompt(request: &CommentaryRequest) -> String {
        let hand = request
            .player_hand
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "You are a sarcastic blackjack dealer. The player just chose to '{}'. \
             Their hand is: [{}] (total {}). \
             The dealer's visible card is: {}. \
             Respond with a short, funny, sarcastic comment.",
            request.action.as_str(),
            hand,
            hand_value(&request.player_hand),
            request.dealer_visible_card
        )
    }

    /// Ask the LLM for a comment, bounded by the configured timeout
    pub async fn comment(&self, request: &CommentaryRequest) -> Result<String, LlmError> {
        let llm_service = self.llm_service.as_ref().ok_or(LlmError::Unavailable)?;
        let user_prompt = Self::build_user_prompt(request);

        debug!("Requesting dealer commentary for {}", request.action.as_str());

        let text = match tokio::time::timeout(
            self.timeout,
            llm_service.invoke(SYSTEM_PROMPT, &user_prompt),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                warn!("Dealer commentary timed out after {:?}", self.timeout);
                return Err(LlmError::Timeout);
            }
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::InvalidResponse("Empty commentary".to_string()));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::services::MockLlmService;

    fn request(action: PlayerAction) -> CommentaryRequest {
        CommentaryRequest {
            action,
            player_hand: vec!["10♠".parse().unwrap(), "9♥".parse().unwrap()],
            dealer_visible_card: "7♦".parse().unwrap(),
        }
    }

    #[test]
    fn test_user_prompt_contents() {
        let prompt = DealerCommentator::build_user_prompt(&request(PlayerAction::Stand));
        assert!(prompt.contains("'Stand'"));
        assert!(prompt.contains("10♠, 9♥"));
        assert!(prompt.contains("total 19"));
        assert!(prompt.contains("visible card is: 7♦"));
    }

    #[tokio::test]
    async fn test_comment_success() {
        let service: Arc<dyn LlmService> = Arc::new(MockLlmService::new(" Brave. Very brave. "));
        let commentator = DealerCommentator::new(Some(service), Duration::from_secs(1));

        let text = commentator.comment(&request(PlayerAction::Hit)).await.unwrap();
        assert!(!text.is_empty());
        assert_eq!(text, "Brave. Very brave.");
    }

    #[tokio::test]
    async fn test_comment_without_service() {
        let commentator = DealerCommentator::new(None, Duration::from_secs(1));
        let err = commentator.comment(&request(PlayerAction::Hit)).await.unwrap_err();

        assert!(matches!(err, LlmError::Unavailable));
        assert_eq!(speechless(&err), "[Dealer is speechless: Service unavailable]");
    }

    #[tokio::test]
    async fn test_comment_times_out() {
        let service: Arc<dyn LlmService> =
            Arc::new(MockLlmService::new("too late").with_delay(Duration::from_secs(5)));
        let commentator = DealerCommentator::new(Some(service), Duration::from_millis(20));

        let err = commentator.comment(&request(PlayerAction::Stand)).await.unwrap_err();
        assert!(matches!(err, LlmError::Timeout));
    }

    #[tokio::test]
    async fn test_blank_comment_is_invalid() {
        let service: Arc<dyn LlmService> = Arc::new(MockLlmService::new("   "));
        let commentator = DealerCommentator::new(Some(service), Duration::from_secs(1));

        let err = commentator.comment(&request(PlayerAction::Hit)).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
    }
}
