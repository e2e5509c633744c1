use std::sync::Arc;

use tracing::{debug, info};

use crate::application::table::commentary::refresh_commentary;
use crate::application::table::{TableError, TableSnapshot};
use crate::domain::repositories::SessionRepository;
use crate::domain::services::is_soft;
use crate::domain::value_objects::PlayerAction;
use crate::infrastructure::services::DealerCommentator;

/// Player stand input
pub struct PlayerStandInput {
    pub session_id: String,
}

/// Player stand use case: the dealer plays out and the round is settled
pub struct PlayerStand<R: SessionRepository> {
    session_repo: Arc<R>,
    commentator: Arc<DealerCommentator>,
}

impl<R: SessionRepository> PlayerStand<R> {
    pub fn new(session_repo: Arc<R>, commentator: Arc<DealerCommentator>) -> Self {
        Self {
            session_repo,
            commentator,
        }
    }

    pub async fn execute(&self, input: PlayerStandInput) -> Result<TableSnapshot, TableError> {
        let handle = self
            .session_repo
            .find_by_id(&input.session_id)
            .await?
            .ok_or(TableError::SessionNotFound)?;

        let mut table = handle.lock().await;
        let table = &mut *table;
        table.touch();

        let transition = table.session.stand(table.rng.as_mut())?;
        if !transition.is_applied() {
            debug!("Stand ignored at table {} ({:?})", table.id, table.session.phase());
            return Ok(TableSnapshot::capture(&table.id, &table.session, transition));
        }

        if is_soft(table.session.dealer_hand()) {
            debug!("Dealer at table {} stood on a soft total", table.id);
        }
        info!(
            "Player stood at table {}: {} vs dealer {:?} - {}",
            table.id,
            table.session.player_total(),
            table.session.dealer_total(),
            table.session.result()
        );

        refresh_commentary(&self.commentator, &mut table.session, PlayerAction::Stand).await;

        Ok(TableSnapshot::capture(&table.id, &table.session, transition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::application::table::{
        RestartTable, RestartTableInput, ViewTable, ViewTableInput,
    };
    use crate::domain::value_objects::{RoundOutcome, RoundPhase};
    use crate::infrastructure::repositories::InMemorySessionRepository;
    use crate::infrastructure::services::{LlmService, MockLlmService};

    fn commentator(service: MockLlmService) -> Arc<DealerCommentator> {
        let service: Arc<dyn LlmService> = Arc::new(service);
        Arc::new(DealerCommentator::new(Some(service), Duration::from_millis(50)))
    }

    #[tokio::test]
    async fn test_stand_settles_round() {
        for seed in 0..20 {
            let repo = Arc::new(InMemorySessionRepository::new(Some(seed)));
            let id = repo.create().await.unwrap();
            let view = ViewTable::new(repo.clone());
            view.execute(ViewTableInput {
                session_id: id.clone(),
            })
            .await
            .unwrap();

            let snapshot = PlayerStand::new(repo.clone(), commentator(MockLlmService::new("Coward.")))
                .execute(PlayerStandInput { session_id: id })
                .await
                .unwrap();

            let dealer_total = snapshot.dealer_total.unwrap();
            let expected = RoundOutcome::from_totals(snapshot.player_total, dealer_total);

            assert!(snapshot.game_over);
            assert!(dealer_total >= 17);
            assert_eq!(snapshot.result, expected.message());
            assert_eq!(snapshot.dealer_hidden_cards, 0);
            assert_eq!(snapshot.commentary, "Coward.");
        }
    }

    #[tokio::test]
    async fn test_stand_with_slow_commentary_still_settles() {
        let repo = Arc::new(InMemorySessionRepository::new(Some(8)));
        let id = repo.create().await.unwrap();
        ViewTable::new(repo.clone())
            .execute(ViewTableInput {
                session_id: id.clone(),
            })
            .await
            .unwrap();

        let slow = MockLlmService::new("late").with_delay(Duration::from_secs(5));
        let snapshot = PlayerStand::new(repo.clone(), commentator(slow))
            .execute(PlayerStandInput { session_id: id })
            .await
            .unwrap();

        assert!(snapshot.game_over);
        assert!(!snapshot.result.is_empty());
        assert_eq!(snapshot.commentary, "[Dealer is speechless: Timeout]");
    }

    #[tokio::test]
    async fn test_second_stand_is_ignored_until_restart() {
        let repo = Arc::new(InMemorySessionRepository::new(Some(3)));
        let id = repo.create().await.unwrap();
        let view = ViewTable::new(repo.clone());
        let stand = PlayerStand::new(repo.clone(), commentator(MockLlmService::new("Hm.")));

        view.execute(ViewTableInput {
            session_id: id.clone(),
        })
        .await
        .unwrap();
        let first = stand
            .execute(PlayerStandInput {
                session_id: id.clone(),
            })
            .await
            .unwrap();
        let second = stand
            .execute(PlayerStandInput {
                session_id: id.clone(),
            })
            .await
            .unwrap();

        assert!(first.applied);
        assert!(!second.applied);
        assert_eq!(first.dealer_cards, second.dealer_cards);
        assert_eq!(first.result, second.result);

        let restarted = RestartTable::new(repo.clone())
            .execute(RestartTableInput {
                session_id: id.clone(),
            })
            .await
            .unwrap();
        assert_eq!(restarted.phase, RoundPhase::NotStarted);
        assert!(restarted.player_hand.is_empty());
        assert_eq!(restarted.result, "");
        assert_eq!(restarted.commentary, "");

        let fresh = view.execute(ViewTableInput { session_id: id }).await.unwrap();
        assert!(fresh.applied);
        assert_eq!(fresh.phase, RoundPhase::InProgress);
        assert_eq!(fresh.player_hand.len(), 2);
        assert_eq!(fresh.dealer_cards.len(), 1);
        assert_eq!(fresh.dealer_hidden_cards, 1);
    }
}
