use std::sync::Arc;

use tracing::{debug, info};

use crate::application::table::commentary::refresh_commentary;
use crate::application::table::{TableError, TableSnapshot};
use crate::domain::repositories::SessionRepository;
use crate::domain::value_objects::PlayerAction;
use crate::infrastructure::services::DealerCommentator;

/// Player hit input
pub struct PlayerHitInput {
    pub session_id: String,
}

/// Player hit use case
pub struct PlayerHit<R: SessionRepository> {
    session_repo: Arc<R>,
    commentator: Arc<DealerCommentator>,
}

impl<R: SessionRepository> PlayerHit<R> {
    pub fn new(session_repo: Arc<R>, commentator: Arc<DealerCommentator>) -> Self {
        Self {
            session_repo,
            commentator,
        }
    }

    pub async fn execute(&self, input: PlayerHitInput) -> Result<TableSnapshot, TableError> {
        let handle = self
            .session_repo
            .find_by_id(&input.session_id)
            .await?
            .ok_or(TableError::SessionNotFound)?;

        // Held through the commentary call so the next action waits for it
        let mut table = handle.lock().await;
        let table = &mut *table;
        table.touch();

        let transition = table.session.hit(table.rng.as_mut())?;
        if !transition.is_applied() {
            debug!("Hit ignored at table {} ({:?})", table.id, table.session.phase());
            return Ok(TableSnapshot::capture(&table.id, &table.session, transition));
        }

        info!(
            "Player hit at table {}: total {}",
            table.id,
            table.session.player_total()
        );
        if table.session.is_game_over() {
            info!("Table {}: {}", table.id, table.session.result());
        }

        refresh_commentary(&self.commentator, &mut table.session, PlayerAction::Hit).await;

        Ok(TableSnapshot::capture(&table.id, &table.session, transition))
    }
}
