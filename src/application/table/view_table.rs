use std::sync::Arc;

use tracing::debug;

use crate::application::table::{TableError, TableSnapshot};
use crate::domain::repositories::SessionRepository;

/// View table input
pub struct ViewTableInput {
    pub session_id: String,
}

/// View table use case. Looking at a table with no round in play deals one.
pub struct ViewTable<R: SessionRepository> {
    session_repo: Arc<R>,
}

impl<R: SessionRepository> ViewTable<R> {
    pub fn new(session_repo: Arc<R>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, input: ViewTableInput) -> Result<TableSnapshot, TableError> {
        let handle = self
            .session_repo
            .find_by_id(&input.session_id)
            .await?
            .ok_or(TableError::SessionNotFound)?;

        let mut table = handle.lock().await;
        let table = &mut *table;
        table.touch();

        let transition = table.session.observe(table.rng.as_mut())?;
        if transition.is_applied() {
            debug!(
                "Dealt new round at table {}: player {:?}",
                table.id,
                table.session.player_hand()
            );
        }

        Ok(TableSnapshot::capture(&table.id, &table.session, transition))
    }
}
