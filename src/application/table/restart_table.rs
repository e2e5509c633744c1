use std::sync::Arc;

use tracing::info;

use crate::application::table::{TableError, TableSnapshot};
use crate::domain::entities::Transition;
use crate::domain::repositories::SessionRepository;

/// Restart table input
pub struct RestartTableInput {
    pub session_id: String,
}

/// Restart table use case. The cleared table deals again on the next view.
pub struct RestartTable<R: SessionRepository> {
    session_repo: Arc<R>,
}

impl<R: SessionRepository> RestartTable<R> {
    pub fn new(session_repo: Arc<R>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, input: RestartTableInput) -> Result<TableSnapshot, TableError> {
        let handle = self
            .session_repo
            .find_by_id(&input.session_id)
            .await?
            .ok_or(TableError::SessionNotFound)?;

        let mut table = handle.lock().await;
        table.touch();
        table.session.restart();
        info!("Restarted table {}", table.id);

        Ok(TableSnapshot::capture(&table.id, &table.session, Transition::Applied))
    }
}
