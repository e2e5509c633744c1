use std::sync::Arc;

use tracing::info;

use crate::application::table::TableError;
use crate::domain::repositories::SessionRepository;

/// Close table input
pub struct CloseTableInput {
    pub session_id: String,
}

/// Close table use case
pub struct CloseTable<R: SessionRepository> {
    session_repo: Arc<R>,
}

impl<R: SessionRepository> CloseTable<R> {
    pub fn new(session_repo: Arc<R>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self, input: CloseTableInput) -> Result<(), TableError> {
        if !self.session_repo.delete(&input.session_id).await? {
            return Err(TableError::SessionNotFound);
        }

        info!("Closed table {}", input.session_id);
        Ok(())
    }
}
