use std::sync::Arc;

use tracing::info;

use crate::application::table::TableError;
use crate::domain::repositories::SessionRepository;

/// Open table output
pub struct OpenTableOutput {
    pub session_id: String,
}

/// Open table use case: seats a new player at an isolated table
pub struct OpenTable<R: SessionRepository> {
    session_repo: Arc<R>,
}

impl<R: SessionRepository> OpenTable<R> {
    pub fn new(session_repo: Arc<R>) -> Self {
        Self { session_repo }
    }

    pub async fn execute(&self) -> Result<OpenTableOutput, TableError> {
        let session_id = self.session_repo.create().await?;
        info!("Opened table {}", session_id);

        Ok(OpenTableOutput { session_id })
    }
}
