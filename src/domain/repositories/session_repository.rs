use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::entities::Table;
use crate::domain::repositories::RepositoryError;

/// Exclusive handle on one table; holding the lock serializes transitions
pub type TableHandle = Arc<Mutex<Table>>;

/// Session repository trait
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Open a new, isolated table and return its ID
    async fn create(&self) -> Result<String, RepositoryError>;

    /// Find table by session ID
    async fn find_by_id(&self, id: &str) -> Result<Option<TableHandle>, RepositoryError>;

    /// Remove a table, returns false when it did not exist
    async fn delete(&self, id: &str) -> Result<bool, RepositoryError>;

    /// Number of open tables
    async fn count(&self) -> Result<usize, RepositoryError>;

    /// Drop tables left idle past the repository's timeout, returns how many
    async fn evict_idle(&self) -> Result<usize, RepositoryError>;
}
