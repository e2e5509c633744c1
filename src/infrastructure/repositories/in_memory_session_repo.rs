use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::entities::Table;
use crate::domain::repositories::{RepositoryError, SessionRepository, TableHandle};
use crate::domain::services::ChaChaRandomSource;

/// How long a table may sit untouched before it is dropped
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// In-memory implementation of SessionRepository.
///
/// Tables idle longer than the idle timeout are evicted whenever a new table
/// is opened or [`SessionRepository::evict_idle`] runs. With a base seed every
/// new table gets `seed + n`, so a restarted server replays the same deals.
pub struct InMemorySessionRepository {
    tables: RwLock<HashMap<String, TableHandle>>,
    seed: Option<u64>,
    opened: AtomicU64,
    idle_timeout: Duration,
}

impl InMemorySessionRepository {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            seed,
            opened: AtomicU64::new(0),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Evict tables idle for longer than the timeout as of `now` (unix
    /// seconds). A table whose lock is held is in use and always kept.
    pub fn evict_idle_at(&self, now: i64) -> Result<usize, RepositoryError> {
        let limit = i64::try_from(self.idle_timeout.as_secs()).unwrap_or(i64::MAX);
        let mut tables = self.tables.write().map_err(Self::poisoned)?;
        let before = tables.len();

        tables.retain(|_, handle| match handle.try_lock() {
            Ok(table) => table.idle_secs(now) <= limit,
            Err(_) => true,
        });

        let evicted = before - tables.len();
        if evicted > 0 {
            debug!("Evicted {} idle tables, {} still open", evicted, tables.len());
        }
        Ok(evicted)
    }

    fn next_rng(&self) -> ChaChaRandomSource {
        let n = self.opened.fetch_add(1, Ordering::Relaxed);
        ChaChaRandomSource::new(self.seed.map(|s| s.wrapping_add(n)))
    }

    fn poisoned<T>(_: T) -> RepositoryError {
        RepositoryError::Store("session map lock poisoned".to_string())
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self) -> Result<String, RepositoryError> {
        self.evict_idle_at(Utc::now().timestamp())?;

        let id = uuid::Uuid::new_v4().to_string();
        let table = Table::new(id.clone(), Box::new(self.next_rng()));

        let mut tables = self.tables.write().map_err(Self::poisoned)?;
        tables.insert(id.clone(), Arc::new(Mutex::new(table)));
        Ok(id)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TableHandle>, RepositoryError> {
        let tables = self.tables.read().map_err(Self::poisoned)?;
        Ok(tables.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().map_err(Self::poisoned)?;
        Ok(tables.remove(id).is_some())
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let tables = self.tables.read().map_err(Self::poisoned)?;
        Ok(tables.len())
    }

    async fn evict_idle(&self) -> Result<usize, RepositoryError> {
        self.evict_idle_at(Utc::now().timestamp())
    }
}
