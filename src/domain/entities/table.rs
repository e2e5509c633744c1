use chrono::Utc;

use crate::domain::entities::GameSession;
use crate::domain::services::RandomSource;

/// A seat at the table: one player's session plus the random source that
/// deals for it. Sessions never share a generator.
pub struct Table {
    pub id: String,
    pub session: GameSession,
    pub rng: Box<dyn RandomSource>,
    /// Unix seconds of the last request that reached this table
    pub last_active: i64,
}

impl Table {
    pub fn new(id: String, rng: Box<dyn RandomSource>) -> Self {
        Self {
            id,
            session: GameSession::new(),
            rng,
            last_active: Utc::now().timestamp(),
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now().timestamp();
    }

    /// Seconds since the last request, as of `now`
    pub fn idle_secs(&self, now: i64) -> i64 {
        now.saturating_sub(self.last_active)
    }
}
