use crate::domain::repositories::RepositoryError;
use crate::domain::services::DeckError;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Session not found")]
    SessionNotFound,
    #[error("Game error: {0}")]
    Deck(#[from] DeckError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}
