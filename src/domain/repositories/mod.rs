mod session_repository;

pub use session_repository::*;

/// Repository error
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Session store error: {0}")]
    Store(String),
}
