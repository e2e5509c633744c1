mod in_memory_session_repo;

pub use in_memory_session_repo::*;
