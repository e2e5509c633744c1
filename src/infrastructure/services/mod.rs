mod dealer_commentator;
mod llm_service;

pub use dealer_commentator::*;
pub use llm_service::*;
