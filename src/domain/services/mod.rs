mod deck;
mod random_source;

pub use deck::*;
pub use random_source::*;
