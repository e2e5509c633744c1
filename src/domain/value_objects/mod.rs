mod card;
mod round;

pub use card::*;
pub use round::*;
