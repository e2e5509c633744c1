mod game_session;
mod table;

pub use game_session::*;
pub use table::*;
