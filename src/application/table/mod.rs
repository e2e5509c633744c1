mod close_table;
mod commentary;
mod open_table;
mod player_hit;
mod player_stand;
mod restart_table;
mod table_error;
mod table_snapshot;
mod view_table;

pub use close_table::*;
pub use open_table::*;
pub use player_hit::*;
pub use player_stand::*;
pub use restart_table::*;
pub use table_error::*;
pub use table_snapshot::*;
pub use view_table::*;
