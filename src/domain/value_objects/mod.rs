mod game_settings;
mod game_state;

pub use game_settings::*;
pub use game_state::*;
