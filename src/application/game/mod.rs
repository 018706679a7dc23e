mod computer_turn;
mod create_game;
mod delete_game;
mod evict_finished_games;
mod get_game_state;
mod player_action;
mod start_hand;

pub use computer_turn::*;
pub use create_game::*;
pub use delete_game::*;
pub use evict_finished_games::*;
pub use get_game_state::*;
pub use player_action::*;
pub use start_hand::*;
