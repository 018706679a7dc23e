pub mod computer_player;
pub mod hand_analyzer;
pub mod response;
pub mod strategies;

pub use computer_player::*;
pub use response::*;
