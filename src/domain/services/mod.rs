pub mod betting_service;
pub mod deck_service;
pub mod hand_service;
pub mod personality_service;

pub use betting_service::*;
pub use deck_service::*;
pub use hand_service::*;
pub use personality_service::*;
