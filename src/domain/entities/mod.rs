mod card;
mod personality;

pub use card::*;
pub use personality::*;
