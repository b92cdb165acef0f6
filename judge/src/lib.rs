mod config;
mod game;
mod observer;
mod player;
mod tournament;
pub use config::*;
pub use game::*;
pub use observer::*;
pub use player::*;
pub use tournament::*;
