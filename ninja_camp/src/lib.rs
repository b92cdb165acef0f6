pub use board::*;
pub use cards::*;
pub use deck::*;
pub use enumerate::*;
pub use errors::*;
pub use moves::*;
pub use player_state::*;
pub use protocol_types::*;
pub use visualization::*;
pub use walk::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod cards;
mod deck;
mod enumerate;
mod errors;
mod movement;
mod moves;
mod player_state;
mod protocol_types;
mod visualization;
mod walk;
