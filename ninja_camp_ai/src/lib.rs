//! The automated player: looks a few moves ahead on copies of the board and
//! picks the opening move of the most promising sequence.
mod decision;
mod search;

pub use decision::*;
pub use search::*;
