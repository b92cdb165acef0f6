use crate::CardVariant;

/// The error type for [`Board::apply_move()`](crate::Board::apply_move).
///
/// Moves taken from [`all_moves()`](crate::all_moves) for the same board and
/// player never produce one of these, so seeing one means the move did not
/// come from the legal set, or the board was corrupted.
#[derive(Debug, PartialEq, Eq)]
pub enum IllegalMove {
    /// There is no token to move, either at the origin of the move or, for
    /// placements, among the player's unplaced tokens.
    NoToken { x: i8, y: i8 },
    NotOwner { owner: usize, player: usize },
    /// A card was picked up from a tile no token can stand on.
    Unwalkable { x: i8, y: i8, variant: CardVariant },
    CardNotHeld { variant: CardVariant },
    /// An ambush ended on a tile without an enemy token.
    NoTarget { x: i8, y: i8 },
    PushBlocked { x: i8, y: i8 },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::NoToken { x, y } => write!(f, "There is no token to move at ({}, {})", x, y),
            IllegalMove::NotOwner { owner, player } => write!(
                f,
                "Player {} tried to move a token belonging to player {}",
                player, owner
            ),
            IllegalMove::Unwalkable { x, y, variant } => write!(
                f,
                "Picked up the unwalkable card {} at ({}, {})",
                variant, x, y
            ),
            IllegalMove::CardNotHeld { variant } => {
                write!(f, "Tried to discard {}, which is not in the player's hand", variant)
            }
            IllegalMove::NoTarget { x, y } => {
                write!(f, "The ambush at ({}, {}) has no enemy token to push", x, y)
            }
            IllegalMove::PushBlocked { x, y } => {
                write!(f, "The ambush pushed a token onto the unwalkable tile ({}, {})", x, y)
            }
        }
    }
}
