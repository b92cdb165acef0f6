use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{Card, CardVariant};

/// Coordinate used for "not on the board", both for unplaced tokens and
/// for the unused stealth target of a move.
pub const OFF_BOARD: i8 = -1;

/// A legal way for a player to use one card.
///
/// Two moves are equal when their [`MoveKey`]s are equal. The score and the
/// snapshot of the destination tile do not take part in comparisons, so a
/// move proposed from outside can be matched against the enumerated ones.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Move {
    pub from_x: i8,
    pub from_y: i8,
    pub to_x: i8,
    pub to_y: i8,
    /// The first tile a path-sum walk steps onto, or [`OFF_BOARD`].
    pub stealth_x: i8,
    pub stealth_y: i8,
    pub score_value: i32,
    /// The card whose rule produced this move. For a shadow move this is the
    /// mimicked card, not the shadow.
    pub card: Card,
    pub is_mimic: bool,
    /// The card lying on the destination tile when the move was generated.
    pub destination: Card,
}

/// The identifying part of a [`Move`].
///
/// This is also what a human player sends to pick a move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveKey {
    pub from_x: i8,
    pub from_y: i8,
    pub to_x: i8,
    pub to_y: i8,
    #[serde(default = "off_board")]
    pub stealth_x: i8,
    #[serde(default = "off_board")]
    pub stealth_y: i8,
    pub variant: CardVariant,
    #[serde(default)]
    pub is_mimic: bool,
}

fn off_board() -> i8 {
    OFF_BOARD
}

impl Move {
    /// A move scored by its destination tile.
    pub fn new(card: Card, from: (i8, i8), to: (i8, i8), destination: Card) -> Self {
        Self {
            from_x: from.0,
            from_y: from.1,
            to_x: to.0,
            to_y: to.1,
            stealth_x: OFF_BOARD,
            stealth_y: OFF_BOARD,
            score_value: destination.score_value,
            card,
            is_mimic: false,
            destination,
        }
    }

    pub fn key(&self) -> MoveKey {
        MoveKey {
            from_x: self.from_x,
            from_y: self.from_y,
            to_x: self.to_x,
            to_y: self.to_y,
            stealth_x: self.stealth_x,
            stealth_y: self.stealth_y,
            variant: self.card.variant,
            is_mimic: self.is_mimic,
        }
    }

    /// The card type that leaves the hand when this move is played.
    pub fn consumed_variant(&self) -> CardVariant {
        if self.is_mimic {
            CardVariant::Shadow
        } else {
            self.card.variant
        }
    }

    pub fn stealth_target(&self) -> Option<(i8, i8)> {
        (self.card.variant.uses_path_sum() && self.stealth_x != OFF_BOARD)
            .then_some((self.stealth_x, self.stealth_y))
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state)
    }
}

impl PartialEq<MoveKey> for Move {
    fn eq(&self, other: &MoveKey) -> bool {
        self.key() == *other
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}: From ({}, {}) To ({}, {}) onto {}, Score {}",
            self.card,
            if self.is_mimic { " (Shadow)" } else { "" },
            self.from_x,
            self.from_y,
            self.to_x,
            self.to_y,
            self.destination,
            self.score_value
        )
    }
}
