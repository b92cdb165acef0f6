use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of a [card](Card), which decides how a token may move with it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum CardVariant {
    /// What is left on a tile after its card was picked up.
    Empty,
    /// Copies the movement of the last non-shadow card that was played.
    Shadow,
    /// Jumps over a gap of empty tiles in a straight line.
    Leap,
    /// One or two steps, diagonals allowed.
    Dodge,
    /// Two orthogonal steps, scoring and collecting the tile it passes over.
    Stealth,
    /// Pushes an enemy token one tile back and takes its place.
    Ambush,
    /// Three orthogonal steps.
    Evade,
    /// Slides as far as possible in a straight line.
    Sprint,
    Wall,
    Trap,
    /// Starting hand version of [`CardVariant::Evade`].
    EvadeWood,
    /// Starting hand version of [`CardVariant::Sprint`].
    SprintWood,
    /// Puts a new token onto the board.
    PlaceMeeple,
}

/// A single card, either lying on a tile of the board or held by a player.
///
/// The properties are fixed per [`CardVariant`], see [`Card::new()`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub variant: CardVariant,
    pub score_value: i32,
    /// Tokens may stand on and walk over this card.
    pub walkable: bool,
    /// A player who picks up this card may play it later. Unplayable cards
    /// go straight to the discard pile.
    pub playable: bool,
    /// How many copies go into the board deck by default.
    pub deck_count: u8,
}

/// The variants that are shuffled into the board deck.
pub static DECK_VARIANTS: [CardVariant; 9] = [
    CardVariant::Evade,
    CardVariant::Shadow,
    CardVariant::Leap,
    CardVariant::Dodge,
    CardVariant::Stealth,
    CardVariant::Ambush,
    CardVariant::Sprint,
    CardVariant::Wall,
    CardVariant::Trap,
];

pub static ALL_VARIANTS: [CardVariant; 13] = [
    CardVariant::Empty,
    CardVariant::Shadow,
    CardVariant::Leap,
    CardVariant::Dodge,
    CardVariant::Stealth,
    CardVariant::Ambush,
    CardVariant::Evade,
    CardVariant::Sprint,
    CardVariant::Wall,
    CardVariant::Trap,
    CardVariant::EvadeWood,
    CardVariant::SprintWood,
    CardVariant::PlaceMeeple,
];

impl Card {
    pub const EMPTY: Card = Card::new(CardVariant::Empty);

    /// The card of the given variant.
    pub const fn new(variant: CardVariant) -> Self {
        let (score_value, walkable, playable, deck_count) = match variant {
            CardVariant::Empty => (0, true, false, 0),
            CardVariant::Shadow => (3, true, true, 8),
            CardVariant::Leap => (3, true, true, 8),
            CardVariant::Dodge => (1, true, true, 8),
            CardVariant::Stealth => (0, true, true, 8),
            CardVariant::Ambush => (5, true, true, 8),
            CardVariant::Evade => (4, true, true, 8),
            CardVariant::Sprint => (2, true, true, 8),
            CardVariant::Wall => (0, false, false, 3),
            CardVariant::Trap => (-1, true, false, 5),
            CardVariant::EvadeWood => (0, true, true, 4),
            CardVariant::SprintWood => (0, true, true, 4),
            CardVariant::PlaceMeeple => (0, true, true, 8),
        };
        Card {
            variant,
            score_value,
            walkable,
            playable,
            deck_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.variant == CardVariant::Empty
    }
}

impl From<CardVariant> for Card {
    fn from(variant: CardVariant) -> Self {
        Card::new(variant)
    }
}

impl CardVariant {
    /// Does this variant score the whole path it walks, collecting the
    /// first tile it steps over?
    pub fn uses_path_sum(self) -> bool {
        self == CardVariant::Stealth
    }

    /// The name of the card, without distinguishing the wooden starting cards.
    pub fn name(self) -> &'static str {
        match self {
            CardVariant::Empty => "Empty",
            CardVariant::Shadow => "Shadow",
            CardVariant::Leap => "Leap",
            CardVariant::Dodge => "Dodge",
            CardVariant::Stealth => "Stealth",
            CardVariant::Ambush => "Ambush",
            CardVariant::Evade | CardVariant::EvadeWood => "Evade",
            CardVariant::Sprint | CardVariant::SprintWood => "Sprint",
            CardVariant::Wall => "Wall",
            CardVariant::Trap => "Trap",
            CardVariant::PlaceMeeple => "PlaceMeeple",
        }
    }

    /// A single character for text rendering of the board.
    pub fn symbol(self) -> char {
        match self {
            CardVariant::Empty => '.',
            CardVariant::Shadow => 's',
            CardVariant::Leap => 'l',
            CardVariant::Dodge => 'd',
            CardVariant::Stealth => 't',
            CardVariant::Ambush => 'a',
            CardVariant::Evade => 'e',
            CardVariant::Sprint => 'r',
            CardVariant::Wall => '#',
            CardVariant::Trap => '!',
            CardVariant::EvadeWood => 'E',
            CardVariant::SprintWood => 'R',
            CardVariant::PlaceMeeple => 'p',
        }
    }

    /// Inverse of [`CardVariant::symbol()`].
    pub fn from_symbol(symbol: char) -> Option<Self> {
        ALL_VARIANTS.into_iter().find(|v| v.symbol() == symbol)
    }
}

impl std::fmt::Display for CardVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.variant)
    }
}

/// The error type for the [`FromStr`] instance of [`CardVariant`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownCardVariant(pub String);

impl std::fmt::Display for UnknownCardVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown card variant '{}'", self.0)
    }
}

impl std::error::Error for UnknownCardVariant {}

impl FromStr for CardVariant {
    type Err = UnknownCardVariant;

    /// Accepts the variant name (case-insensitive, e.g. `"evadewood"`) or its
    /// single-character symbol.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(variant) = CardVariant::from_symbol(c) {
                return Ok(variant);
            }
        }
        ALL_VARIANTS
            .into_iter()
            .find(|v| format!("{:?}", v).eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCardVariant(String::from(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_unique() {
        for v in ALL_VARIANTS {
            assert_eq!(CardVariant::from_symbol(v.symbol()), Some(v));
        }
    }

    #[test]
    fn parse_variant() {
        assert_eq!("sprintwood".parse(), Ok(CardVariant::SprintWood));
        assert_eq!("Ambush".parse(), Ok(CardVariant::Ambush));
        assert_eq!("#".parse(), Ok(CardVariant::Wall));
        assert!("Joker".parse::<CardVariant>().is_err());
    }

    #[test]
    fn empty_tiles_can_be_walked_but_not_played() {
        assert!(Card::EMPTY.walkable);
        assert!(!Card::EMPTY.playable);
        assert_eq!(Card::EMPTY.score_value, 0);
        assert!(!Card::new(CardVariant::Wall).walkable);
        assert!(!Card::new(CardVariant::Trap).playable);
    }
}
