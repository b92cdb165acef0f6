use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Board, Card, CardVariant, PlayerState, DECK_VARIANTS};

/// How many copies of one card go into the board deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub variant: CardVariant,
    pub count: u8,
}

/// The deck composition used when nothing else is configured.
pub fn default_deck() -> Vec<DeckEntry> {
    DECK_VARIANTS
        .iter()
        .map(|&variant| DeckEntry {
            variant,
            count: Card::new(variant).deck_count,
        })
        .collect()
}

/// Board dimensions `(width, height)` for the given number of players.
pub fn default_dimensions(num_players: usize) -> (i8, i8) {
    if num_players > 2 {
        (8, 7)
    } else {
        (8, 6)
    }
}

/// Deals a fresh board: the deck is repeated until it covers every tile,
/// shuffled, and dealt column by column.
///
/// Panics if the deck is empty.
pub fn deal_board<R: Rng + ?Sized>(
    width: i8,
    height: i8,
    deck: &[DeckEntry],
    players: Vec<PlayerState>,
    rng: &mut R,
) -> Board {
    let mut cards: Vec<Card> = deck
        .iter()
        .flat_map(|e| std::iter::repeat(Card::new(e.variant)).take(e.count as usize))
        .collect();
    assert!(!cards.is_empty(), "Cannot deal a board from an empty deck");

    let num_tiles = width as usize * height as usize;
    while cards.len() < num_tiles {
        cards.extend_from_within(..);
    }
    cards.shuffle(rng);

    let mut tiles = vec![Card::EMPTY; num_tiles];
    for x in 0..width as usize {
        for y in 0..height as usize {
            // Can't run out, the deck covers every tile
            if let Some(card) = cards.pop() {
                tiles[y * width as usize + x] = card;
            }
        }
    }
    Board::new(width, height, tiles, players)
}
