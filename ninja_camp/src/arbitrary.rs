use quickcheck::{Arbitrary, Gen};

use crate::{Board, Card, CardVariant, PlayerState, Strategy, ALL_VARIANTS, DECK_VARIANTS};

/// A small random board in the middle of a match, and a player to move.
#[derive(Clone, Debug)]
pub struct BoardInput {
    pub board: Board,
    pub player: usize,
    /// Seed for the randomness in move generation.
    pub seed: u64,
}

impl Arbitrary for BoardInput {
    fn arbitrary(g: &mut Gen) -> Self {
        let width = (u8::arbitrary(g) % 6 + 2) as i8;
        let height = (u8::arbitrary(g) % 5 + 2) as i8;

        // Empty tiles are common once a match is underway
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for _ in 0..width as usize * height as usize {
            let variant = if u8::arbitrary(g) % 4 == 0 {
                CardVariant::Empty
            } else {
                *g.choose(&DECK_VARIANTS).unwrap()
            };
            tiles.push(Card::new(variant));
        }

        let players = (0..2)
            .map(|id| {
                let mut state = PlayerState::new(id, "P", bool::arbitrary(g), 0, Strategy::RobustOpening);
                if bool::arbitrary(g) {
                    state.hand.retain(|c| c.variant != CardVariant::PlaceMeeple);
                }
                for _ in 0..u8::arbitrary(g) % 4 {
                    let variant = *g.choose(&DECK_VARIANTS).unwrap();
                    if Card::new(variant).playable {
                        state.hand.push(Card::new(variant));
                    }
                }
                state
            })
            .collect();
        let mut board = Board::new(width, height, tiles, players);

        for owner in 0..2 {
            for _ in 0..u8::arbitrary(g) % 4 {
                let x = (u8::arbitrary(g) % width as u8) as i8;
                let y = (u8::arbitrary(g) % height as u8) as i8;
                board.place_token(owner, x, y);
            }
        }
        board.set_last_non_mimic_card(Card::new(*g.choose(&ALL_VARIANTS).unwrap()));

        BoardInput {
            board,
            player: usize::arbitrary(g) % 2,
            seed: u64::arbitrary(g),
        }
    }
}

impl Arbitrary for CardVariant {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&ALL_VARIANTS).unwrap()
    }
}
