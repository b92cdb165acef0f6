use rand::Rng;

use crate::{Board, Card, CardVariant, Move};

/// Automated players see moves onto a stealth tile as this much better, to
/// make them go after stealth cards.
pub const STEALTH_TILE_BONUS: i32 = 5;

/// Every move `player` can make on this board.
///
/// Each distinct card type in the hand is tried with each of the player's
/// placed tokens. As long as the player holds a placement card, only the
/// placement of the next unplaced token is allowed.
pub fn all_moves<R: Rng + ?Sized>(board: &Board, player: usize, rng: &mut R) -> Vec<Move> {
    let state = board.player(player);

    let mut usable_cards: Vec<Card> = Vec::new();
    for &card in &state.hand {
        if !usable_cards.iter().any(|c| c.variant == card.variant) {
            usable_cards.push(card);
        }
    }

    let must_place = usable_cards
        .iter()
        .any(|c| c.variant == CardVariant::PlaceMeeple);
    let origins: Vec<(i8, i8)> = if must_place {
        usable_cards.retain(|c| c.variant == CardVariant::PlaceMeeple);
        board
            .tokens_of(player)
            .filter(|t| !t.is_placed())
            .take(1)
            .map(|t| (t.x, t.y))
            .collect()
    } else {
        board
            .tokens_of(player)
            .filter(|t| t.is_placed())
            .map(|t| (t.x, t.y))
            .collect()
    };

    let mut moves = Vec::new();
    for card in &usable_cards {
        for &(x, y) in &origins {
            moves.extend(card.possible_moves(x, y, board, player, rng));
        }
    }

    if state.automated {
        for mv in moves.iter_mut() {
            if mv.destination.variant == CardVariant::Stealth {
                mv.score_value += STEALTH_TILE_BONUS;
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::arbitrary::BoardInput;
    use crate::{PlayerState, Strategy};

    fn players(automated: bool) -> Vec<PlayerState> {
        vec![
            PlayerState::new(0, "Red", automated, 0, Strategy::RobustOpening),
            PlayerState::new(1, "Blue", automated, 0, Strategy::RobustOpening),
        ]
    }

    quickcheck! {
        fn placement_comes_first(input: BoardInput) -> bool {
            let mut rng = StdRng::seed_from_u64(input.seed);
            let state = input.board.player(input.player);
            let has_unplaced = input.board.tokens_of(input.player).any(|t| !t.is_placed());
            let moves = all_moves(&input.board, input.player, &mut rng);
            if has_unplaced && state.holds(CardVariant::PlaceMeeple) {
                moves.iter().all(|m| m.card.variant == CardVariant::PlaceMeeple)
            } else {
                true
            }
        }
    }

    #[test]
    fn starting_hand_only_places() {
        let board = Board::from_rows(&["ddd", "lll"], players(false));
        let mut rng = StdRng::seed_from_u64(7);
        let moves = all_moves(&board, 0, &mut rng);
        assert_eq!(moves.len(), 6);
        assert!(moves
            .iter()
            .all(|m| m.card.variant == CardVariant::PlaceMeeple));
    }

    #[test]
    fn one_move_per_card_type() {
        let mut board = Board::from_rows(&["d.....#"], players(false));
        board.place_token(0, 0, 0);
        let p = board.player_mut(0);
        p.hand.retain(|c| c.variant == CardVariant::SprintWood);
        p.hand.push(Card::new(CardVariant::SprintWood));
        p.hand.push(Card::new(CardVariant::Sprint));
        let mut rng = StdRng::seed_from_u64(7);
        let moves = all_moves(&board, 0, &mut rng);
        // Two sprint cards of the same type count once
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn automated_players_like_stealth_tiles() {
        for automated in [false, true] {
            let mut board = Board::from_rows(&["dt"], players(automated));
            board.place_token(0, 0, 0);
            let p = board.player_mut(0);
            p.hand.clear();
            p.hand.push(Card::new(CardVariant::Dodge));
            let mut rng = StdRng::seed_from_u64(7);
            let moves = all_moves(&board, 0, &mut rng);
            assert_eq!(moves.len(), 1);
            let expected = if automated { STEALTH_TILE_BONUS } else { 0 };
            assert_eq!(moves[0].score_value, expected);
        }
    }

    #[test]
    fn no_cards_no_moves() {
        let mut board = Board::from_rows(&["dd"], players(false));
        board.place_token(0, 0, 0);
        board.player_mut(0).hand.clear();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(all_moves(&board, 0, &mut rng).is_empty());
    }
}
