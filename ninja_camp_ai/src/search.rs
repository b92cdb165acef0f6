use ninja_camp::{all_moves, Board, CardVariant, IllegalMove, Move, PlayerState};
use rand::Rng;
use tracing::{debug, trace};

/// How many moves ahead `player` looks.
///
/// One step more while all placement cards are still in hand, since
/// the first placement says little on its own.
pub fn lookahead_depth(player: &PlayerState) -> usize {
    if player.count_in_hand(CardVariant::PlaceMeeple) == 3 {
        player.lookahead_depth + 1
    } else {
        player.lookahead_depth
    }
}

/// Every move sequence considered, shorter ones included.
#[derive(Clone, Debug)]
pub struct SearchTree {
    pub sequences: Vec<Vec<Move>>,
    /// Some round found no continuation at all before the depth was reached.
    pub exhausted: bool,
}

impl SearchTree {
    /// The best total score among all sequences.
    pub fn best_score(&self) -> Option<i32> {
        self.sequences.iter().map(|s| sequence_score(s)).max()
    }
}

/// Sum of the move scores of a sequence.
pub fn sequence_score(sequence: &[Move]) -> i32 {
    sequence.iter().map(|mv| mv.score_value).sum()
}

/// Extends every single move in `seeds` into sequences of up to
/// `depth + 1` moves by replaying them on clones of the board.
///
/// Shadow cards are removed from the simulated hand after replaying, so a
/// sequence never counts on more than one imitation.
pub fn expand<R: Rng + ?Sized>(
    board: &Board,
    player: usize,
    seeds: &[Move],
    depth: usize,
    rng: &mut R,
) -> Result<SearchTree, IllegalMove> {
    let mut sequences: Vec<Vec<Move>> = seeds.iter().map(|&mv| vec![mv]).collect();
    let mut exhausted = false;

    for step in 1..=depth {
        let mut continued = Vec::new();
        for sequence in sequences.iter().filter(|s| s.len() == step) {
            let mut virtual_board = board.clone();
            for mv in sequence {
                virtual_board.apply_move(mv, player)?;
            }
            virtual_board
                .player_mut(player)
                .hand
                .retain(|c| c.variant != CardVariant::Shadow);

            for follow_up in all_moves(&virtual_board, player, rng) {
                let mut longer = sequence.clone();
                longer.push(follow_up);
                continued.push(longer);
            }
        }
        trace!("Lookahead step {} found {} continuations", step, continued.len());

        if continued.is_empty() {
            debug!("All moves exhausted after {} steps", step);
            exhausted = true;
            break;
        }
        sequences.extend(continued);
    }

    Ok(SearchTree {
        sequences,
        exhausted,
    })
}

#[cfg(test)]
mod tests {
    use ninja_camp::{Card, PlayerState, Strategy};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn board(rows: &[&str]) -> Board {
        let mut board = Board::from_rows(
            rows,
            vec![
                PlayerState::new(0, "Red", false, 0, Strategy::RobustOpening),
                PlayerState::new(1, "Blue", false, 0, Strategy::RobustOpening),
            ],
        );
        board.place_token(0, 0, 0);
        board.player_mut(0).hand.clear();
        board
    }

    #[test]
    fn depth_grows_with_full_placement_hand() {
        let mut state = PlayerState::new(0, "Red", true, 2, Strategy::RobustOpening);
        assert_eq!(lookahead_depth(&state), 3);
        state.hand.retain(|c| c.variant != CardVariant::PlaceMeeple);
        assert_eq!(lookahead_depth(&state), 2);
    }

    #[test]
    fn sequences_keep_their_prefixes() {
        let mut board = board(&["dddd"]);
        for _ in 0..2 {
            board.player_mut(0).hand.push(Card::new(CardVariant::Dodge));
        }
        let mut rng = StdRng::seed_from_u64(1);
        let seeds = all_moves(&board, 0, &mut rng);
        assert_eq!(seeds.len(), 2);

        let tree = expand(&board, 0, &seeds, 1, &mut rng).unwrap();
        assert!(!tree.exhausted);
        assert_eq!(tree.sequences.iter().filter(|s| s.len() == 1).count(), 2);
        assert!(tree.sequences.iter().any(|s| s.len() == 2));
        assert!(tree.sequences.iter().all(|s| seeds.contains(&s[0])));
    }

    #[test]
    fn running_out_of_cards_exhausts_the_search() {
        // Leaving the trap picks up nothing playable
        let mut board = board(&["!."]);
        board.player_mut(0).hand.push(Card::new(CardVariant::Dodge));
        let mut rng = StdRng::seed_from_u64(1);
        let seeds = all_moves(&board, 0, &mut rng);
        assert_eq!(seeds.len(), 1);

        let tree = expand(&board, 0, &seeds, 2, &mut rng).unwrap();
        assert_eq!(tree.sequences.len(), 1);
        assert!(tree.exhausted);
        assert_eq!(tree.best_score(), Some(0));
    }

    #[test]
    fn shadow_is_only_counted_once() {
        let mut board = board(&["......#"]);
        board.set_last_non_mimic_card(Card::new(CardVariant::Sprint));
        board.player_mut(0).hand.push(Card::new(CardVariant::Shadow));
        board.player_mut(0).hand.push(Card::new(CardVariant::Shadow));
        let mut rng = StdRng::seed_from_u64(1);
        let seeds = all_moves(&board, 0, &mut rng);
        assert_eq!(seeds.len(), 1);

        let tree = expand(&board, 0, &seeds, 1, &mut rng).unwrap();
        assert_eq!(tree.sequences.len(), 1);
        assert!(tree.exhausted);
    }

    #[test]
    fn replay_errors_are_reported() {
        let board = board(&["dddd"]);
        let mut rng = StdRng::seed_from_u64(1);
        // Nobody holds a leap card here
        let bogus = Move::new(
            Card::new(CardVariant::Leap),
            (0, 0),
            (1, 0),
            Card::new(CardVariant::Dodge),
        );
        let result = expand(&board, 0, &[bogus], 1, &mut rng);
        assert_eq!(
            result.unwrap_err(),
            IllegalMove::CardNotHeld {
                variant: CardVariant::Leap
            }
        );
    }
}
