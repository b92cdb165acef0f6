use std::cmp::Ordering;

use ninja_camp::{all_moves, Board, CardVariant, IllegalMove, LegacyMode, Move, MoveKey, Strategy};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::search::{expand, lookahead_depth, sequence_score};

/// Only this many of the most frequent opening moves compete in
/// [`Strategy::RobustOpening`].
const OPENING_CANDIDATES: usize = 3;

/// What an automated player does on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Play(Move),
    /// Every option loses points and nothing is left to recover them. The
    /// player stops for the rest of the match.
    Pass,
    /// No legal moves at all.
    OutOfMoves,
}

/// Decides the move of an automated `player` by looking ahead on clones of
/// the board.
///
/// The board is not modified. The result only depends on the board and the
/// state of `rng`.
pub fn decide<R: Rng + ?Sized>(
    board: &Board,
    player: usize,
    rng: &mut R,
) -> Result<Decision, IllegalMove> {
    let state = board.player(player);
    let moves = all_moves(board, player, rng);
    if moves.is_empty() {
        info!("{} is out of moves", state);
        return Ok(Decision::OutOfMoves);
    }

    let depth = lookahead_depth(state);
    let tree = expand(board, player, &moves, depth, rng)?;
    debug!(
        "{} considered {} sequences with depth {}",
        state,
        tree.sequences.len(),
        depth
    );

    let chosen = match state.strategy {
        Strategy::RobustOpening => select_robust_opening(&tree.sequences, rng),
        Strategy::Legacy(mode) => select_legacy(&tree.sequences, mode),
    };
    // The seeds are never dropped, so there's always a sequence to choose
    let Some(chosen) = chosen else {
        return Ok(Decision::OutOfMoves);
    };

    if sequence_score(chosen) < 0 && tree.exhausted && !state.holds(CardVariant::Shadow) {
        info!("{} finds no good move and passes", state);
        return Ok(Decision::Pass);
    }
    let opening = chosen[0];
    info!("{} goes with {} ({:?})", state, opening, state.strategy);
    Ok(Decision::Play(opening))
}

/// Picks among the best scoring sequences, preferring openings that many of
/// them share and that are played with a valuable card.
pub fn select_robust_opening<'a, R: Rng + ?Sized>(
    sequences: &'a [Vec<Move>],
    rng: &mut R,
) -> Option<&'a [Move]> {
    let best = sequences.iter().map(|s| sequence_score(s)).max()?;
    let good: Vec<&'a [Move]> = sequences
        .iter()
        .filter(|s| sequence_score(s) >= best)
        .map(Vec::as_slice)
        .collect();

    let mut groups = group_by_opening(&good);
    groups.sort_by(|a, b| b.len().cmp(&a.len()));
    let candidates: Vec<&'a [Move]> = groups
        .into_iter()
        .take(OPENING_CANDIDATES)
        .flatten()
        .collect();

    let top_card = candidates.iter().map(|s| s[0].card.score_value).max()?;
    let filtered: Vec<&'a [Move]> = candidates
        .into_iter()
        .filter(|s| s[0].card.score_value == top_card || s[0].card.variant == CardVariant::Stealth)
        .collect();
    filtered.choose(rng).copied()
}

/// Compares the first sequence with the best total score against the best
/// sequence behind the most frequent opening move.
///
/// Openings are ranked by how many sequences start with them, then by
/// their mean sequence score.
pub fn select_legacy(sequences: &[Vec<Move>], mode: LegacyMode) -> Option<&[Move]> {
    let best = sequences.iter().map(|s| sequence_score(s)).max()?;
    let best_score_path: &[Move] = sequences.iter().find(|s| sequence_score(s) == best)?;

    let all: Vec<&[Move]> = sequences.iter().map(Vec::as_slice).collect();
    let mut groups = group_by_opening(&all);
    groups.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| compare_means(b, a)));
    let most_frequent = groups.first()?;

    let group_best = most_frequent.iter().map(|s| sequence_score(s)).max()?;
    let best_moves_path = *most_frequent.iter().find(|s| sequence_score(s) == group_best)?;

    debug!(
        "Best path for score is {} starting with {}",
        best, best_score_path[0]
    );
    debug!(
        "Best path for options is {} with {} paths starting with {}",
        group_best,
        most_frequent.len(),
        best_moves_path[0]
    );

    let chosen = match mode {
        LegacyMode::Moves => best_moves_path,
        LegacyMode::Score => best_score_path,
        LegacyMode::Hybrid if group_best == best => best_moves_path,
        LegacyMode::Hybrid => best_score_path,
    };
    Some(chosen)
}

// Groups sequences by their opening move, in order of first appearance.
fn group_by_opening<'a>(sequences: &[&'a [Move]]) -> Vec<Vec<&'a [Move]>> {
    let mut openings: Vec<MoveKey> = Vec::new();
    let mut groups: Vec<Vec<&'a [Move]>> = Vec::new();
    for &sequence in sequences {
        let Some(first) = sequence.first() else {
            continue;
        };
        let key = first.key();
        match openings.iter().position(|k| *k == key) {
            Some(idx) => groups[idx].push(sequence),
            None => {
                openings.push(key);
                groups.push(vec![sequence]);
            }
        }
    }
    groups
}

// Compares the mean sequence scores of two non-empty groups without
// rounding.
fn compare_means(a: &[&[Move]], b: &[&[Move]]) -> Ordering {
    let sum = |g: &[&[Move]]| g.iter().map(|s| sequence_score(s) as i64).sum::<i64>();
    (sum(a) * b.len() as i64).cmp(&(sum(b) * a.len() as i64))
}
