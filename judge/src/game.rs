use anyhow::Context;
use ninja_camp::{all_moves, Board, Move, Response};
use ninja_camp_ai::{decide, Decision};
use rand::Rng;
use tracing::{debug, warn};

use crate::observer::Observer;
use crate::player::MoveSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won { player: usize },
    /// The two best players have the same score.
    Tie,
    /// A human player stopped the match.
    Abandoned { player: usize },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    /// Indexed by player id.
    pub scores: Vec<i32>,
    /// Player ids, best score first.
    pub ranking: Vec<usize>,
    pub outcome: Outcome,
    pub rounds: usize,
}

/// What happened during a single turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Played(Move),
    /// The player gave up for the rest of the match.
    Passed,
    /// No legal moves were left.
    OutOfMoves,
    Abandoned,
}

/// Plays rounds until every player is out of moves. In every round the
/// players take turns in `play_order`.
///
/// Returns an error when a move could not be applied, or when talking to
/// a human player failed.
pub fn play_match<R: Rng + ?Sized>(
    board: &mut Board,
    play_order: &[usize],
    humans: &mut dyn MoveSource,
    observer: &mut dyn Observer,
    rng: &mut R,
) -> anyhow::Result<MatchResult> {
    let mut rounds = 0;
    let mut abandoned_by = None;

    'rounds: while board.players().iter().any(|p| !p.out_of_moves) {
        rounds += 1;
        for &player in play_order {
            if board.player(player).out_of_moves {
                continue;
            }
            match take_turn(board, player, humans, rng)? {
                TurnOutcome::Played(mv) => observer.move_applied(board, player, &mv),
                TurnOutcome::Passed | TurnOutcome::OutOfMoves => observer.player_out(board, player),
                TurnOutcome::Abandoned => {
                    abandoned_by = Some(player);
                    break 'rounds;
                }
            }
        }
        observer.round_finished(board, rounds);
    }

    let result = match_result(board, rounds, abandoned_by);
    if board.players().iter().any(|p| !p.automated) && abandoned_by.is_none() {
        humans.match_ended(&result.scores)?;
    }
    observer.match_finished(board, &result);
    Ok(result)
}

/// Lets `player` make one move.
///
/// Automated players decide on their own. Human players are asked through
/// `humans` until they propose a legal move, pass or abandon.
pub fn take_turn<R: Rng + ?Sized>(
    board: &mut Board,
    player: usize,
    humans: &mut dyn MoveSource,
    rng: &mut R,
) -> anyhow::Result<TurnOutcome> {
    let outcome = if board.player(player).automated {
        match decide(board, player, rng)? {
            Decision::Play(mv) => TurnOutcome::Played(mv),
            Decision::Pass => TurnOutcome::Passed,
            Decision::OutOfMoves => TurnOutcome::OutOfMoves,
        }
    } else {
        ask_human(board, player, humans, rng)?
    };

    match outcome {
        TurnOutcome::Played(mv) => {
            board
                .apply_move(&mv, player)
                .with_context(|| format!("{} could not play {}", board.player(player), mv))?;
        }
        TurnOutcome::Passed | TurnOutcome::OutOfMoves => {
            board.player_mut(player).out_of_moves = true;
        }
        TurnOutcome::Abandoned => {}
    }
    Ok(outcome)
}

fn ask_human<R: Rng + ?Sized>(
    board: &Board,
    player: usize,
    humans: &mut dyn MoveSource,
    rng: &mut R,
) -> anyhow::Result<TurnOutcome> {
    let legal_moves = all_moves(board, player, rng);
    if legal_moves.is_empty() {
        return Ok(TurnOutcome::OutOfMoves);
    }
    loop {
        match humans.choose_move(board, player, &legal_moves)? {
            Response::Play(key) => match legal_moves.iter().find(|mv| **mv == key) {
                Some(mv) => return Ok(TurnOutcome::Played(*mv)),
                None => {
                    warn!(player = %board.player(player), ?key, "Not a legal move");
                    humans.invalid_move(key)?;
                }
            },
            Response::Pass => return Ok(TurnOutcome::Passed),
            Response::Abandon => return Ok(TurnOutcome::Abandoned),
        }
    }
}

fn match_result(board: &Board, rounds: usize, abandoned_by: Option<usize>) -> MatchResult {
    let scores: Vec<i32> = (0..board.players().len()).map(|p| board.score(p)).collect();
    let mut ranking: Vec<usize> = (0..scores.len()).collect();
    ranking.sort_by(|a, b| scores[*b].cmp(&scores[*a]));

    let outcome = match (abandoned_by, ranking.as_slice()) {
        (Some(player), _) => Outcome::Abandoned { player },
        (None, [first, second, ..]) if scores[*first] == scores[*second] => Outcome::Tie,
        (None, [first, ..]) => Outcome::Won { player: *first },
        (None, []) => Outcome::Tie,
    };
    debug!(?scores, ?outcome, rounds, "Match over");
    MatchResult {
        scores,
        ranking,
        outcome,
        rounds,
    }
}
