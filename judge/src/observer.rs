use ninja_camp::{visualize_board, Board, Move};
use tracing::{debug, info};

use crate::{MatchResult, Outcome};

/// Gets to look at the match as it goes. Never changes anything.
pub trait Observer {
    fn move_applied(&mut self, _board: &Board, _player: usize, _mv: &Move) {}
    fn player_out(&mut self, _board: &Board, _player: usize) {}
    fn round_finished(&mut self, _board: &Board, _round: usize) {}
    fn match_finished(&mut self, _board: &Board, _result: &MatchResult) {}
}

/// Writes the board to the log.
#[derive(Default)]
pub struct LogObserver {}

impl Observer for LogObserver {
    fn move_applied(&mut self, board: &Board, player: usize, mv: &Move) {
        debug!(player = %board.player(player), score = board.score(player), "Played {}", mv);
    }

    fn player_out(&mut self, board: &Board, player: usize) {
        info!("{} is out", board.player(player));
    }

    fn round_finished(&mut self, board: &Board, round: usize) {
        debug!("After round {}:\n{}", round, visualize_board(board));
    }

    fn match_finished(&mut self, board: &Board, result: &MatchResult) {
        info!("Final board:\n{}", visualize_board(board));
        match result.outcome {
            Outcome::Won { player } => info!(scores = ?result.scores, "{} wins", board.player(player)),
            Outcome::Tie => info!(scores = ?result.scores, "Tie"),
            Outcome::Abandoned { player } => {
                info!("{} abandoned the match", board.player(player))
            }
        }
    }
}
