use std::fmt;

use ninja_camp::deal_board;
use rand::Rng;
use tracing::{debug, info};

use crate::{play_match, MatchConfig, MoveSource, Observer, Outcome};

/// Results of a series of matches between the same players.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tally {
    pub names: Vec<String>,
    /// Indexed by seat.
    pub wins: Vec<usize>,
    pub ties: usize,
    pub total_scores: Vec<i64>,
    pub played: usize,
    /// A human player walked away, which ends the series.
    pub abandoned: bool,
}

impl Tally {
    fn new(config: &MatchConfig) -> Self {
        let num_players = config.players.len();
        Self {
            names: config.players.iter().map(|p| p.name.clone()).collect(),
            wins: vec![0; num_players],
            ties: 0,
            total_scores: vec![0; num_players],
            played: 0,
            abandoned: false,
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "End result after {} matches:", self.played)?;
        for (seat, name) in self.names.iter().enumerate() {
            let mean = if self.played > 0 {
                self.total_scores[seat] as f32 / self.played as f32
            } else {
                0.0
            };
            write!(
                f,
                "\n- {} wins by {} (mean score {:.1})",
                self.wins[seat], name, mean
            )?;
        }
        write!(f, "\n- {} ties", self.ties)?;
        if self.abandoned {
            write!(f, "\n- the last match was abandoned")?;
        }
        Ok(())
    }
}

/// Plays `num_games` matches on freshly dealt boards. Every other match,
/// the play order is reversed.
pub fn play_tournament<R: Rng + ?Sized>(
    config: &MatchConfig,
    num_games: usize,
    humans: &mut dyn MoveSource,
    observer: &mut dyn Observer,
    rng: &mut R,
) -> anyhow::Result<Tally> {
    config.validate()?;
    let (width, height) = config.dimensions();
    let deck = config.deck();
    let mut tally = Tally::new(config);

    for game_idx in 0..num_games {
        let mut board = deal_board(width, height, &deck, config.player_states(), rng);
        let mut play_order: Vec<usize> = (0..config.players.len()).collect();
        if game_idx % 2 == 1 {
            play_order.reverse();
        }
        debug!(game_idx, ?play_order, "Starting match");

        let result = play_match(&mut board, &play_order, humans, observer, rng)?;
        match result.outcome {
            Outcome::Won { player } => {
                debug!(winner = tally.names[player], game_idx);
                tally.wins[player] += 1;
            }
            Outcome::Tie => {
                debug!(game_idx, "Tie");
                tally.ties += 1;
            }
            Outcome::Abandoned { player } => {
                info!(player = tally.names[player], game_idx, "Match abandoned");
                tally.abandoned = true;
                break;
            }
        }
        for (total, score) in tally.total_scores.iter_mut().zip(&result.scores) {
            *total += *score as i64;
        }
        tally.played += 1;
    }
    Ok(tally)
}
