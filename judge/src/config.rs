use std::path::Path;

use ninja_camp::{
    default_deck, default_dimensions, DeckEntry, LegacyMode, PlayerState, Strategy, DECK_VARIANTS,
    MAX_BOARD_SIZE,
};
use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

const DEFAULT_NAMES: [&str; MAX_PLAYERS] = ["Red", "Blue", "Purple", "Black"];

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    #[serde(default = "default_automated")]
    pub automated: bool,
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
    /// Falls back to [`default_strategy`] for the seat.
    #[serde(default)]
    pub strategy: Option<Strategy>,
}

fn default_automated() -> bool {
    true
}

fn default_lookahead() -> usize {
    2
}

/// The first seat compares scores and frequent openings, the others go
/// for robust openings.
pub fn default_strategy(seat: usize) -> Strategy {
    if seat == 0 {
        Strategy::Legacy(LegacyMode::Hybrid)
    } else {
        Strategy::RobustOpening
    }
}

/// Everything needed to set up a match. Read from a JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default)]
    pub width: Option<i8>,
    #[serde(default)]
    pub height: Option<i8>,
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub deck: Option<Vec<DeckEntry>>,
}

impl MatchConfig {
    /// Automated players only. The third and fourth seat don't look ahead.
    pub fn with_players(num_players: usize) -> anyhow::Result<Self> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            anyhow::bail!(
                "A match needs {} to {} players, not {}",
                MIN_PLAYERS,
                MAX_PLAYERS,
                num_players
            );
        }
        let players = DEFAULT_NAMES[..num_players]
            .iter()
            .enumerate()
            .map(|(seat, name)| PlayerConfig {
                name: String::from(*name),
                automated: true,
                lookahead: if seat < 2 { default_lookahead() } else { 0 },
                strategy: None,
            })
            .collect();
        Ok(Self {
            width: None,
            height: None,
            players,
            deck: None,
        })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players.len()) {
            anyhow::bail!(
                "A match needs {} to {} players, but {} are configured",
                MIN_PLAYERS,
                MAX_PLAYERS,
                self.players.len()
            );
        }
        let (width, height) = self.dimensions();
        let valid_size = 1..=MAX_BOARD_SIZE;
        if !valid_size.contains(&width) || !valid_size.contains(&height) {
            anyhow::bail!(
                "Invalid board size {}x{}, both sides must be between 1 and {}",
                width,
                height,
                MAX_BOARD_SIZE
            );
        }
        let deck = self.deck();
        if let Some(entry) = deck.iter().find(|e| !DECK_VARIANTS.contains(&e.variant)) {
            anyhow::bail!("{:?} cards can't be dealt onto the board", entry.variant);
        }
        if deck.iter().all(|e| e.count == 0) {
            anyhow::bail!("The deck has no cards");
        }
        Ok(())
    }

    /// Board size, defaulting by the number of players.
    pub fn dimensions(&self) -> (i8, i8) {
        let (width, height) = default_dimensions(self.players.len());
        (self.width.unwrap_or(width), self.height.unwrap_or(height))
    }

    pub fn deck(&self) -> Vec<DeckEntry> {
        self.deck.clone().unwrap_or_else(default_deck)
    }

    /// Fresh states with starting hands, in seat order.
    pub fn player_states(&self) -> Vec<PlayerState> {
        self.players
            .iter()
            .enumerate()
            .map(|(seat, p)| {
                PlayerState::new(
                    seat,
                    &p.name,
                    p.automated,
                    p.lookahead,
                    p.strategy.unwrap_or_else(|| default_strategy(seat)),
                )
            })
            .collect()
    }
}
