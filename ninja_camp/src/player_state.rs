use serde::{Deserialize, Serialize};

use crate::{Card, CardVariant};

/// Number of tokens every player gets at the start of a match.
pub const TOKENS_PER_PLAYER: usize = 3;

/// How an automated player picks among the sequences found by its lookahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Best total score, preferring frequent and valuable opening moves.
    RobustOpening,
    /// Compares the best scoring sequence with the most frequent opening move.
    Legacy(LegacyMode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyMode {
    /// Always take the sequence with the best score.
    Score,
    /// Always take the best sequence behind the most frequent opening move.
    Moves,
    /// Take the most frequent opening move if it scores as well as the best
    /// sequence, else the best sequence.
    Hybrid,
}

/// The state for a single player during one match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    pub id: usize,
    pub name: String,
    pub hand: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub automated: bool,
    /// How many moves beyond the first one the lookahead explores.
    pub lookahead_depth: usize,
    pub strategy: Strategy,
    /// Set once the player could not or would not move. Stays set until the
    /// end of the match.
    pub out_of_moves: bool,
}

impl PlayerState {
    /// A player holding the starting hand: one placement card per token, plus
    /// a wooden evade and a wooden sprint.
    pub fn new(
        id: usize,
        name: &str,
        automated: bool,
        lookahead_depth: usize,
        strategy: Strategy,
    ) -> Self {
        let mut hand = vec![Card::new(CardVariant::PlaceMeeple); TOKENS_PER_PLAYER];
        hand.push(Card::new(CardVariant::EvadeWood));
        hand.push(Card::new(CardVariant::SprintWood));
        Self {
            id,
            name: String::from(name),
            hand,
            discard_pile: Vec::new(),
            automated,
            lookahead_depth,
            strategy,
            out_of_moves: false,
        }
    }

    pub fn count_in_hand(&self, variant: CardVariant) -> usize {
        self.hand.iter().filter(|c| c.variant == variant).count()
    }

    pub fn holds(&self, variant: CardVariant) -> bool {
        self.hand.iter().any(|c| c.variant == variant)
    }

    /// Moves one card of the given type from the hand to the discard pile.
    pub(crate) fn discard(&mut self, variant: CardVariant) -> bool {
        match self.hand.iter().position(|c| c.variant == variant) {
            Some(idx) => {
                let card = self.hand.remove(idx);
                self.discard_pile.push(card);
                true
            }
            None => false,
        }
    }

    /// Score of the cards held or discarded, without the occupied tiles.
    pub fn card_score(&self) -> i32 {
        self.hand
            .iter()
            .chain(self.discard_pile.iter())
            .map(|c| c.score_value)
            .sum()
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Player", self.name)
    }
}
