use serde::{Deserialize, Serialize};

use crate::{board_rows, Board, CardVariant, MoveKey, Token};

/// Message from the judge to a human player's input source.
///
/// Sent as one JSON object per line.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Asks the player to pick one of the legal moves.
    ///
    /// The response should be a [`Response`].
    ChooseMove {
        player: usize,
        /// The board, one string of card symbols per row, top row first.
        /// Tokens are shown as the digit of their owner.
        rows: Vec<String>,
        tokens: Vec<Token>,
        hand: Vec<CardVariant>,
        /// The card a shadow would currently imitate.
        shadow_copies: CardVariant,
        legal_moves: Vec<MoveKey>,
    },
    /// The previous response did not name a legal move. A new
    /// [`Request::ChooseMove`] follows.
    InvalidMove { proposed: MoveKey },
    /// The match is over. No response is expected.
    MatchEnded { scores: Vec<i32> },
}

/// A human player's answer to [`Request::ChooseMove`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Play the move with these coordinates and card.
    Play(MoveKey),
    /// Give up for the rest of the match.
    Pass,
    /// Stop the whole match.
    Abandon,
}

impl Request {
    pub fn choose_move(board: &Board, player: usize, legal_moves: Vec<MoveKey>) -> Self {
        Request::ChooseMove {
            player,
            rows: board_rows(board),
            tokens: board.tokens().to_vec(),
            hand: board.player(player).hand.iter().map(|c| c.variant).collect(),
            shadow_copies: board.last_non_mimic_card().variant,
            legal_moves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_response_is_flat() {
        let json = r#"{"type": "Play", "from_x": 1, "from_y": 2, "to_x": 1, "to_y": 4, "variant": "Evade"}"#;
        let response: Response = serde_json::from_str(json).unwrap();
        match response {
            Response::Play(key) => {
                assert_eq!((key.to_x, key.to_y), (1, 4));
                assert_eq!(key.variant, CardVariant::Evade);
            }
            other => panic!("Unexpected response {:?}", other),
        }
        let pass: Response = serde_json::from_str(r#"{"type": "Pass"}"#).unwrap();
        assert_eq!(pass, Response::Pass);
    }
}
