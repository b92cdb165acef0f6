use serde::{Deserialize, Serialize};

use crate::{
    precompute_walk_patterns, Card, CardVariant, IllegalMove, Move, PlayerState, OFF_BOARD,
    TOKENS_PER_PLAYER,
};

/// Boards are at most this many tiles wide and high.
pub const MAX_BOARD_SIZE: i8 = 100;

/// A player's marker ("meeple").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub x: i8,
    pub y: i8,
    pub owner: usize,
}

impl Token {
    pub fn unplaced(owner: usize) -> Self {
        Self {
            x: OFF_BOARD,
            y: OFF_BOARD,
            owner,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.x != OFF_BOARD
    }
}

/// The complete state of a match.
///
/// This is plain data, so cloning it yields a fully independent board for
/// trying out moves. The walk pattern cache is global and not part of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: i8,
    height: i8,
    /// Exactly one card per tile, in row-major order.
    tiles: Vec<Card>,
    players: Vec<PlayerState>,
    /// The tokens of all players, grouped by player in player order.
    tokens: Vec<Token>,
    /// The card a shadow currently imitates.
    last_non_mimic: Card,
}

impl Board {
    /// Creates a board from a list of tiles in row-major order. Every player
    /// gets [`TOKENS_PER_PLAYER`] unplaced tokens.
    ///
    /// Panics if the dimensions don't match the number of tiles, or if the
    /// player ids don't match their position in `players`.
    pub fn new(width: i8, height: i8, tiles: Vec<Card>, players: Vec<PlayerState>) -> Self {
        assert!(width > 0 && height > 0 && width <= MAX_BOARD_SIZE && height <= MAX_BOARD_SIZE);
        assert_eq!(tiles.len(), width as usize * height as usize);
        for (idx, player) in players.iter().enumerate() {
            assert_eq!(player.id, idx);
        }
        precompute_walk_patterns();

        let tokens = players
            .iter()
            .flat_map(|p| std::iter::repeat(Token::unplaced(p.id)).take(TOKENS_PER_PLAYER))
            .collect();
        Self {
            width,
            height,
            tiles,
            players,
            tokens,
            last_non_mimic: Card::EMPTY,
        }
    }

    /// Creates a board from rows of [card symbols](CardVariant::symbol), top row first.
    ///
    /// ```
    /// # use ninja_camp::{Board, CardVariant};
    /// let board = Board::from_rows(&["l.a", "#!t"], vec![]);
    /// assert_eq!(board.tile(2, 0).variant, CardVariant::Ambush);
    /// assert_eq!(board.tile(0, 1).variant, CardVariant::Wall);
    /// ```
    ///
    /// Panics on unknown symbols or ragged rows.
    pub fn from_rows(rows: &[&str], players: Vec<PlayerState>) -> Self {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut tiles = Vec::with_capacity(width * height);
        for row in rows {
            assert_eq!(row.chars().count(), width, "Rows must have equal length");
            for symbol in row.chars() {
                let variant = CardVariant::from_symbol(symbol)
                    .unwrap_or_else(|| panic!("Invalid card symbol '{}'", symbol));
                tiles.push(Card::new(variant));
            }
        }
        Board::new(width as i8, height as i8, tiles, players)
    }

    pub fn width(&self) -> i8 {
        self.width
    }

    pub fn height(&self) -> i8 {
        self.height
    }

    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i8, y: i8) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// The card on the given tile, if it is in bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Card> {
        self.in_bounds(x, y).then(|| self.tiles[self.index(x, y)])
    }

    /// The card on the given tile.
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn tile(&self, x: i8, y: i8) -> Card {
        assert!(self.in_bounds(x, y), "({}, {}) is out of bounds", x, y);
        self.tiles[self.index(x, y)]
    }

    /// Can a token stand on this tile? With `include_tokens`, a tile that
    /// already holds a token counts as blocked.
    pub fn is_walkable(&self, x: i8, y: i8, include_tokens: bool) -> bool {
        match self.get(x, y) {
            Some(card) if card.walkable => !include_tokens || self.token_at(x, y).is_none(),
            _ => false,
        }
    }

    pub fn token_at(&self, x: i8, y: i8) -> Option<&Token> {
        self.token_idx_at(x, y).map(|idx| &self.tokens[idx])
    }

    fn token_idx_at(&self, x: i8, y: i8) -> Option<usize> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.tokens.iter().position(|t| t.x == x && t.y == y)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn tokens_of(&self, player: usize) -> impl Iterator<Item = &Token> + '_ {
        self.tokens.iter().filter(move |t| t.owner == player)
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player(&self, id: usize) -> &PlayerState {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: usize) -> &mut PlayerState {
        &mut self.players[id]
    }

    pub fn last_non_mimic_card(&self) -> Card {
        self.last_non_mimic
    }

    pub fn set_last_non_mimic_card(&mut self, card: Card) {
        self.last_non_mimic = card;
    }

    /// Puts the first unplaced token of `owner` onto a free walkable tile,
    /// without playing a card. For setting up positions.
    ///
    /// Returns false if the tile can't take a token or no token is left.
    pub fn place_token(&mut self, owner: usize, x: i8, y: i8) -> bool {
        if !self.is_walkable(x, y, true) {
            return false;
        }
        match self
            .tokens
            .iter_mut()
            .find(|t| t.owner == owner && !t.is_placed())
        {
            Some(token) => {
                token.x = x;
                token.y = y;
                true
            }
            None => false,
        }
    }

    /// The cards under the placed tokens of a player.
    pub fn occupied_tiles(&self, player: usize) -> Vec<Card> {
        self.tokens_of(player)
            .filter_map(|t| self.get(t.x, t.y))
            .collect()
    }

    /// Hand, discard pile and occupied tiles, summed up.
    pub fn score(&self, player: usize) -> i32 {
        self.players[player].card_score()
            + self
                .occupied_tiles(player)
                .iter()
                .map(|c| c.score_value)
                .sum::<i32>()
    }

    /// Plays a move for `player`.
    ///
    /// The token leaves its tile and the player picks up the card lying
    /// there (and the stealth target for path-sum moves). Then the card used
    /// is discarded, an ambushed token is pushed aside, and the token is put
    /// on the destination.
    ///
    /// The move is not validated against the legal moves. On error, the
    /// board may be left partially updated.
    pub fn apply_move(&mut self, mv: &Move, player: usize) -> Result<(), IllegalMove> {
        let token_idx = if mv.card.variant == CardVariant::PlaceMeeple {
            self.tokens
                .iter()
                .position(|t| t.owner == player && !t.is_placed())
        } else {
            self.token_idx_at(mv.from_x, mv.from_y)
        }
        .ok_or(IllegalMove::NoToken {
            x: mv.from_x,
            y: mv.from_y,
        })?;
        let owner = self.tokens[token_idx].owner;
        if owner != player {
            return Err(IllegalMove::NotOwner { owner, player });
        }

        self.pick_up_card(player, mv.from_x, mv.from_y)?;
        if let Some((sx, sy)) = mv.stealth_target() {
            self.pick_up_card(player, sx, sy)?;
        }

        let consumed = mv.consumed_variant();
        if !self.players[player].discard(consumed) {
            return Err(IllegalMove::CardNotHeld { variant: consumed });
        }

        if mv.card.variant == CardVariant::Ambush {
            let victim_idx =
                self.token_idx_at(mv.to_x, mv.to_y)
                    .ok_or(IllegalMove::NoTarget {
                        x: mv.to_x,
                        y: mv.to_y,
                    })?;
            let push_x = (mv.to_x - mv.from_x).signum();
            let push_y = (mv.to_y - mv.from_y).signum();
            let victim = &mut self.tokens[victim_idx];
            victim.x += push_x;
            victim.y += push_y;
            let (x, y) = (victim.x, victim.y);
            if !self.is_walkable(x, y, false) {
                return Err(IllegalMove::PushBlocked { x, y });
            }
        }

        if !mv.is_mimic {
            self.last_non_mimic = mv.card;
        }

        let token = &mut self.tokens[token_idx];
        token.x = mv.to_x;
        token.y = mv.to_y;
        Ok(())
    }

    // Moves the card at (x, y) into the hand of the player and leaves an
    // empty tile behind. Does nothing for coordinates off the board.
    fn pick_up_card(&mut self, player: usize, x: i8, y: i8) -> Result<(), IllegalMove> {
        if !self.in_bounds(x, y) {
            return Ok(());
        }
        let idx = self.index(x, y);
        let picked = std::mem::replace(&mut self.tiles[idx], Card::EMPTY);
        let state = &mut self.players[player];
        state.hand.push(picked);
        if !picked.walkable {
            return Err(IllegalMove::Unwalkable {
                x,
                y,
                variant: picked.variant,
            });
        }
        if !picked.playable {
            state.discard(picked.variant);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::arbitrary::BoardInput;
    use crate::{all_moves, Strategy};

    fn players() -> Vec<PlayerState> {
        vec![
            PlayerState::new(0, "Red", false, 0, Strategy::RobustOpening),
            PlayerState::new(1, "Blue", false, 0, Strategy::RobustOpening),
        ]
    }

    quickcheck! {
        fn legal_moves_apply_cleanly(input: BoardInput) -> bool {
            let mut rng = StdRng::seed_from_u64(input.seed);
            let moves = all_moves(&input.board, input.player, &mut rng);
            moves.iter().all(|mv| {
                let mut board = input.board.clone();
                board.apply_move(mv, input.player).is_ok()
            })
        }
    }

    quickcheck! {
        fn replay_on_clone_matches_fresh_board(input: BoardInput) -> bool {
            let mut rng = StdRng::seed_from_u64(input.seed);
            let moves = all_moves(&input.board, input.player, &mut rng);
            let Some(mv) = moves.first() else { return true };
            let mut cloned = input.board.clone();
            cloned.apply_move(mv, input.player).unwrap();
            let mut fresh = input.board;
            fresh.apply_move(mv, input.player).unwrap();
            cloned == fresh
        }
    }

    #[test]
    fn placement_uses_first_unplaced_token() {
        let mut board = Board::from_rows(&["ddd", "ddd"], players());
        let mv = Move::new(
            Card::new(CardVariant::PlaceMeeple),
            (OFF_BOARD, OFF_BOARD),
            (1, 1),
            board.tile(1, 1),
        );
        board.apply_move(&mv, 1).unwrap();
        assert_eq!(board.token_at(1, 1).map(|t| t.owner), Some(1));
        assert_eq!(board.player(1).count_in_hand(CardVariant::PlaceMeeple), 2);
        assert_eq!(board.last_non_mimic_card().variant, CardVariant::PlaceMeeple);
        // The tile is only picked up when the token leaves it
        assert_eq!(board.tile(1, 1).variant, CardVariant::Dodge);
        assert_eq!(board.score(1), 1);
    }

    #[test]
    fn leaving_a_tile_picks_up_its_card() {
        let mut board = Board::from_rows(&["a!l"], players());
        board.place_token(0, 0, 0);
        board.player_mut(0).hand.push(Card::new(CardVariant::Sprint));
        let mv = Move::new(Card::new(CardVariant::Sprint), (0, 0), (1, 0), board.tile(1, 0));
        board.apply_move(&mv, 0).unwrap();
        assert!(board.tile(0, 0).is_empty());
        assert!(board.player(0).holds(CardVariant::Ambush));
        assert!(!board.player(0).holds(CardVariant::Sprint));
        assert_eq!(board.score(0), 5 + 2 - 1);
    }

    #[test]
    fn unplayable_pickups_are_discarded() {
        let mut board = Board::from_rows(&["!d"], players());
        board.place_token(0, 0, 0);
        let mv = Move::new(Card::new(CardVariant::SprintWood), (0, 0), (1, 0), board.tile(1, 0));
        board.apply_move(&mv, 0).unwrap();
        let p = board.player(0);
        assert!(!p.holds(CardVariant::Trap));
        assert!(p.discard_pile.iter().any(|c| c.variant == CardVariant::Trap));
    }

    #[test]
    fn stealth_collects_two_cards() {
        let mut board = Board::from_rows(&["aes"], players());
        board.place_token(0, 0, 0);
        board.player_mut(0).hand.push(Card::new(CardVariant::Stealth));
        let mv = Move {
            stealth_x: 1,
            stealth_y: 0,
            score_value: 7,
            ..Move::new(Card::new(CardVariant::Stealth), (0, 0), (2, 0), board.tile(2, 0))
        };
        board.apply_move(&mv, 0).unwrap();
        assert!(board.tile(0, 0).is_empty());
        assert!(board.tile(1, 0).is_empty());
        let p = board.player(0);
        assert!(p.holds(CardVariant::Ambush));
        assert!(p.holds(CardVariant::Evade));
        assert_eq!(board.token_at(2, 0).map(|t| t.owner), Some(0));
    }

    #[test]
    fn ambush_pushes_enemy() {
        let mut board = Board::from_rows(&["dddd"], players());
        board.place_token(0, 0, 0);
        board.place_token(1, 2, 0);
        board.player_mut(0).hand.push(Card::new(CardVariant::Ambush));
        let mv = Move::new(Card::new(CardVariant::Ambush), (0, 0), (2, 0), board.tile(2, 0));
        board.apply_move(&mv, 0).unwrap();
        assert_eq!(board.token_at(2, 0).map(|t| t.owner), Some(0));
        assert_eq!(board.token_at(3, 0).map(|t| t.owner), Some(1));
    }

    #[test]
    fn mimic_keeps_last_card() {
        let mut board = Board::from_rows(&["ddd"], players());
        board.place_token(0, 0, 0);
        board.set_last_non_mimic_card(Card::new(CardVariant::Sprint));
        board.player_mut(0).hand.push(Card::new(CardVariant::Shadow));
        let mv = Move {
            is_mimic: true,
            ..Move::new(Card::new(CardVariant::Sprint), (0, 0), (2, 0), board.tile(2, 0))
        };
        board.apply_move(&mv, 0).unwrap();
        assert!(!board.player(0).holds(CardVariant::Shadow));
        assert_eq!(board.last_non_mimic_card().variant, CardVariant::Sprint);
    }

    #[test]
    fn errors() {
        let mut board = Board::from_rows(&["dd#d"], players());
        board.place_token(0, 0, 0);
        board.place_token(1, 1, 0);

        let foreign = Move::new(Card::new(CardVariant::SprintWood), (1, 0), (0, 0), Card::EMPTY);
        assert_eq!(
            board.clone().apply_move(&foreign, 0),
            Err(IllegalMove::NotOwner { owner: 1, player: 0 })
        );

        let nothing_there = Move::new(Card::new(CardVariant::SprintWood), (3, 0), (2, 0), Card::EMPTY);
        assert_eq!(
            board.clone().apply_move(&nothing_there, 0),
            Err(IllegalMove::NoToken { x: 3, y: 0 })
        );

        let not_held = Move::new(Card::new(CardVariant::Leap), (0, 0), (3, 0), Card::EMPTY);
        assert_eq!(
            board.clone().apply_move(&not_held, 0),
            Err(IllegalMove::CardNotHeld {
                variant: CardVariant::Leap
            })
        );

        board.player_mut(0).hand.push(Card::new(CardVariant::Ambush));
        let blocked = Move::new(Card::new(CardVariant::Ambush), (0, 0), (1, 0), Card::EMPTY);
        assert_eq!(
            board.clone().apply_move(&blocked, 0),
            Err(IllegalMove::PushBlocked { x: 2, y: 0 })
        );

        let no_target = Move::new(Card::new(CardVariant::Ambush), (0, 0), (3, 0), Card::EMPTY);
        assert_eq!(
            board.clone().apply_move(&no_target, 0),
            Err(IllegalMove::NoTarget { x: 3, y: 0 })
        );
    }

    #[test]
    fn place_token_rejects_blocked_tiles() {
        let mut board = Board::from_rows(&["d#"], players());
        assert!(!board.place_token(0, 1, 0));
        assert!(!board.place_token(0, 2, 0));
        assert!(board.place_token(0, 0, 0));
        assert!(!board.place_token(1, 0, 0));
    }
}
