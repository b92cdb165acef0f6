use std::collections::{BTreeMap, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::{walk_patterns, Board, Card, CardVariant, Move, OFF_BOARD};

/// How far ray casts (leap, sprint, ambush) look before giving up.
const MAX_RAY_STEPS: usize = 100;

/// Automated players consider at most this many placements per tile type.
const PLACEMENTS_PER_TILE_TYPE: usize = 3;

const CARDINAL_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Card {
    /// All moves the token at `(x, y)` could make with this card.
    ///
    /// For [`CardVariant::PlaceMeeple`], `(x, y)` is the (off-board) position
    /// of the token to place. The randomness is only used to thin out the
    /// placements considered by automated players.
    pub fn possible_moves<R: Rng + ?Sized>(
        &self,
        x: i8,
        y: i8,
        board: &Board,
        player: usize,
        rng: &mut R,
    ) -> Vec<Move> {
        match self.variant {
            CardVariant::PlaceMeeple => self.placements(x, y, board, player, rng),
            CardVariant::Shadow => mimic(x, y, board, player, rng),
            CardVariant::Leap => self.rays(x, y, board, Self::leap),
            CardVariant::Dodge => {
                let mut moves = self.walk(x, y, 1, true, board);
                moves.extend(self.walk(x, y, 2, true, board));
                dedup(moves)
            }
            CardVariant::Stealth => self.walk(x, y, 2, false, board),
            CardVariant::Evade | CardVariant::EvadeWood => self.walk(x, y, 3, false, board),
            CardVariant::Ambush => {
                if board.token_at(x, y).is_none() {
                    return Vec::new();
                }
                self.rays(x, y, board, Self::ambush)
            }
            CardVariant::Sprint | CardVariant::SprintWood => self.rays(x, y, board, Self::sprint),
            CardVariant::Empty | CardVariant::Wall | CardVariant::Trap => Vec::new(),
        }
    }

    fn move_to(&self, from: (i8, i8), to: (i8, i8), board: &Board) -> Move {
        Move::new(*self, from, to, board.tile(to.0, to.1))
    }

    fn placements<R: Rng + ?Sized>(
        &self,
        x: i8,
        y: i8,
        board: &Board,
        player: usize,
        rng: &mut R,
    ) -> Vec<Move> {
        let occupied: Vec<CardVariant> = board
            .occupied_tiles(player)
            .into_iter()
            .map(|c| c.variant)
            .collect();

        let mut moves = Vec::new();
        for i in 0..board.width() {
            for j in 0..board.height() {
                if board.is_walkable(i, j, true) && !occupied.contains(&board.tile(i, j).variant) {
                    moves.push(self.move_to((x, y), (i, j), board));
                }
            }
        }

        if !board.player(player).automated {
            return moves;
        }

        // Keep the branching factor of the lookahead in check
        let mut by_type: BTreeMap<CardVariant, Vec<Move>> = BTreeMap::new();
        for mv in moves {
            if mv.destination.variant != CardVariant::Trap {
                by_type.entry(mv.destination.variant).or_default().push(mv);
            }
        }
        let mut pruned = Vec::new();
        for (_, mut group) in by_type {
            group.shuffle(rng);
            pruned.extend(group.into_iter().take(PLACEMENTS_PER_TILE_TYPE));
        }
        pruned
    }

    /// Follows every cached walk pattern with `steps` steps. Every tile on the
    /// way must be walkable and free of tokens.
    fn walk(&self, x: i8, y: i8, steps: usize, allow_diagonal: bool, board: &Board) -> Vec<Move> {
        let path_sum = self.variant.uses_path_sum();
        let mut moves = Vec::new();
        'patterns: for pattern in walk_patterns(steps, allow_diagonal) {
            let (mut cx, mut cy) = (x, y);
            let mut stealth = (OFF_BOARD, OFF_BOARD);
            let mut total = 0;
            for step in pattern {
                cx += step.dx;
                cy += step.dy;
                if path_sum && stealth.0 == OFF_BOARD {
                    stealth = (cx, cy);
                }
                if !board.is_walkable(cx, cy, true) {
                    continue 'patterns;
                }
                total += board.tile(cx, cy).score_value;
            }
            let mut mv = self.move_to((x, y), (cx, cy), board);
            if path_sum {
                mv.stealth_x = stealth.0;
                mv.stealth_y = stealth.1;
                mv.score_value = total;
            }
            moves.push(mv);
        }
        dedup(moves)
    }

    /// Casts one ray per cardinal direction and collects the moves found.
    fn rays(
        &self,
        x: i8,
        y: i8,
        board: &Board,
        ray: fn(&Self, i8, i8, (i8, i8), &Board) -> Option<Move>,
    ) -> Vec<Move> {
        CARDINAL_DIRECTIONS
            .into_iter()
            .filter_map(|dir| ray(self, x, y, dir, board))
            .collect()
    }

    // Lands on the first non-empty tile, if at least one empty tile was jumped.
    fn leap(&self, x: i8, y: i8, (dx, dy): (i8, i8), board: &Board) -> Option<Move> {
        let (mut cx, mut cy) = (x, y);
        let mut gap = 0;
        for _ in 0..MAX_RAY_STEPS {
            cx += dx;
            cy += dy;
            let card = board.get(cx, cy)?;
            if !card.is_empty() {
                return (gap > 0 && board.is_walkable(cx, cy, true))
                    .then(|| self.move_to((x, y), (cx, cy), board));
            }
            gap += 1;
        }
        None
    }

    // Slides to the farthest free tile.
    fn sprint(&self, x: i8, y: i8, (dx, dy): (i8, i8), board: &Board) -> Option<Move> {
        let (mut cx, mut cy) = (x, y);
        let mut last_good = None;
        for _ in 0..MAX_RAY_STEPS {
            cx += dx;
            cy += dy;
            if !board.is_walkable(cx, cy, true) {
                break;
            }
            last_good = Some((cx, cy));
        }
        last_good.map(|to| self.move_to((x, y), to, board))
    }

    // Finds an enemy token in line that can be pushed one tile further.
    fn ambush(&self, x: i8, y: i8, (dx, dy): (i8, i8), board: &Board) -> Option<Move> {
        let me = board.token_at(x, y)?.owner;
        let (mut cx, mut cy) = (x, y);
        for _ in 0..MAX_RAY_STEPS {
            cx += dx;
            cy += dy;
            if !board.is_walkable(cx, cy, false) {
                break;
            }
            if let Some(enemy) = board.token_at(cx, cy) {
                if enemy.owner == me {
                    break;
                }
                if board.is_walkable(cx + dx, cy + dy, true) {
                    return Some(self.move_to((x, y), (cx, cy), board));
                }
            }
        }
        None
    }
}

// Plays the last non-shadow card, paying with a shadow.
fn mimic<R: Rng + ?Sized>(x: i8, y: i8, board: &Board, player: usize, rng: &mut R) -> Vec<Move> {
    let mimicked = board.last_non_mimic_card();
    match mimicked.variant {
        // A placement can't be imitated: the shadow is played with a placed token
        CardVariant::Shadow | CardVariant::PlaceMeeple => Vec::new(),
        _ => {
            let mut moves = mimicked.possible_moves(x, y, board, player, rng);
            for mv in moves.iter_mut() {
                mv.is_mimic = true;
            }
            moves
        }
    }
}

/// Removes duplicate moves, keeping the first occurrence.
fn dedup(mut moves: Vec<Move>) -> Vec<Move> {
    let mut seen = HashSet::new();
    moves.retain(|mv| seen.insert(mv.key()));
    moves
}
