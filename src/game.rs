//! Core game engine: board setup, legal-move tracking, capture
//! execution, and turn control.
//!
//! The engine is single-threaded and synchronous. Every operation runs
//! to completion before returning, and a failed [`Game::play`] never
//! partially mutates the board, the score, or the candidate sets: the
//! only mutation path is a move that already passed the availability
//! check.
//!
//! Two candidate sets drive move generation:
//!
//! - `border_moves` - empty cells 8-adjacent to at least one occupied
//!   cell, maintained incrementally (seeded at setup, updated after
//!   each placement, never rebuilt by a full board scan).
//! - `available_moves` - the legal subset of `border_moves` for the
//!   side to move, recomputed in full once per turn.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use thiserror::Error;

use crate::board::{Board, Cell, Color, Point};
use crate::constants::{DIRECTIONS, SMALL_LAYOUT_MAX};

/// A game could not be constructed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// Both dimensions must be at least 2 and a 2x2 board is rejected.
    #[error("board {width}x{height} is too small")]
    BoardTooSmall { width: i32, height: i32 },

    /// More obstacles requested than cells away from the opening area.
    #[error("{requested} obstacles requested but only {free} cells are free for them")]
    InsufficientSpace { requested: usize, free: usize },
}

/// A move was rejected. The game state is unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The coordinate is outside the board.
    #[error("({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    /// The cell is occupied, an obstacle, or captures nothing.
    #[error("({x}, {y}) is not a legal move")]
    IllegalMove { x: i32, y: i32 },

    /// No moves are accepted once the game has finished.
    #[error("the game is already over")]
    GameAlreadyOver,
}

/// Chip counts per color.
///
/// Invariant: `dark + light` equals the number of occupied cells;
/// obstacles are never counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub dark: u32,
    pub light: u32,
}

impl Score {
    pub fn of(self, color: Color) -> u32 {
        match color {
            Color::Dark => self.dark,
            Color::Light => self.light,
        }
    }

    fn gain(&mut self, color: Color) {
        match color {
            Color::Dark => self.dark += 1,
            Color::Light => self.light += 1,
        }
    }

    /// Move one chip's worth of score to `to` after a flip.
    fn transfer(&mut self, to: Color) {
        match to {
            Color::Dark => {
                self.dark += 1;
                self.light -= 1;
            }
            Color::Light => {
                self.light += 1;
                self.dark -= 1;
            }
        }
    }
}

/// Final standing of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub score: Score,
    /// `None` on equal scores.
    pub winner: Option<Color>,
}

/// What an accepted move led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    InProgress,
    /// Neither side has a legal move left. Normal termination, not an
    /// error; no further moves are accepted.
    GameOver(GameResult),
}

/// A running or finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    score: Score,
    border_moves: BTreeSet<Point>,
    available_moves: BTreeSet<Point>,
    to_move: Color,
    running: bool,
    obstacle_count: usize,
}

impl Game {
    /// Set up a game with randomly placed obstacles.
    pub fn new(width: i32, height: i32, obstacle_count: usize) -> Result<Self, SetupError> {
        Self::with_rng(width, height, obstacle_count, &mut fastrand::Rng::new())
    }

    /// Set up a game using the caller's random source, so obstacle
    /// placement can be made reproducible with a seeded RNG.
    pub fn with_rng(
        width: i32,
        height: i32,
        obstacle_count: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<Self, SetupError> {
        if width < 2 || height < 2 || width + height == 4 {
            return Err(SetupError::BoardTooSmall { width, height });
        }
        let mut game = Game {
            board: Board::new(width, height),
            score: Score { dark: 2, light: 2 },
            border_moves: BTreeSet::new(),
            available_moves: BTreeSet::new(),
            to_move: Color::Dark,
            running: true,
            obstacle_count,
        };
        game.place_opening();
        game.seed_border_moves();
        game.place_obstacles(rng)?;
        game.refresh_available_moves();
        Ok(game)
    }

    /// Place the four starting chips around the board center.
    ///
    /// The color assignment depends on board size: both dimensions
    /// above [`SMALL_LAYOUT_MAX`] put each color on one row of the
    /// central block, anything smaller assigns colors diagonally. Both
    /// layouts occupy the same four cells and start 2/2.
    fn place_opening(&mut self) {
        let x = self.board.width() / 2 - 1;
        let y = self.board.height() / 2 - 1;
        if self.board.width() <= SMALL_LAYOUT_MAX || self.board.height() <= SMALL_LAYOUT_MAX {
            self.board.set((x, y), Cell::Chip(Color::Light));
            self.board.set((x + 1, y + 1), Cell::Chip(Color::Light));
            self.board.set((x + 1, y), Cell::Chip(Color::Dark));
            self.board.set((x, y + 1), Cell::Chip(Color::Dark));
        } else {
            self.board.set((x, y), Cell::Chip(Color::Light));
            self.board.set((x + 1, y), Cell::Chip(Color::Light));
            self.board.set((x, y + 1), Cell::Chip(Color::Dark));
            self.board.set((x + 1, y + 1), Cell::Chip(Color::Dark));
        }
    }

    /// Seed the border set: every empty in-bounds cell of the 4x4 block
    /// around the starting chips.
    fn seed_border_moves(&mut self) {
        let x0 = self.board.width() / 2 - 2;
        let y0 = self.board.height() / 2 - 2;
        for dx in 0..4 {
            for dy in 0..4 {
                let p = (x0 + dx, y0 + dy);
                if self.board.get(p) == Some(Cell::Empty) {
                    self.border_moves.insert(p);
                }
            }
        }
    }

    /// One-time obstacle placement, before the first legality pass.
    ///
    /// Candidates are all cells except the initial border moves and the
    /// central 2x2 starting block. The candidate list is built in a
    /// fixed order so a seeded RNG reproduces the exact placement.
    fn place_obstacles(&mut self, rng: &mut fastrand::Rng) -> Result<(), SetupError> {
        if self.obstacle_count == 0 {
            return Ok(());
        }
        let cx = self.board.width() / 2 - 1;
        let cy = self.board.height() / 2 - 1;
        let mut candidates: Vec<Point> = Vec::new();
        for x in 0..self.board.width() {
            for y in 0..self.board.height() {
                let central = (cx..=cx + 1).contains(&x) && (cy..=cy + 1).contains(&y);
                if !central && !self.border_moves.contains(&(x, y)) {
                    candidates.push((x, y));
                }
            }
        }
        if candidates.len() < self.obstacle_count {
            return Err(SetupError::InsufficientSpace {
                requested: self.obstacle_count,
                free: candidates.len(),
            });
        }
        rng.shuffle(&mut candidates);
        for &p in &candidates[..self.obstacle_count] {
            self.board.set(p, Cell::Obstacle);
            self.border_moves.remove(&p);
        }
        Ok(())
    }

    /// Whether placing a `side` chip at `pos` captures at least one
    /// opposing line.
    pub fn is_legal(&self, pos: Point, side: Color) -> Result<bool, MoveError> {
        if !self.board.contains(pos) {
            return Err(MoveError::OutOfBounds { x: pos.0, y: pos.1 });
        }
        Ok(DIRECTIONS
            .iter()
            .any(|&dir| self.direction_captures(pos, dir, side)))
    }

    /// Walk from `pos` along one direction: a run of opposing chips
    /// terminated by an own-color chip makes the direction capturing.
    /// Any other terminator (edge, empty cell, obstacle) does not.
    fn direction_captures(&self, pos: Point, (dx, dy): (i32, i32), side: Color) -> bool {
        let enemy = side.opposite();
        let (mut x, mut y) = (pos.0 + dx, pos.1 + dy);
        let mut enemy_seen = false;
        while self.board.get((x, y)) == Some(Cell::Chip(enemy)) {
            enemy_seen = true;
            x += dx;
            y += dy;
        }
        enemy_seen && self.board.get((x, y)) == Some(Cell::Chip(side))
    }

    /// Flip the opposing run along a direction already confirmed
    /// capturing, transferring one score point per flipped chip.
    fn flip_run(&mut self, pos: Point, (dx, dy): (i32, i32), side: Color) {
        let enemy = side.opposite();
        let (mut x, mut y) = (pos.0 + dx, pos.1 + dy);
        while self.board.get((x, y)) == Some(Cell::Chip(enemy)) {
            self.board.set((x, y), Cell::Chip(side));
            self.score.transfer(side);
            x += dx;
            y += dy;
        }
    }

    /// Play the current side's chip at `pos`.
    ///
    /// On success the capture is executed in every capturing direction,
    /// the candidate sets are updated, and the turn advances (including
    /// the pass rule). Errors leave the game untouched.
    pub fn play(&mut self, pos: Point) -> Result<PlayOutcome, MoveError> {
        if !self.running {
            return Err(MoveError::GameAlreadyOver);
        }
        if !self.available_moves.contains(&pos) {
            return Err(MoveError::IllegalMove { x: pos.0, y: pos.1 });
        }
        let side = self.to_move;
        self.board.set(pos, Cell::Chip(side));
        self.score.gain(side);
        for &dir in &DIRECTIONS {
            // Confirm the full line first; no flip happens on a
            // non-capturing direction.
            if self.direction_captures(pos, dir, side) {
                self.flip_run(pos, dir, side);
            }
        }
        self.track_placement(pos);
        Ok(self.advance_turn())
    }

    /// Incremental border-set update for a placement: the cell itself
    /// leaves the set, its empty in-bounds neighbors join it. Obstacles
    /// are never `Empty`, so they are skipped by the same check.
    fn track_placement(&mut self, (x, y): Point) {
        self.border_moves.remove(&(x, y));
        for &(dx, dy) in &DIRECTIONS {
            let p = (x + dx, y + dy);
            if self.board.get(p) == Some(Cell::Empty) {
                self.border_moves.insert(p);
            }
        }
    }

    /// Hand the turn over, applying the pass rule: a side with no legal
    /// move forfeits the turn, and the game ends when neither side can
    /// move.
    fn advance_turn(&mut self) -> PlayOutcome {
        self.to_move = self.to_move.opposite();
        self.refresh_available_moves();
        if self.available_moves.is_empty() {
            self.to_move = self.to_move.opposite();
            self.refresh_available_moves();
            if self.available_moves.is_empty() {
                self.running = false;
                return PlayOutcome::GameOver(self.result());
            }
        }
        PlayOutcome::InProgress
    }

    /// Rebuild the available set for the side to move from the border
    /// set. Legality of any border cell can change whenever the board
    /// changes, so this is a full pass over the border cells.
    fn refresh_available_moves(&mut self) {
        let side = self.to_move;
        let available: BTreeSet<Point> = self
            .border_moves
            .iter()
            .copied()
            .filter(|&p| {
                DIRECTIONS
                    .iter()
                    .any(|&dir| self.direction_captures(p, dir, side))
            })
            .collect();
        self.available_moves = available;
    }

    /// Current standing: the side with more chips wins, equal is a draw.
    pub fn result(&self) -> GameResult {
        let winner = match self.score.dark.cmp(&self.score.light) {
            Ordering::Greater => Some(Color::Dark),
            Ordering::Less => Some(Color::Light),
            Ordering::Equal => None,
        };
        GameResult {
            score: self.score,
            winner,
        }
    }

    pub fn width(&self) -> i32 {
        self.board.width()
    }

    pub fn height(&self) -> i32 {
        self.board.height()
    }

    /// Cell contents at a coordinate.
    pub fn cell(&self, pos: Point) -> Result<Cell, MoveError> {
        self.board.get(pos).ok_or(MoveError::OutOfBounds {
            x: pos.0,
            y: pos.1,
        })
    }

    /// Debug view of the whole board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Legal placements for the side to move this turn.
    pub fn available_moves(&self) -> &BTreeSet<Point> {
        &self.available_moves
    }

    /// Empty cells adjacent to at least one occupied cell.
    pub fn border_moves(&self) -> &BTreeSet<Point> {
        &self.border_moves
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Obstacle count the game was set up with, kept for rematches.
    pub fn obstacle_count(&self) -> usize {
        self.obstacle_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_opening_layout() {
        let game = Game::new(8, 8, 0).unwrap();
        assert_eq!(game.cell((3, 3)).unwrap(), Cell::Chip(Color::Light));
        assert_eq!(game.cell((4, 4)).unwrap(), Cell::Chip(Color::Light));
        assert_eq!(game.cell((4, 3)).unwrap(), Cell::Chip(Color::Dark));
        assert_eq!(game.cell((3, 4)).unwrap(), Cell::Chip(Color::Dark));
        assert_eq!(game.score(), Score { dark: 2, light: 2 });
        assert_eq!(game.to_move(), Color::Dark);
    }

    #[test]
    fn test_large_opening_layout() {
        let game = Game::new(10, 10, 0).unwrap();
        assert_eq!(game.cell((4, 4)).unwrap(), Cell::Chip(Color::Light));
        assert_eq!(game.cell((5, 4)).unwrap(), Cell::Chip(Color::Light));
        assert_eq!(game.cell((4, 5)).unwrap(), Cell::Chip(Color::Dark));
        assert_eq!(game.cell((5, 5)).unwrap(), Cell::Chip(Color::Dark));
    }

    #[test]
    fn test_rejects_tiny_boards() {
        assert_eq!(
            Game::new(2, 2, 0),
            Err(SetupError::BoardTooSmall {
                width: 2,
                height: 2
            })
        );
        assert!(Game::new(1, 8, 0).is_err());
        assert!(Game::new(9, 1, 0).is_err());
    }

    #[test]
    fn test_first_capture() {
        let mut game = Game::new(8, 8, 0).unwrap();
        assert_eq!(game.available_moves().len(), 4);
        assert_eq!(game.play((3, 2)).unwrap(), PlayOutcome::InProgress);
        assert_eq!(game.cell((3, 3)).unwrap(), Cell::Chip(Color::Dark));
        assert_eq!(game.score(), Score { dark: 4, light: 1 });
        assert_eq!(game.to_move(), Color::Light);
    }

    #[test]
    fn test_is_legal_out_of_bounds() {
        let game = Game::new(8, 8, 0).unwrap();
        assert_eq!(
            game.is_legal((8, 0), Color::Dark),
            Err(MoveError::OutOfBounds { x: 8, y: 0 })
        );
        assert_eq!(
            game.is_legal((0, -1), Color::Dark),
            Err(MoveError::OutOfBounds { x: 0, y: -1 })
        );
    }

    #[test]
    fn test_illegal_move_changes_nothing() {
        let mut game = Game::new(8, 8, 0).unwrap();
        let snapshot = game.clone();
        assert_eq!(
            game.play((4, 2)),
            Err(MoveError::IllegalMove { x: 4, y: 2 })
        );
        assert_eq!(
            game.play((3, 3)),
            Err(MoveError::IllegalMove { x: 3, y: 3 })
        );
        assert_eq!(game, snapshot);
    }

    #[test]
    fn test_double_pass_ends_game() {
        let mut game = Game::new(3, 2, 0).unwrap();
        assert_eq!(game.play((2, 1)).unwrap(), PlayOutcome::InProgress);
        let outcome = game.play((2, 0)).unwrap();
        let result = GameResult {
            score: Score { dark: 3, light: 3 },
            winner: None,
        };
        assert_eq!(outcome, PlayOutcome::GameOver(result));
        assert!(!game.is_running());
        assert_eq!(game.play((0, 0)), Err(MoveError::GameAlreadyOver));
    }

    #[test]
    fn test_seeded_obstacles_are_reproducible() {
        let a = Game::with_rng(8, 8, 5, &mut fastrand::Rng::with_seed(42)).unwrap();
        let b = Game::with_rng(8, 8, 5, &mut fastrand::Rng::with_seed(42)).unwrap();
        assert_eq!(a, b);
        let obstacles = (0..8)
            .flat_map(|x| (0..8).map(move |y| (x, y)))
            .filter(|&p| a.cell(p).unwrap() == Cell::Obstacle)
            .count();
        assert_eq!(obstacles, 5);
    }

    #[test]
    fn test_too_many_obstacles() {
        // 8x8 leaves 64 - 12 border - 4 starting cells = 48 candidates.
        assert!(Game::new(8, 8, 48).is_ok());
        assert_eq!(
            Game::new(8, 8, 49),
            Err(SetupError::InsufficientSpace {
                requested: 49,
                free: 48
            })
        );
    }
}
