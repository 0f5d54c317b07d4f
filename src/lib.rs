//! Reversi-Rust: a Reversi/Othello engine with obstacle cells and
//! arbitrary rectangular boards.
//!
//! The core engine tracks placement candidates incrementally, detects
//! captures in all eight directions, applies the pass rule, and ends
//! the game when neither side can move. Around it sit thin layers for
//! console rendering, a line-based two-player network relay, and the
//! CLI binary.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry and CLI parameters
//! - [`board`] - Colors, cells, and the rectangular grid
//! - [`game`] - Core game logic (legal moves, captures, turn control)
//! - [`console`] - Text rendering of the game state
//! - [`relay`] - Line-based network protocol between two players
//!
//! ## Example
//!
//! ```
//! use reversi_rust::game::{Game, PlayOutcome};
//!
//! // A standard 8x8 game without obstacles; Dark moves first.
//! let mut game = Game::new(8, 8, 0).unwrap();
//! assert_eq!(game.available_moves().len(), 4);
//!
//! let mv = game.available_moves().iter().next().copied().unwrap();
//! assert_eq!(game.play(mv).unwrap(), PlayOutcome::InProgress);
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod game;
pub mod relay;
