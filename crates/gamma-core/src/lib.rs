//! Gamma - a territory-claiming grid game engine
//!
//! This crate provides the core game logic for Gamma, including:
//! - The cell ownership grid and its connectivity scanner
//! - Per-player counters (tiles, areas, golden move token)
//! - Ordinary and golden move validation with exact rollback
//! - The golden move feasibility oracle
//! - Text rendering of the board
//!
//! # Architecture
//!
//! The engine performs no I/O. Front-ends (see the `gamma-cli` crate) own a
//! [`Game`] value and drive it through a small API:
//!
//! ```
//! use gamma_core::Game;
//!
//! let mut game = Game::new(3, 2, 2, 1).unwrap();
//! assert!(game.place(1, 0, 0));
//! assert!(game.place(2, 1, 0));
//! assert!(!game.place(1, 2, 1)); // would open a second area
//! assert!(game.golden(1, 1, 0));
//! assert_eq!(game.render(), "...\n11.\n");
//! ```
//!
//! # Modules
//!
//! - [`board`]: Cell ownership grid and flood-fill area counting
//! - [`player`]: Per-player counters
//! - [`game`]: Move engines and the feasibility oracle
//! - [`render`]: Text formats for the board
//! - [`summary`]: Serializable end-of-game summary

pub mod board;
pub mod game;
pub mod player;
pub mod render;
pub mod summary;

// Re-export commonly used types
pub use board::{Board, PlayerId};
pub use game::{Game, GameError, GoldenMove, MoveError};
pub use player::Player;
pub use render::CellLayout;
pub use summary::GameSummary;
