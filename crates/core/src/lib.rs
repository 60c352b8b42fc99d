//! Core game logic - pure, deterministic, and testable
//!
//! Game rules, grid state and the session that drives them. Nothing here
//! touches the terminal or the clock: callers feed commands and gravity ticks
//! and read back a [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`board`]: the cell grid with margin rows and full-row clearing
//! - [`collision`]: the placement predicate every command consults
//! - [`config`]: engine configuration from defaults, env or JSON
//! - [`game_state`]: the session (falling piece, bags, drops, top-out)
//! - [`pieces`]: shape offset tables and colors
//! - [`rng`]: seeded 7-bag randomizer with one bag of lookahead
//! - [`snapshot`]: read-only view for renderers and logs
//! - [`srs`]: Super Rotation System kick tables
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // The dropped piece is locked and a new one is falling.
//! assert!(game.board().cells().iter().any(|c| c.placed));
//! assert_eq!(game.piece_id(), 2);
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;
pub mod srs;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoundsError, Cell};
pub use collision::can_place;
pub use config::{ConfigError, EngineConfig, Palette};
pub use game_state::{GameState, Piece};
pub use pieces::{absolute_cells, color_of, get_shape};
pub use rng::{BagRandomizer, SimpleRng};
pub use snapshot::{ActiveSnapshot, CellSnapshot, GameSnapshot};
pub use srs::{try_rotate, RotationResult};
