//! Core game logic - pure, deterministic, and testable
//!
//! Everything needed to play a session of the 3D falling-block game, with no
//! dependency on terminals or clocks. The host feeds [`Command`]s and clock
//! readings in and reads [`GameSnapshot`]s out.
//!
//! # Module Structure
//!
//! - [`grid`]: 5x12x5 occupancy volume, layer removal and the sweep
//! - [`pieces`]: the eight-piece catalog and quarter-turn rotation about X, Y and Z
//! - [`collision`]: collide, merge and ghost (landing) queries
//! - [`scoring`]: layer points, REN, perfect clear and back-to-back
//! - [`scheduler`]: level-dependent gravity timer
//! - [`rng`]: injectable piece source
//! - [`config`]: field size and drop timing, validated up front
//! - [`game_state`]: the `Waiting → Playing → GameOver` machine tying it together
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use cubetris_core::GameState;
//! use cubetris_types::{Axis, Command, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.phase(), Phase::Playing);
//!
//! game.apply_command(Command::MoveX(1));
//! game.apply_command(Command::Rotate(Axis::Y, 1));
//! game.apply_command(Command::HardDrop);
//!
//! // The dropped piece locked and a new one took its place.
//! assert_eq!(game.piece_id(), 2);
//! assert!(!game.grid().is_empty());
//! ```
//!
//! # Timing
//!
//! Gravity fires when strictly more than
//! `max(100, 800 - (level - 1) * 50)` ms passed since the previous step.
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with a
//! monotonic millisecond reading.

pub mod collision;
pub mod config;
pub mod game_state;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod snapshot;

pub use cubetris_types as types;

pub use collision::{collide, ghost_position, merge};
pub use config::{ConfigError, GameConfig};
pub use game_state::{ActivePiece, GameState, NextPiece};
pub use grid::Grid;
pub use pieces::{catalog_shape, Shape};
pub use rng::{PieceSource, SequenceSource, SimpleRng};
pub use scheduler::DropScheduler;
pub use scoring::{ScoreResult, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
pub use types::Command;
