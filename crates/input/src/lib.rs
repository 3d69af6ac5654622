//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. Independent of
//! any rendering; the host decides what to do with the commands.

pub mod map;

pub use cubetris_types as types;

pub use map::{handle_key_event, should_quit};
