//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: a [`GameView`] draws a snapshot
//! into a framebuffer, and a [`TerminalRenderer`] flushes framebuffers to the
//! terminal by diffing against the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use cubetris_core as core;
pub use cubetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, restore_terminal, TerminalRenderer};
