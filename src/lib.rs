//! Cubetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration
//! tests and benches can write `cubetris::core::GameState` and friends.

pub mod logger;

pub use cubetris_core as core;
pub use cubetris_input as input;
pub use cubetris_term as term;
pub use cubetris_types as types;
