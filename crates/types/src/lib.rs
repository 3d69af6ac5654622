//! Shared types and constants for the 3D falling-block engine.
//!
//! Everything here is plain data with no dependencies, so the core engine,
//! the terminal renderer and the input mapping can all agree on one vocabulary.
//!
//! # Field Dimensions
//!
//! The default playfield is a 5 × 12 × 5 volume (width × height × depth):
//!
//! - **x**: column, `0..FIELD_WIDTH`, left to right
//! - **y**: layer, `0..FIELD_HEIGHT`, bottom to top (layer 0 is the floor)
//! - **z**: depth slice, `0..FIELD_DEPTH`, front to back
//!
//! Pieces spawn with their anchor on the top layer (`y = FIELD_HEIGHT - 1`).
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame interval (~60 FPS) |
//! | `BASE_DROP_MS` | 800 | Gravity interval at level 1 |
//! | `DROP_SPEED_STEP_MS` | 50 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity interval floor |
//!
//! # Examples
//!
//! ```
//! use cubetris_types::{Axis, PieceKind, Position, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! assert_eq!(PieceKind::from_index(1), Some(PieceKind::O));
//! assert_eq!(PieceKind::O.index(), 1);
//! assert_eq!(Axis::ALL.len(), 3);
//!
//! let p = Position::new(1, FIELD_HEIGHT as i32 - 1, 2);
//! assert_eq!(p.below().y, FIELD_HEIGHT as i32 - 2);
//! assert_eq!(FIELD_WIDTH, 5);
//! ```

/// Field width in cells (x axis)
pub const FIELD_WIDTH: usize = 5;

/// Field height in layers (y axis)
pub const FIELD_HEIGHT: usize = 12;

/// Field depth in cells (z axis)
pub const FIELD_DEPTH: usize = 5;

/// Upper bound for any configured field dimension.
pub const MAX_FIELD_DIM: usize = 32;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 800;

/// Gravity interval reduction per level above 1
pub const DROP_SPEED_STEP_MS: u32 = 50;

/// Gravity interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Layers to clear per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points for clearing N layers in one sweep (index = layer count).
///
/// Counts above 6 score the same as 6. Multiplied by the current level.
pub const LINE_SCORES: [u32; 7] = [0, 100, 300, 500, 800, 1200, 1600];

/// Perfect-clear bonus keyed by `min(cleared, 4)`.
pub const PERFECT_CLEAR_BONUS: [u32; 5] = [0, 800, 1000, 1800, 2000];

/// REN (combo) bonus per consecutive clearing sweep.
pub const REN_BONUS_STEP: u32 = 50;

/// Cap on the REN bonus.
pub const REN_BONUS_CAP: u32 = 1000;

/// Clears of at least this many layers count toward back-to-back.
pub const SPECIAL_CLEAR_LINES: u32 = 4;

/// Back-to-back multiplier numerator (3/2 = 1.5x)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back multiplier denominator
pub const B2B_DENOMINATOR: u32 = 2;

/// The eight catalog pieces.
///
/// Seven are the flat tetromino analogues lying in the x–z plane (plus the
/// 2×2×2 cube for `O`); `V` is the 3D-only two-tall single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
    V,
}

impl PieceKind {
    /// Catalog order. `index()` and `from_index()` follow it.
    pub const ALL: [PieceKind; 8] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::V,
    ];

    /// Number of catalog entries
    pub const COUNT: usize = 8;

    /// Position of this kind in the catalog
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::L => 3,
            PieceKind::J => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
            PieceKind::V => 7,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::L => "L",
            PieceKind::J => "J",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::V => "V",
        }
    }
}

/// Rotation axis for the 90° shape transform.
///
/// - **X**: rotates in the y–z plane (column count unchanged)
/// - **Y**: rotates in the x–z plane (height unchanged)
/// - **Z**: rotates in the x–y plane (depth unchanged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

/// Grid coordinate of a piece anchor.
///
/// The anchor is the top of the piece's bounding box: local layer `ly` of a
/// shape sits at `y - ly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Same anchor one layer lower.
    pub const fn below(self) -> Self {
        Self {
            y: self.y - 1,
            ..self
        }
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

/// Lifecycle phase of a session.
///
/// `Waiting` → `Playing` on start, `Playing` → `GameOver` when a spawn is
/// blocked, any phase → `Waiting` on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Waiting,
    Playing,
    GameOver,
}

/// Discrete commands accepted by the engine.
///
/// Movement, rotation and drops are ignored outside `Phase::Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Reset and begin a new game
    Start,
    /// Abandon the session and return to `Waiting`
    Reset,
    /// Shift the piece along x by the given step (−1 or +1)
    MoveX(i8),
    /// Shift the piece along z by the given step (−1 or +1)
    MoveZ(i8),
    /// Rotate about an axis by a signed number of quarter turns
    Rotate(Axis, i8),
    /// Lower the piece one layer, locking it if blocked
    SoftDrop,
    /// Drop the piece to its resting layer and lock it
    HardDrop,
}

/// Summary of one lock-merge-sweep sequence.
///
/// Produced by the engine on every lock and drained by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    /// Piece cells written to the grid (cells above the ceiling are dropped)
    pub cells_merged: u32,
    /// Layers removed by the sweep
    pub cleared: u32,
    /// Points awarded for the sweep
    pub score_gained: u32,
    /// REN count after the sweep
    pub ren: u32,
    /// Whether the back-to-back multiplier applied
    pub back_to_back: bool,
    /// Whether the grid was empty after the sweep
    pub perfect_clear: bool,
}
