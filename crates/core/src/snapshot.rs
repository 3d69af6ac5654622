//! Read-only view of a session for renderers and observers.

use crate::config::GameConfig;
use crate::pieces::Shape;
use crate::types::{Phase, PieceKind, Position};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub position: Position,
}

impl ActiveSnapshot {
    /// Absolute `(x, y, z)` of every cell, including any above the ceiling.
    pub fn cells_at(&self, anchor: Position) -> impl Iterator<Item = (i32, i32, i32)> + '_ {
        self.shape.cells().map(move |(ly, lz, lx)| {
            (
                anchor.x + lx as i32,
                anchor.y - ly as i32,
                anchor.z + lz as i32,
            )
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, i32)> + '_ {
        self.cells_at(self.position)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    /// Occupancy in `y * depth * width + z * width + x` order, 1 = occupied.
    pub grid: Vec<u8>,
    pub active: Option<ActiveSnapshot>,
    pub ghost: Option<Position>,
    pub next: Option<NextSnapshot>,
    pub phase: Phase,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub ren: u32,
    pub back_to_back: bool,
}

impl GameSnapshot {
    /// Empty snapshot for a field of the given configuration.
    pub fn for_config(config: &GameConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            depth: config.depth,
            grid: vec![0; config.width * config.height * config.depth],
            active: None,
            ghost: None,
            next: None,
            phase: Phase::Waiting,
            piece_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            ren: 0,
            back_to_back: false,
        }
    }

    /// Occupancy of a locked cell; false outside the field.
    pub fn cell(&self, x: i32, y: i32, z: i32) -> bool {
        if x < 0 || y < 0 || z < 0 {
            return false;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        if x >= self.width || y >= self.height || z >= self.depth {
            return false;
        }
        self.grid
            .get(y * self.depth * self.width + z * self.width + x)
            .is_some_and(|&v| v != 0)
    }

    pub fn playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Whether the ghost sits below the active piece (worth drawing).
    pub fn ghost_visible(&self) -> bool {
        match (&self.active, self.ghost) {
            (Some(active), Some(ghost)) => ghost.y != active.position.y,
            _ => false,
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self::for_config(&GameConfig::default())
    }
}
