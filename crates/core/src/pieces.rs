//! Pieces module - the piece catalog and 90° rotation transforms
//!
//! A shape is a small boolean volume indexed `[ly][lz][lx]`. Local layer
//! `ly = 0` is the top of the bounding box; larger `ly` sits lower in the field.
//! Catalog shapes are never mutated: every working piece is a copy, and a
//! rotation produces a new shape.

use arrayvec::ArrayVec;

use crate::types::{Axis, PieceKind};

/// Largest bounding volume a shape may have (4×4×4).
pub const MAX_SHAPE_VOLUME: usize = 64;

/// Local cell coordinate `(ly, lz, lx)`
pub type LocalCell = (usize, usize, usize);

/// Boolean piece volume with its bounding dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    height: usize,
    depth: usize,
    width: usize,
    cells: ArrayVec<bool, MAX_SHAPE_VOLUME>,
}

impl Shape {
    /// Build a shape from `height × depth × width` bits (nonzero = occupied).
    ///
    /// Returns `None` when the bit count does not match the dimensions or the
    /// volume exceeds [`MAX_SHAPE_VOLUME`].
    pub fn new(height: usize, depth: usize, width: usize, bits: &[u8]) -> Option<Self> {
        let volume = height * depth * width;
        if volume > MAX_SHAPE_VOLUME || bits.len() != volume {
            return None;
        }
        Some(Self {
            height,
            depth,
            width,
            cells: bits.iter().map(|&b| b != 0).collect(),
        })
    }

    fn empty(height: usize, depth: usize, width: usize) -> Self {
        let volume = (height * depth * width).min(MAX_SHAPE_VOLUME);
        Self {
            height,
            depth,
            width,
            cells: std::iter::repeat(false).take(volume).collect(),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    fn index(&self, ly: usize, lz: usize, lx: usize) -> usize {
        ly * self.depth * self.width + lz * self.width + lx
    }

    /// Occupancy of a local cell; out-of-box cells are empty.
    pub fn get(&self, ly: usize, lz: usize, lx: usize) -> bool {
        if ly >= self.height || lz >= self.depth || lx >= self.width {
            return false;
        }
        self.cells
            .get(self.index(ly, lz, lx))
            .copied()
            .unwrap_or(false)
    }

    fn set(&mut self, ly: usize, lz: usize, lx: usize) {
        let idx = self.index(ly, lz, lx);
        if let Some(cell) = self.cells.get_mut(idx) {
            *cell = true;
        }
    }

    /// Occupied local cells in `(ly, lz, lx)` scan order.
    pub fn cells(&self) -> impl Iterator<Item = LocalCell> + '_ {
        let (depth, width) = (self.depth, self.width);
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(move |(i, _)| (i / (depth * width), (i / width) % depth, i % width))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// A shape with no occupied cells (or a zero dimension) cannot be placed.
    pub fn is_degenerate(&self) -> bool {
        self.height == 0
            || self.depth == 0
            || self.width == 0
            || self.cells.len() != self.height * self.depth * self.width
            || self.cell_count() == 0
    }

    /// One 90° turn about `axis`.
    ///
    /// - `Y`: `(ly, lz, lx) → (ly, lx, depth-1-lz)`, dims `(h, w, d)`
    /// - `X`: `(ly, lz, lx) → (lz, height-1-ly, lx)`, dims `(d, h, w)`
    /// - `Z`: `(ly, lz, lx) → (lx, lz, height-1-ly)`, dims `(w, d, h)`
    pub fn rotate(&self, axis: Axis) -> Shape {
        let (h, d, w) = (self.height, self.depth, self.width);
        let mut out = match axis {
            Axis::Y => Shape::empty(h, w, d),
            Axis::X => Shape::empty(d, h, w),
            Axis::Z => Shape::empty(w, d, h),
        };
        for (ly, lz, lx) in self.cells() {
            match axis {
                Axis::Y => out.set(ly, lx, d - 1 - lz),
                Axis::X => out.set(lz, h - 1 - ly, lx),
                Axis::Z => out.set(lx, lz, h - 1 - ly),
            }
        }
        out
    }

    /// Rotate by a signed quarter-turn count; −1 is the same as 3.
    pub fn rotated(&self, axis: Axis, quarter_turns: i8) -> Shape {
        let turns = effective_turns(quarter_turns);
        let mut shape = self.clone();
        for _ in 0..turns {
            shape = shape.rotate(axis);
        }
        shape
    }
}

/// Normalize a signed quarter-turn count into `0..4`.
pub fn effective_turns(quarter_turns: i8) -> u8 {
    (quarter_turns as i32).rem_euclid(4) as u8
}

/// Catalog entry: dimensions `(height, depth, width)` and bits.
struct Template {
    dims: (usize, usize, usize),
    bits: &'static [u8],
}

const CATALOG: [Template; PieceKind::COUNT] = [
    // I: four in a row
    Template {
        dims: (1, 1, 4),
        bits: &[1, 1, 1, 1],
    },
    // O: 2×2×2 cube
    Template {
        dims: (2, 2, 2),
        bits: &[1, 1, 1, 1, 1, 1, 1, 1],
    },
    // T
    Template {
        dims: (1, 2, 3),
        bits: &[0, 1, 0, 1, 1, 1],
    },
    // L
    Template {
        dims: (1, 2, 3),
        bits: &[1, 0, 0, 1, 1, 1],
    },
    // J
    Template {
        dims: (1, 2, 3),
        bits: &[0, 0, 1, 1, 1, 1],
    },
    // S
    Template {
        dims: (1, 2, 3),
        bits: &[0, 1, 1, 1, 1, 0],
    },
    // Z
    Template {
        dims: (1, 2, 3),
        bits: &[1, 1, 0, 0, 1, 1],
    },
    // V: two-tall single column
    Template {
        dims: (2, 1, 1),
        bits: &[1, 1],
    },
];

/// Fresh copy of the canonical shape for `kind`.
pub fn catalog_shape(kind: PieceKind) -> Shape {
    let template = &CATALOG[kind.index()];
    let (height, depth, width) = template.dims;
    Shape {
        height,
        depth,
        width,
        cells: template
            .bits
            .iter()
            .take(MAX_SHAPE_VOLUME)
            .map(|&b| b != 0)
            .collect(),
    }
}
