//! Grid module - the 3D occupancy volume of locked cells
//!
//! Cells live in a flat buffer indexed `y * depth * width + z * width + x`,
//! so a layer is one contiguous run and sweeping is a block move.
//! Coordinates: x in `0..width` (columns), y in `0..height` (layers, 0 is the
//! floor), z in `0..depth` (depth slices).

use crate::config::GameConfig;

/// Locked-cell volume. Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    depth: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
            cells: vec![false; width * height * depth],
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.width, config.height, config.depth)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline(always)]
    fn layer_len(&self) -> usize {
        self.width * self.depth
    }

    /// Flat index of `(x, y, z)`, or `None` outside the volume.
    #[inline(always)]
    pub fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y, z) {
            return None;
        }
        let (x, y, z) = (x as usize, y as usize, z as usize);
        Some(y * self.layer_len() + z * self.width + x)
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        x < 0
            || y < 0
            || z < 0
            || x as usize >= self.width
            || y as usize >= self.height
            || z as usize >= self.depth
    }

    /// Cell at `(x, y, z)`; `None` outside the volume.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<bool> {
        self.index(x, y, z).map(|idx| self.cells[idx])
    }

    /// Set a cell. Returns false (and writes nothing) outside the volume.
    pub fn set(&mut self, x: i32, y: i32, z: i32, occupied: bool) -> bool {
        match self.index(x, y, z) {
            Some(idx) => {
                self.cells[idx] = occupied;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, x: i32, y: i32, z: i32) -> bool {
        matches!(self.get(x, y, z), Some(true))
    }

    fn layer_range(&self, y: usize) -> std::ops::Range<usize> {
        let start = y * self.layer_len();
        start..start + self.layer_len()
    }

    /// Cells of one layer, z-major.
    pub fn layer(&self, y: usize) -> Option<&[bool]> {
        if y >= self.height {
            return None;
        }
        Some(&self.cells[self.layer_range(y)])
    }

    /// Check if every `(z, x)` cell of a layer is occupied
    pub fn is_layer_full(&self, y: usize) -> bool {
        self.layer(y).is_some_and(|layer| layer.iter().all(|&cell| cell))
    }

    pub fn is_layer_empty(&self, y: usize) -> bool {
        self.layer(y).is_some_and(|layer| layer.iter().all(|&cell| !cell))
    }

    /// Remove layer `y`, shift every layer above it down by one and leave an
    /// empty layer on top.
    pub fn remove_layer(&mut self, y: usize) {
        if y >= self.height {
            return;
        }
        let len = self.layer_len();
        let src = (y + 1) * len;
        self.cells.copy_within(src.., y * len);
        let top = self.layer_range(self.height - 1);
        self.cells[top].fill(false);
    }

    /// Remove every full layer and return how many were removed.
    ///
    /// Scans upward from the floor. After a removal the same index is examined
    /// again because the layer above has moved into it.
    pub fn sweep(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = 0;
        while y < self.height {
            if self.is_layer_full(y) {
                self.remove_layer(y);
                cleared += 1;
            } else {
                y += 1;
            }
        }
        cleared
    }

    /// True when no cell is occupied (perfect clear).
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Flat cell buffer in `index(y, z, x)` order
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Empty every cell, keeping dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Fill an entire layer (test and bench helper).
    pub fn fill_layer(&mut self, y: usize) {
        if y < self.height {
            let range = self.layer_range(y);
            self.cells[range].fill(true);
        }
    }

    /// Copy occupancy into a reusable `u8` buffer (1 = occupied).
    pub fn write_u8_volume(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|&cell| cell as u8));
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}
