//! Fixed-size 2-D cell arena and Moore neighbourhood geometry
//!
//! The grid is a flat row-major `Vec` of cells addressed by `(x, y)` with
//! `x` increasing eastward and `y` increasing southward. Edges never wrap:
//! neighbour lookups outside the grid return `None` and are simply
//! excluded from a scan.

use crate::terrain::{state_index, TerrainCell};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// The eight Moore-neighbourhood offsets in their canonical scan order.
///
/// The order is load-bearing: transition strategies draw one Bernoulli
/// trial per offset and stop at the first success, so this order is the
/// tie-break that keeps seeded runs reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Compass {
    /// All offsets in canonical scan order: NW, N, NE, W, E, SW, S, SE
    pub const ALL: [Compass; 8] = [
        Compass::NorthWest,
        Compass::North,
        Compass::NorthEast,
        Compass::West,
        Compass::East,
        Compass::SouthWest,
        Compass::South,
        Compass::SouthEast,
    ];

    /// Grid offset `(dx, dy)`; north is negative `dy`
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Compass::NorthWest => (-1, -1),
            Compass::North => (0, -1),
            Compass::NorthEast => (1, -1),
            Compass::West => (-1, 0),
            Compass::East => (1, 0),
            Compass::SouthWest => (-1, 1),
            Compass::South => (0, 1),
            Compass::SouthEast => (1, 1),
        }
    }

    /// Compass bearing (degrees, N = 0, E = 90) of fire travelling from
    /// the neighbour at this offset into the centre cell.
    #[inline]
    pub fn spread_bearing(self) -> f32 {
        match self {
            Compass::NorthWest => 135.0,
            Compass::North => 180.0,
            Compass::NorthEast => 225.0,
            Compass::West => 90.0,
            Compass::East => 270.0,
            Compass::SouthWest => 45.0,
            Compass::South => 0.0,
            Compass::SouthEast => 315.0,
        }
    }

    /// Compass bearing of the direction from the centre cell toward the
    /// neighbour at this offset.
    #[inline]
    pub fn bearing_from_centre(self) -> f32 {
        (self.spread_bearing() + 180.0) % 360.0
    }
}

/// Fixed-size terrain grid. Row-major storage, `(x, y)` addressing,
/// non-wrapping edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<TerrainCell>,
}

impl Grid {
    /// Create a grid filled with clones of a template cell
    pub fn filled(width: usize, height: usize, template: &TerrainCell) -> Self {
        Grid {
            width,
            height,
            cells: vec![template.clone(); width * height],
        }
    }

    /// Build a grid from row-major cells. The cell count must match the
    /// dimensions.
    pub fn from_cells(width: usize, height: usize, cells: Vec<TerrainCell>) -> Self {
        assert_eq!(cells.len(), width * height, "cell count mismatch");
        Grid {
            width,
            height,
            cells,
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    /// Cell at `(x, y)`; panics when out of bounds
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> &TerrainCell {
        &self.cells[self.idx(x, y)]
    }

    /// Mutable cell at `(x, y)`; panics when out of bounds
    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut TerrainCell {
        let idx = self.idx(x, y);
        &mut self.cells[idx]
    }

    /// Neighbour of `(x, y)` in the given direction, or `None` at an edge
    #[inline]
    pub fn neighbour(&self, x: usize, y: usize, direction: Compass) -> Option<&TerrainCell> {
        let (dx, dy) = direction.offset();
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        if nx < 0 || ny < 0 || nx >= self.width as i32 || ny >= self.height as i32 {
            return None;
        }
        Some(self.get(nx as usize, ny as usize))
    }

    /// True when `(x, y)` has all eight neighbours in-grid
    #[inline]
    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        x >= 1 && y >= 1 && x + 1 < self.width && y + 1 < self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total cell count
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major iterator over all cells
    pub fn cells(&self) -> impl Iterator<Item = &TerrainCell> {
        self.cells.iter()
    }

    /// Overwrite a rectangle with clones of a template cell. Ranges are
    /// half-open and clipped to the grid.
    pub fn fill_rect(&mut self, xs: Range<usize>, ys: Range<usize>, template: &TerrainCell) {
        for y in ys.start..ys.end.min(self.height) {
            for x in xs.start..xs.end.min(self.width) {
                *self.get_mut(x, y) = template.clone();
            }
        }
    }

    /// Number of cells currently burning
    pub fn burning_count(&self) -> usize {
        self.cells.iter().filter(|c| c.burning).count()
    }

    /// Row-major state-index snapshot of the whole grid
    pub fn state_indices(&self) -> Vec<u8> {
        self.cells.iter().map(state_index).collect()
    }
}
