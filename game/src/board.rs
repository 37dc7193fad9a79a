//! Grid geometry for the play field.

use rand::Rng;

/// A single grid cell, addressed by column and row.
///
/// Coordinates are signed so that a head stepping off the left or top edge
/// lands on a representable (and out-of-bounds) cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The fixed-size board, measured in cells.
#[derive(Debug, Clone, Copy)]
pub struct Board {
    width: i32,
    height: i32,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// The snake's spawn cell.
    pub fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    /// Samples a cell uniformly over the whole board.
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    /// Iterates every cell on the board, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}
