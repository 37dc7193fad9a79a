//! Static obstacle layout, generated once per round.

use crate::board::{Board, Cell};
use rand::Rng;
use std::collections::HashSet;

/// Obstacle blocks are 2x2 cells.
const BLOCK_SIZE: i32 = 2;

/// Chebyshev radius around the spawn cell that must stay clear of blocks.
const SPAWN_CLEARANCE: i32 = 3;

/// The set of cells blocked by obstacles for the current round.
///
/// Blocks may overlap each other; overlapping placements are idempotent since
/// the field is a plain cell set. Placement samples from the precomputed set
/// of origins outside the spawn clearance zone; when that set is empty the
/// field simply stays empty.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    cells: HashSet<Cell>,
}

impl ObstacleField {
    /// An empty field, used when obstacles are disabled.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Places `count` 2x2 blocks at block-aligned positions sampled uniformly
    /// from the origins that keep the spawn clearance zone free. On a board
    /// so small that no such origin exists, no blocks are placed.
    pub fn generate<R: Rng>(board: &Board, count: usize, spawn: Cell, rng: &mut R) -> Self {
        let blocks_x = (board.width() / BLOCK_SIZE).max(1);
        let blocks_y = (board.height() / BLOCK_SIZE).max(1);

        let origins: Vec<Cell> = (0..blocks_y)
            .flat_map(|by| {
                (0..blocks_x).map(move |bx| Cell::new(bx * BLOCK_SIZE, by * BLOCK_SIZE))
            })
            .filter(|origin| !block_touches_spawn_zone(*origin, spawn))
            .collect();
        if origins.is_empty() {
            return Self::default();
        }

        let mut cells = HashSet::new();
        for _ in 0..count {
            let origin = origins[rng.gen_range(0..origins.len())];
            for dy in 0..BLOCK_SIZE {
                for dx in 0..BLOCK_SIZE {
                    cells.insert(Cell::new(origin.x + dx, origin.y + dy));
                }
            }
        }

        Self { cells }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

fn block_touches_spawn_zone(origin: Cell, spawn: Cell) -> bool {
    for dy in 0..BLOCK_SIZE {
        for dx in 0..BLOCK_SIZE {
            let cell = Cell::new(origin.x + dx, origin.y + dy);
            if (cell.x - spawn.x).abs() <= SPAWN_CLEARANCE
                && (cell.y - spawn.y).abs() <= SPAWN_CLEARANCE
            {
                return true;
            }
        }
    }
    false
}
