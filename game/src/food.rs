//! Food placement by rejection sampling with a bounded fallback.

use crate::board::{Board, Cell};
use crate::obstacles::ObstacleField;
use crate::snake::Snake;
use rand::Rng;

/// Random sampling attempts before falling back to a scan of the free cells.
///
/// Unbounded rejection sampling diverges as the board fills up; the cap plus
/// scan keeps placement O(cells) in the worst case while staying uniform over
/// the free cells.
const MAX_SAMPLE_ATTEMPTS: usize = 512;

/// Picks a cell that is neither on the snake nor inside an obstacle block.
///
/// Returns `None` only when the board has no free cell left.
pub fn spawn_food<R: Rng>(
    board: &Board,
    snake: &Snake,
    obstacles: &ObstacleField,
    rng: &mut R,
) -> Option<Cell> {
    for _ in 0..MAX_SAMPLE_ATTEMPTS {
        let candidate = board.random_cell(rng);
        if !snake.occupies(candidate) && !obstacles.contains(candidate) {
            return Some(candidate);
        }
    }

    let free: Vec<Cell> = board
        .cells()
        .filter(|cell| !snake.occupies(*cell) && !obstacles.contains(*cell))
        .collect();

    if free.is_empty() {
        None
    } else {
        Some(free[rng.gen_range(0..free.len())])
    }
}
