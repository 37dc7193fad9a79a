//! The snake body and its per-tick movement rules.

use crate::board::{Board, Cell};
use crate::obstacles::ObstacleField;
use shared::Direction;
use std::collections::VecDeque;

/// Result of advancing the snake by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved one cell; tail dropped, length unchanged.
    Moved,
    /// Landed on food; tail kept, length and score grew by one.
    Ate,
    /// Hit a wall, itself, or an obstacle. Nothing else was mutated.
    Died,
}

/// The snake, its heading and its score.
///
/// The body is ordered head-first. The body never contains duplicate cells:
/// a step onto an occupied cell is rejected as a collision before any
/// mutation happens.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    score: u32,
}

impl Snake {
    pub fn spawn(at: Cell, heading: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_back(at);
        Self {
            body,
            direction: heading,
            score: 0,
        }
    }

    pub fn head(&self) -> Cell {
        // The body is never empty by construction.
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    /// Advances the snake one cell, applying `command` first if present.
    ///
    /// There is no reversal guard: a command opposite to the current heading
    /// is accepted and, on a snake of two or more cells, collides with the
    /// neck immediately. That matches the relay's simplest-possible control
    /// scheme and is covered by a regression test.
    ///
    /// Collision precedence: bounds, then self, then obstacles. A `Died`
    /// outcome leaves the body, heading and score untouched.
    pub fn advance(
        &mut self,
        command: Option<Direction>,
        board: &Board,
        obstacles: &ObstacleField,
        food: Cell,
    ) -> StepOutcome {
        if let Some(direction) = command {
            self.direction = direction;
        }

        let (dx, dy) = self.direction.offset();
        let head = self.head();
        let new_head = Cell::new(head.x + dx, head.y + dy);

        if !board.in_bounds(new_head) || self.occupies(new_head) || obstacles.contains(new_head) {
            return StepOutcome::Died;
        }

        self.body.push_front(new_head);
        if new_head == food {
            self.score += 1;
            StepOutcome::Ate
        } else {
            self.body.pop_back();
            StepOutcome::Moved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_board() -> (Board, ObstacleField) {
        (Board::new(40, 30), ObstacleField::empty())
    }

    /// Food placed somewhere the snake will not reach this tick.
    fn far_food() -> Cell {
        Cell::new(0, 0)
    }

    #[test]
    fn test_plain_move_drops_tail() {
        let (board, obstacles) = open_board();
        let mut snake = Snake::spawn(Cell::new(20, 15), Direction::Right);

        let outcome = snake.advance(None, &board, &obstacles, far_food());

        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(snake.head(), Cell::new(21, 15));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.score(), 0);
    }

    #[test]
    fn test_eating_grows_by_exactly_one() {
        let (board, obstacles) = open_board();
        let mut snake = Snake::spawn(Cell::new(20, 15), Direction::Right);

        let outcome = snake.advance(None, &board, &obstacles, Cell::new(21, 15));

        assert_eq!(outcome, StepOutcome::Ate);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.score(), 1);
        assert_eq!(snake.head(), Cell::new(21, 15));
        assert!(snake.occupies(Cell::new(20, 15)));
    }

    #[test]
    fn test_length_changes_by_zero_or_one_per_tick() {
        let (board, obstacles) = open_board();
        let mut snake = Snake::spawn(Cell::new(5, 5), Direction::Right);

        // A mix of food and non-food ticks along one row.
        for step in 0..10 {
            let food = if step % 3 == 0 {
                Cell::new(6 + step, 5)
            } else {
                far_food()
            };
            let before = snake.len();
            let outcome = snake.advance(None, &board, &obstacles, food);
            assert_ne!(outcome, StepOutcome::Died);
            let grew = snake.len() - before;
            assert!(grew == 0 || grew == 1);
            assert_eq!(grew == 1, outcome == StepOutcome::Ate);
        }
    }

    #[test]
    fn test_command_replaces_heading() {
        let (board, obstacles) = open_board();
        let mut snake = Snake::spawn(Cell::new(20, 15), Direction::Right);

        snake.advance(Some(Direction::Up), &board, &obstacles, far_food());
        assert_eq!(snake.head(), Cell::new(20, 14));
        assert_eq!(snake.direction(), Direction::Up);

        // Absent command keeps the previous heading.
        snake.advance(None, &board, &obstacles, far_food());
        assert_eq!(snake.head(), Cell::new(20, 13));

        snake.advance(Some(Direction::Left), &board, &obstacles, far_food());
        assert_eq!(snake.head(), Cell::new(19, 13));
    }

    #[test]
    fn test_reversal_dies_on_its_own_neck() {
        let (board, obstacles) = open_board();
        let mut snake = Snake::spawn(Cell::new(10, 10), Direction::Right);

        // Grow to length 2 so the neck exists.
        assert_eq!(
            snake.advance(None, &board, &obstacles, Cell::new(11, 10)),
            StepOutcome::Ate
        );

        let before = snake.clone();
        let reversal = snake.direction().opposite();
        let outcome = snake.advance(Some(reversal), &board, &obstacles, far_food());

        assert_eq!(outcome, StepOutcome::Died);
        // A fatal tick mutates nothing.
        assert_eq!(snake.len(), before.len());
        assert_eq!(snake.head(), before.head());
        assert_eq!(snake.score(), before.score());
    }

    #[test]
    fn test_reversal_on_single_cell_snake_is_legal() {
        let (board, obstacles) = open_board();
        let mut snake = Snake::spawn(Cell::new(10, 10), Direction::Right);

        // With no neck to hit, reversing just walks back.
        let outcome = snake.advance(Some(Direction::Left), &board, &obstacles, far_food());
        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(snake.head(), Cell::new(9, 10));
    }

    #[test]
    fn test_walls_kill() {
        let (board, obstacles) = open_board();

        let mut at_left = Snake::spawn(Cell::new(0, 5), Direction::Left);
        assert_eq!(
            at_left.advance(None, &board, &obstacles, far_food()),
            StepOutcome::Died
        );

        let mut at_right = Snake::spawn(Cell::new(39, 5), Direction::Right);
        assert_eq!(
            at_right.advance(None, &board, &obstacles, Cell::new(3, 3)),
            StepOutcome::Died
        );

        let mut at_top = Snake::spawn(Cell::new(5, 0), Direction::Up);
        assert_eq!(
            at_top.advance(None, &board, &obstacles, far_food()),
            StepOutcome::Died
        );

        let mut at_bottom = Snake::spawn(Cell::new(5, 29), Direction::Down);
        assert_eq!(
            at_bottom.advance(None, &board, &obstacles, far_food()),
            StepOutcome::Died
        );
    }

    #[test]
    fn test_obstacle_kills() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let board = Board::new(40, 30);
        let mut rng = StdRng::seed_from_u64(5);
        let obstacles = ObstacleField::generate(&board, 10, Cell::new(20, 15), &mut rng);

        // Stand on a free cell directly left of some block and step into it.
        let start = obstacles
            .cells()
            .find_map(|cell| {
                let left = Cell::new(cell.x - 1, cell.y);
                (board.in_bounds(left) && !obstacles.contains(left)).then_some(left)
            })
            .expect("some block has a free left neighbor");

        let mut snake = Snake::spawn(start, Direction::Right);
        let before_len = snake.len();
        assert_eq!(
            snake.advance(None, &board, &obstacles, far_food()),
            StepOutcome::Died
        );
        assert_eq!(snake.len(), before_len);
    }

    #[test]
    fn test_scenario_head_path_40x30() {
        // Spec scenario: spawn (20,15) heading Right, then Up, Up, Left.
        let (board, obstacles) = open_board();
        let mut snake = Snake::spawn(Cell::new(20, 15), Direction::Right);

        let path = [
            (Direction::Up, Cell::new(20, 14)),
            (Direction::Up, Cell::new(20, 13)),
            (Direction::Left, Cell::new(19, 13)),
        ];

        for (command, expected_head) in path {
            let outcome = snake.advance(Some(command), &board, &obstacles, far_food());
            assert_eq!(outcome, StepOutcome::Moved);
            assert_eq!(snake.head(), expected_head);
            assert_eq!(snake.len(), 1, "tail drops on non-food ticks");
        }
    }
}
