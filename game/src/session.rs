//! Session lifecycle: waiting for the relay, playing, game-over
//! presentation, waiting for a restart.

use crate::board::{Board, Cell};
use crate::config::Config;
use crate::food::spawn_food;
use crate::input::InputChannel;
use crate::obstacles::ObstacleField;
use crate::snake::{Snake, StepOutcome};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::Direction;
use std::time::Instant;

/// Visibility toggles before the game-over screen settles (4 full blinks).
const BLINK_TOGGLES: u32 = 8;

/// The lifecycle phase the session is in. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WaitingForStart,
    Playing,
    GameOverBlinking,
    WaitingForRestart,
}

/// Render-ready view of the session, produced once per tick and consumed by
/// the renderer, which feeds nothing back into game logic.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub obstacles: Vec<Cell>,
    pub score: u32,
    pub phase: Phase,
    /// Only meaningful while `phase` is `GameOverBlinking`.
    pub blink_visible: bool,
}

#[derive(Debug)]
struct Blink {
    visible: bool,
    toggles: u32,
    last_toggle: Instant,
}

impl Blink {
    fn fresh() -> Self {
        Self {
            visible: true,
            toggles: 0,
            last_toggle: Instant::now(),
        }
    }
}

/// The session state machine.
///
/// Driven once per fixed tick by the outer loop; the tick boundary is its
/// only suspension point. It pulls at most one command per tick from the
/// input channel and owns every piece of mutable game state.
pub struct Session {
    config: Config,
    board: Board,
    obstacles: ObstacleField,
    snake: Snake,
    food: Cell,
    phase: Phase,
    blink: Blink,
    rng: StdRng,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: Config, rng: StdRng) -> Self {
        let board = Board::new(config.grid_width, config.grid_height);
        let mut session = Self {
            config,
            board,
            obstacles: ObstacleField::empty(),
            snake: Snake::spawn(board.center(), Direction::Right),
            food: board.center(),
            phase: Phase::WaitingForStart,
            blink: Blink::fresh(),
            rng,
        };
        session.fresh_round();
        session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.snake.score()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.cells().copied().collect(),
            food: self.food,
            obstacles: self.obstacles.cells().copied().collect(),
            score: self.snake.score(),
            phase: self.phase,
            blink_visible: self.blink.visible,
        }
    }

    /// Advances the session by one tick.
    ///
    /// Each phase drains the channel its own way: the first start triggers on
    /// bare datagram presence, a restart requires a decodable direction, and
    /// the game-over screen discards everything so stale backlog cannot leak
    /// into the next round.
    pub fn tick(&mut self, input: &mut InputChannel) {
        match self.phase {
            Phase::WaitingForStart => {
                if input.poll_datagram_seen() {
                    info!("Start signal received, starting game");
                    self.start_round();
                    // The trigger datagram's content is irrelevant, even if
                    // it happened to decode.
                    let _ = input.try_take_latest();
                }
            }
            Phase::Playing => {
                let _ = input.poll_datagram_seen();
                let command = input.try_take_latest();
                match self
                    .snake
                    .advance(command, &self.board, &self.obstacles, self.food)
                {
                    StepOutcome::Moved => {}
                    StepOutcome::Ate => {
                        info!("Food eaten, score {}", self.snake.score());
                        match spawn_food(&self.board, &self.snake, &self.obstacles, &mut self.rng)
                        {
                            Some(cell) => self.food = cell,
                            None => {
                                // No cell left to place food on; the round is
                                // over, presented like any other game over.
                                info!("Board saturated at score {}", self.snake.score());
                                self.enter_game_over();
                            }
                        }
                    }
                    StepOutcome::Died => {
                        info!("Game over, final score {}", self.snake.score());
                        self.enter_game_over();
                    }
                }
            }
            Phase::GameOverBlinking => {
                let _ = input.try_take_latest();
                let _ = input.poll_datagram_seen();

                if self.blink.last_toggle.elapsed() >= self.config.blink_interval {
                    self.blink.visible = !self.blink.visible;
                    self.blink.toggles += 1;
                    self.blink.last_toggle = Instant::now();

                    if self.blink.toggles >= BLINK_TOGGLES {
                        self.blink.visible = true;
                        self.phase = Phase::WaitingForRestart;
                        info!("Ready for restart");
                    }
                }
            }
            Phase::WaitingForRestart => {
                let _ = input.poll_datagram_seen();
                // Unlike the first start, only a decodable direction restarts,
                // and it jumps straight back into Playing. The direction is a
                // trigger only; a fresh round always heads Right.
                if input.try_take_latest().is_some() {
                    info!("Restart signal received, starting new round");
                    self.start_round();
                }
            }
        }
    }

    fn start_round(&mut self) {
        if self.fresh_round() {
            self.phase = Phase::Playing;
        } else {
            warn!("No free cell to place food on a fresh board");
            self.enter_game_over();
        }
    }

    /// Rebuilds obstacles, snake and food for a new round. Returns false when
    /// food could not be placed (a degenerate board).
    fn fresh_round(&mut self) -> bool {
        let spawn = self.board.center();
        self.obstacles = if self.config.obstacles_enabled {
            ObstacleField::generate(&self.board, self.config.obstacle_count, spawn, &mut self.rng)
        } else {
            ObstacleField::empty()
        };
        self.snake = Snake::spawn(spawn, Direction::Right);
        self.blink = Blink::fresh();

        match spawn_food(&self.board, &self.snake, &self.obstacles, &mut self.rng) {
            Some(cell) => {
                self.food = cell;
                true
            }
            None => false,
        }
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::GameOverBlinking;
        self.blink = Blink::fresh();
    }
}
