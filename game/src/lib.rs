//! # Hop 'n' Hiss display process
//!
//! A fixed-tick snake simulation driven remotely by a joystick relay over
//! UDP. The display owns all game state and never blocks on the network:
//! a receiver task drains the listening socket into a single-slot command
//! mailbox, and the session state machine polls that mailbox exactly once per
//! tick. Absent, late, malformed or out-of-order datagrams are all normal
//! states, not errors: the transport guarantees nothing and the game
//! expects nothing from it.
//!
//! ## Module organization
//!
//! - [`board`]: grid geometry, cells, bounds, sampling.
//! - [`obstacles`]: per-round static 2x2 obstacle blocks.
//! - [`food`]: food placement with bounded rejection sampling.
//! - [`snake`]: the snake body, heading, score and per-tick movement rules.
//! - [`input`]: the UDP receiver task and the single-slot mailbox.
//! - [`session`]: lifecycle phases, from waiting for start through playing
//!   and game-over blinking to waiting for restart.
//! - [`config`]: immutable session parameters with hard-coded defaults.
//! - [`rendering`]: macroquad drawing of the per-tick snapshot.
//!
//! ## Lifecycle
//!
//! The first round starts on the bare arrival of *any* datagram; after a
//! game over, only a decodable direction restarts, and the session jumps
//! straight back into playing. That asymmetry is part of the contract with
//! the relay, not an accident.

pub mod board;
pub mod config;
pub mod food;
pub mod input;
pub mod obstacles;
pub mod rendering;
pub mod session;
pub mod snake;
