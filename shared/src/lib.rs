//! Wire protocol shared by the display process and the joystick relay.
//!
//! The protocol is one-directional and fire-and-forget: each datagram carries
//! a single bincode-serialized token, one of the literal strings `"UP"`,
//! `"DOWN"`, `"LEFT"` or `"RIGHT"`. Anything else (truncated bytes, unknown
//! tokens, empty payloads) is simply not a command and is dropped by the
//! receiver. No acknowledgement is ever sent.

use serde::{Deserialize, Serialize};

/// Default port the display listens on and the relay targets.
pub const DEFAULT_PORT: u16 = 5005;

/// A discrete joystick deflection.
///
/// There is deliberately no "none" variant on the wire: the absence of a new
/// datagram means "keep the previous heading".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The literal wire token for this direction.
    pub fn token(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    /// Parses a wire token. Unknown tokens are not an error, just not a command.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "UP" => Some(Direction::Up),
            "DOWN" => Some(Direction::Down),
            "LEFT" => Some(Direction::Left),
            "RIGHT" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// One-cell grid offset, with y growing downwards.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Serializes a direction into its datagram payload.
pub fn encode_command(direction: Direction) -> Result<Vec<u8>, bincode::Error> {
    bincode::serialize(direction.token())
}

/// Decodes a datagram payload into a direction.
///
/// Returns `None` for anything that does not deserialize to one of the four
/// known tokens; callers treat that as silence, never as a failure.
pub fn decode_command(payload: &[u8]) -> Option<Direction> {
    let token: String = bincode::deserialize(payload).ok()?;
    Direction::from_token(&token)
}
