//! Key sampling and the send-on-change latch.

use macroquad::prelude::*;
use shared::Direction;

/// Reads the current arrow-key deflection, if any.
///
/// Vertical axes take priority over horizontal, matching how a stick
/// deflection would be discretized one axis at a time.
pub fn read_keys() -> Option<Direction> {
    if is_key_down(KeyCode::Up) {
        Some(Direction::Up)
    } else if is_key_down(KeyCode::Down) {
        Some(Direction::Down)
    } else if is_key_down(KeyCode::Left) {
        Some(Direction::Left)
    } else if is_key_down(KeyCode::Right) {
        Some(Direction::Right)
    } else {
        None
    }
}

/// Suppresses repeats: a direction goes out only when it differs from the
/// last one sent. Releasing every key sends nothing and keeps the latch, so
/// holding a direction across samples produces exactly one datagram.
#[derive(Debug, Default)]
pub struct DirectionLatch {
    last_sent: Option<Direction>,
}

impl DirectionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one sample; returns the direction to send, if any.
    pub fn update(&mut self, current: Option<Direction>) -> Option<Direction> {
        match current {
            Some(direction) if self.last_sent != Some(direction) => {
                self.last_sent = Some(direction);
                Some(direction)
            }
            _ => None,
        }
    }

    pub fn last_sent(&self) -> Option<Direction> {
        self.last_sent
    }
}
