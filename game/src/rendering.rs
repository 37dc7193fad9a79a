//! Macroquad scene drawing for the display process.
//!
//! A pure consumer of the per-tick snapshot; nothing here feeds back into
//! game logic.

use crate::board::Cell;
use crate::session::{Phase, Snapshot};
use macroquad::prelude::*;

pub struct Renderer {
    cell_px: f32,
}

impl Renderer {
    pub fn new(cell_px: f32) -> Self {
        Self { cell_px }
    }

    pub fn render(&self, snapshot: &Snapshot) {
        clear_background(BLACK);

        match snapshot.phase {
            Phase::WaitingForStart => {
                self.draw_centered("Waiting for joystick input...", -20.0, 35.0);
            }
            Phase::Playing => {
                self.draw_field(snapshot);
            }
            Phase::GameOverBlinking => {
                self.draw_field(snapshot);
                if snapshot.blink_visible {
                    self.draw_centered("Game Over", -50.0, 55.0);
                }
            }
            Phase::WaitingForRestart => {
                self.draw_field(snapshot);
                self.draw_centered("Game Over", -50.0, 55.0);
                self.draw_centered("Send a direction to restart", 20.0, 35.0);
            }
        }
    }

    fn draw_field(&self, snapshot: &Snapshot) {
        for cell in &snapshot.obstacles {
            self.draw_cell(*cell, GRAY);
        }
        for cell in &snapshot.snake {
            self.draw_cell(*cell, GREEN);
        }
        self.draw_cell(snapshot.food, RED);

        let score_text = format!("Score: {}", snapshot.score);
        draw_text(&score_text, 10.0, 30.0, 35.0, WHITE);
    }

    fn draw_cell(&self, cell: Cell, color: Color) {
        draw_rectangle(
            cell.x as f32 * self.cell_px,
            cell.y as f32 * self.cell_px,
            self.cell_px,
            self.cell_px,
            color,
        );
    }

    fn draw_centered(&self, text: &str, y_offset: f32, font_size: f32) {
        let measured = measure_text(text, None, font_size as u16, 1.0);
        draw_text(
            text,
            screen_width() / 2.0 - measured.width / 2.0,
            screen_height() / 2.0 + y_offset,
            font_size,
            WHITE,
        );
    }
}
