//! Immutable session parameters, fixed at startup.

use std::time::Duration;

pub const DEFAULT_TICK_RATE: u32 = 6;
pub const DEFAULT_GRID_WIDTH: i32 = 40;
pub const DEFAULT_GRID_HEIGHT: i32 = 30;
pub const DEFAULT_OBSTACLE_COUNT: usize = 50;
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Everything the session needs to know, validated and frozen before the
/// first tick. Constructed from the command line in `main`; the core never
/// reads ambient state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Simulation ticks per second.
    pub tick_rate: u32,
    /// Board width in cells.
    pub grid_width: i32,
    /// Board height in cells.
    pub grid_height: i32,
    /// Whether a round gets obstacle blocks at all.
    pub obstacles_enabled: bool,
    /// 2x2 blocks to place when obstacles are enabled.
    pub obstacle_count: usize,
    /// Wall-clock interval between game-over visibility toggles.
    pub blink_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            obstacles_enabled: false,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            blink_interval: DEFAULT_BLINK_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_contract() {
        let config = Config::default();
        assert_eq!(config.tick_rate, 6);
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 30);
        assert!(!config.obstacles_enabled);
        assert_eq!(config.obstacle_count, 50);
        assert_eq!(config.blink_interval, Duration::from_millis(500));
    }
}
