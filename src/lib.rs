//! Gem Crossing - A lane-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, round state)
//! - `game_loop`: Frame driver that steps the simulation and feeds the renderer
//! - `renderer`: Sprite drawing and score display boundary
//! - `platform`: Clock and keyboard abstraction
//! - `settings`: Data-driven tuning and policies

pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game_loop::{FrameOutcome, LoopDriver};
pub use settings::{RestartPolicy, Settings, SettingsError, SpawnTrigger};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one player slide step per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Play field dimensions
    pub const CANVAS_WIDTH: u32 = 505;
    pub const CANVAS_HEIGHT: u32 = 606;
    pub const TILE_WIDTH: f32 = 101.0;
    pub const TILE_HEIGHT: f32 = 83.0;
    pub const NUM_ROWS: usize = 6;
    pub const NUM_COLS: usize = 5;

    /// Stone lanes movers and collectibles travel along (y coordinate)
    pub const VALID_ROWS: [f32; 3] = [60.0, 145.0, 230.0];
    /// Off-screen spawn columns (x coordinate)
    pub const SPAWN_COLUMNS: [f32; 2] = [-100.0, -200.0];

    /// Horizontal speed shared by movers and collectibles (units/second)
    pub const BASE_SPEED: f32 = 90.0;
    /// Per-instance speed jitter range, inclusive
    pub const SPEED_MOD_MIN: i32 = 1;
    pub const SPEED_MOD_MAX: i32 = 3;

    /// Seconds until a mover schedules its successor, inclusive
    pub const MOVER_SPAWN_DELAY: (u64, u64) = (1, 4);
    /// Seconds until a collectible schedules its successor, inclusive
    pub const COLLECTIBLE_SPAWN_DELAY: (u64, u64) = (5, 9);

    /// Live slots per entity kind before the write index wraps
    pub const SLOT_CAPACITY: usize = 14;
    /// Write index right after a reset (seed entries occupy the slots below)
    pub const MOVER_START_INDEX: usize = 2;
    pub const COLLECTIBLE_START_INDEX: usize = 1;

    /// Points awarded per collectible
    pub const COLLECTIBLE_SCORE: u64 = 100;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 200.0;
    pub const PLAYER_START_Y: f32 = 400.0;
    /// Pixels drained from the motion queue per tick
    pub const PLAYER_SPEED: i32 = 5;
    /// One grid cell per accepted input
    pub const STEP_X: i32 = 100;
    pub const STEP_Y: i32 = 85;

    /// Input rejection bounds (strict comparisons)
    pub const BOUND_X_MIN: f32 = 100.0;
    pub const BOUND_X_MAX: f32 = 300.0;
    pub const BOUND_Y_MIN: f32 = 100.0;
    pub const BOUND_Y_MAX: f32 = 359.0;

    /// Hit window around the player's top-left corner
    pub const HIT_WINDOW_BEFORE: f32 = 20.0;
    pub const HIT_WINDOW_AFTER: f32 = 40.0;
}

/// Strict open-interval test: `low < value < high`
#[inline]
pub fn between(value: f32, low: f32, high: f32) -> bool {
    value > low && value < high
}

/// Convert a millisecond timestamp to the nearest whole epoch second
#[inline]
pub fn epoch_second(now_ms: u64) -> u64 {
    (now_ms + 500) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_is_exclusive() {
        assert!(between(5.0, 0.0, 10.0));
        assert!(!between(0.0, 0.0, 10.0));
        assert!(!between(10.0, 0.0, 10.0));
    }

    #[test]
    fn test_epoch_second_rounds_to_nearest() {
        assert_eq!(epoch_second(1_499), 1);
        assert_eq!(epoch_second(1_500), 2);
        assert_eq!(epoch_second(0), 0);
    }
}
