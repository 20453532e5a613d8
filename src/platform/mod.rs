//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (frame timestamps and the epoch second spawn timers key on)
//! - Input events (keyboard codes to directions)

pub mod input;
pub mod time;

pub use input::direction_for_key;
pub use time::{Clock, ManualClock, SystemClock};
