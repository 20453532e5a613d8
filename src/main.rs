//! Gem Crossing entry point
//!
//! Runs the game headlessly: frames are paced by a simulated 60 fps clock,
//! a scripted player taps the arrow keys, and restart prompts are answered
//! from settings. Useful for soak-testing the simulation and its logging.

use std::path::PathBuf;

use gem_crossing::platform::{Clock, ManualClock, SystemClock};
use gem_crossing::renderer::{NullRenderer, Preloaded, ScoreSink};
use gem_crossing::settings::SETTINGS_ENV;
use gem_crossing::sim::Direction;
use gem_crossing::{FrameOutcome, LoopDriver, Settings};

/// Inputs the scripted player cycles through whenever it is standing still
const SCRIPT: [Direction; 12] = [
    Direction::Up,
    Direction::Up,
    Direction::Left,
    Direction::Up,
    Direction::Right,
    Direction::Up,
    Direction::Down,
    Direction::Down,
    Direction::Right,
    Direction::Down,
    Direction::Left,
    Direction::Down,
];

/// Score readout that writes to the log
struct LogScoreSink;

impl ScoreSink for LogScoreSink {
    fn show_score(&mut self, score: u64) {
        log::info!("Score: {}", score);
    }

    fn show_top_score(&mut self, top_score: u64) {
        log::info!("Top Score: {}", top_score);
    }
}

fn settings_path() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var(SETTINGS_ENV).ok())
        .map(PathBuf::from)
}

fn main() {
    env_logger::init();
    log::info!("Gem Crossing (headless) starting...");

    let settings = Settings::load_or_default(settings_path().as_deref());
    let clock = ManualClock::starting_at(SystemClock.now_ms());
    let mut driver = LoopDriver::new(&settings, clock.clone());

    let mut renderer = NullRenderer;
    let mut sink = LogScoreSink;
    let mut loader = Preloaded::default();
    if !driver.start(&mut loader, &mut sink) {
        log::error!("Sprites never became ready");
        return;
    }

    let mut script = SCRIPT.iter().cycle();
    for _ in 0..settings.max_frames {
        clock.advance(settings.frame_ms);

        if driver.state().player.is_idle() {
            if let Some(&direction) = script.next() {
                driver.handle_direction(direction);
            }
        }

        match driver.frame(&mut renderer, &mut sink) {
            FrameOutcome::Loading | FrameOutcome::Continue => {}
            FrameOutcome::AwaitingConfirmation => {
                log::info!(
                    "Collision occurred! Restart? answering {}",
                    if settings.auto_restart { "yes" } else { "no" }
                );
                if driver.confirm_restart(settings.auto_restart, &mut sink) == FrameOutcome::Halted {
                    break;
                }
            }
            FrameOutcome::Halted => break,
        }
    }

    let state = driver.state();
    log::info!(
        "Finished after {} frames ({} ticks, {} rounds): score {}, top score {}",
        driver.frames(),
        state.time_ticks,
        state.rounds,
        state.score,
        state.top_score
    );
    match serde_json::to_string(state) {
        Ok(json) => log::debug!("Final state: {}", json),
        Err(e) => log::warn!("Could not serialize final state: {}", e),
    }
}
