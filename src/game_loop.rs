//! Frame driver
//!
//! The host calls `frame` once per animation frame. Elapsed wall time is fed
//! through a fixed-step accumulator into `sim::tick`, score changes are
//! pushed to the display, and the scene is drawn. When a mover hits the
//! player the driver stops ticking and rendering until the host answers the
//! restart prompt through `confirm_restart`.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::epoch_second;
use crate::platform::{Clock, direction_for_key};
use crate::renderer::{Renderer, ResourceLoader, ScoreSink, render_frame};
use crate::settings::Settings;
use crate::sim::{Direction, GameEvent, GamePhase, GameState, Sprite, TickInput, confirm_restart, tick};

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Sprites are still loading; call again later
    Loading,
    /// Request another frame
    Continue,
    /// Show the restart prompt and answer via `confirm_restart`
    AwaitingConfirmation,
    /// The game is over; stop requesting frames
    Halted,
}

pub struct LoopDriver<C: Clock> {
    state: GameState,
    clock: C,
    accumulator: f32,
    last_time: u64,
    /// Direction pressed since the last tick
    pending_input: Option<Direction>,
    initialized: bool,
    frames: u64,
}

impl<C: Clock> LoopDriver<C> {
    /// The first round begins in `init`, once sprites are ready
    pub fn new(settings: &Settings, clock: C) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let now = clock.now_ms();
        log::info!("Game created with seed: {}", seed);
        Self {
            state: GameState::unstarted(seed, settings.rules()),
            clock,
            accumulator: 0.0,
            last_time: now,
            pending_input: None,
            initialized: false,
            frames: 0,
        }
    }

    /// Kick off sprite loading and `init` once the loader reports ready.
    /// Returns whether the driver is initialized.
    pub fn start(&mut self, loader: &mut impl ResourceLoader, sink: &mut impl ScoreSink) -> bool {
        if !self.initialized {
            loader.load_all(&Sprite::ALL);
        }
        self.poll_ready(loader, sink)
    }

    /// Call `init` the first time `loader` is ready
    pub fn poll_ready(&mut self, loader: &impl ResourceLoader, sink: &mut impl ScoreSink) -> bool {
        if !self.initialized && loader.is_ready() {
            self.init(sink);
        }
        self.initialized
    }

    /// Start the session: a fresh round with spawn timers counted from now
    pub fn init(&mut self, sink: &mut impl ScoreSink) {
        let now = self.clock.now_ms();
        self.state = GameState::new(self.state.seed, self.state.rules, epoch_second(now));
        self.last_time = now;
        self.accumulator = 0.0;
        self.pending_input = None;
        self.initialized = true;
        self.flush_events(sink);
    }

    /// Run one animation frame
    pub fn frame(
        &mut self,
        renderer: &mut impl Renderer,
        sink: &mut impl ScoreSink,
    ) -> FrameOutcome {
        if !self.initialized {
            return FrameOutcome::Loading;
        }
        if !self.state.is_running() {
            return self.outcome();
        }

        let now = self.clock.now_ms();
        let dt = (now.saturating_sub(self.last_time) as f32 / 1000.0).min(MAX_FRAME_DT);
        self.last_time = now;
        self.accumulator += dt;

        let now_second = epoch_second(now);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = TickInput {
                direction: self.pending_input.take(),
            };
            tick(&mut self.state, &input, SIM_DT, now_second);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if !self.state.is_running() {
                self.accumulator = 0.0;
                break;
            }
        }

        self.flush_events(sink);

        // A hit freezes the last drawn frame under the prompt
        if !self.state.is_running() {
            return self.outcome();
        }

        render_frame(&self.state, renderer);
        self.frames += 1;
        FrameOutcome::Continue
    }

    /// Forward a raw key code; unmapped keys are ignored
    pub fn handle_key(&mut self, key_code: u32) {
        if let Some(direction) = direction_for_key(key_code) {
            self.handle_direction(direction);
        }
    }

    /// Queue a direction for the next tick (ignored unless the round is running)
    pub fn handle_direction(&mut self, direction: Direction) {
        if self.initialized && self.state.is_running() {
            self.pending_input = Some(direction);
        }
    }

    /// Answer the restart prompt
    pub fn confirm_restart(&mut self, restart: bool, sink: &mut impl ScoreSink) -> FrameOutcome {
        let now = self.clock.now_ms();
        let phase = confirm_restart(&mut self.state, restart, epoch_second(now));
        if phase == GamePhase::Running {
            // Don't replay the time spent on the prompt
            self.last_time = now;
            self.accumulator = 0.0;
            self.pending_input = None;
        }
        self.flush_events(sink);
        self.outcome()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn outcome(&self) -> FrameOutcome {
        match self.state.phase {
            GamePhase::Running => FrameOutcome::Continue,
            GamePhase::AwaitingRestartConfirmation => FrameOutcome::AwaitingConfirmation,
            GamePhase::Halted => FrameOutcome::Halted,
        }
    }

    /// Push score changes to the display
    fn flush_events(&mut self, sink: &mut impl ScoreSink) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) => sink.show_score(score),
                GameEvent::TopScoreChanged(top) => sink.show_top_score(top),
                _ => {}
            }
        }
    }
}
