//! Entity types: the player, movers (bugs) and collectibles (gems)
//!
//! Movers and collectibles drift left-to-right along the stone lanes. The
//! player slides one grid cell per accepted input, draining a motion queue
//! a fixed number of pixels per tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Sprite images known to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sprite {
    EnemyBug,
    GemGreen,
    GemOrange,
    CharBoy,
    WaterBlock,
    StoneBlock,
    GrassBlock,
}

impl Sprite {
    /// Every sprite the game draws (handed to the resource loader)
    pub const ALL: [Sprite; 7] = [
        Sprite::StoneBlock,
        Sprite::WaterBlock,
        Sprite::GrassBlock,
        Sprite::EnemyBug,
        Sprite::CharBoy,
        Sprite::GemOrange,
        Sprite::GemGreen,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Sprite::EnemyBug => "images/enemy-bug.png",
            Sprite::GemGreen => "images/GemGreen.png",
            Sprite::GemOrange => "images/GemOrange.png",
            Sprite::CharBoy => "images/char-boy.png",
            Sprite::WaterBlock => "images/water-block.png",
            Sprite::StoneBlock => "images/stone-block.png",
            Sprite::GrassBlock => "images/grass-block.png",
        }
    }
}

/// Discrete player input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Which self-spawning entity family something belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Mover,
    Collectible,
}

/// Shared positional state of everything drawn on the field
pub trait Entity {
    fn pos(&self) -> Vec2;
    fn sprite(&self) -> Sprite;
}

/// An entity that drifts along a lane and schedules its own successor
pub trait Drifter: Entity {
    fn id(&self) -> u32;
    fn pos_mut(&mut self) -> &mut Vec2;
    fn speed_mod(&self) -> i32;
    /// Mark the successor timer as consumed
    fn clear_spawn_at(&mut self);

    /// Move right by `base_speed * dt` plus the per-instance jitter
    fn advance(&mut self, dt: f32, base_speed: f32) {
        let step = base_speed * dt + self.speed_mod() as f32;
        self.pos_mut().x += step;
    }
}

/// Draw a speed jitter in `SPEED_MOD_MIN..=SPEED_MOD_MAX`
pub fn roll_speed_mod(rng: &mut impl Rng) -> i32 {
    rng.random_range(SPEED_MOD_MIN..=SPEED_MOD_MAX)
}

/// A hazard crossing the lanes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub id: u32,
    pub pos: Vec2,
    pub speed_mod: i32,
    pub spawn_at: Option<u64>,
}

impl Mover {
    pub fn new(id: u32, pos: Vec2, speed_mod: i32, spawn_at: Option<u64>) -> Self {
        Self {
            id,
            pos,
            speed_mod,
            spawn_at,
        }
    }

    /// Build a mover with random jitter whose successor is due 1-4 seconds from `now_second`
    pub fn spawn(id: u32, pos: Vec2, now_second: u64, rng: &mut impl Rng) -> Self {
        let speed_mod = roll_speed_mod(rng);
        let (min, max) = MOVER_SPAWN_DELAY;
        let due = now_second + rng.random_range(min..=max);
        Self::new(id, pos, speed_mod, Some(due))
    }
}

impl Entity for Mover {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn sprite(&self) -> Sprite {
        Sprite::EnemyBug
    }
}

impl Drifter for Mover {
    fn id(&self) -> u32 {
        self.id
    }

    fn pos_mut(&mut self) -> &mut Vec2 {
        &mut self.pos
    }

    fn speed_mod(&self) -> i32 {
        self.speed_mod
    }

    fn clear_spawn_at(&mut self) {
        self.spawn_at = None;
    }
}

/// A gem worth points, disabled once picked up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec2,
    pub sprite: Sprite,
    pub speed_mod: i32,
    pub spawn_at: Option<u64>,
    /// Disabled collectibles stay in their slot but are not drawn
    pub enabled: bool,
    pub score_value: u64,
}

impl Collectible {
    pub fn new(id: u32, pos: Vec2, sprite: Sprite, speed_mod: i32, spawn_at: Option<u64>) -> Self {
        Self {
            id,
            pos,
            sprite,
            speed_mod,
            spawn_at,
            enabled: true,
            score_value: COLLECTIBLE_SCORE,
        }
    }

    /// Build a green or orange gem whose successor is due 5-9 seconds from `now_second`
    pub fn spawn(id: u32, pos: Vec2, now_second: u64, rng: &mut impl Rng) -> Self {
        let sprite = if rng.random_bool(0.5) {
            Sprite::GemGreen
        } else {
            Sprite::GemOrange
        };
        let speed_mod = roll_speed_mod(rng);
        let (min, max) = COLLECTIBLE_SPAWN_DELAY;
        let due = now_second + rng.random_range(min..=max);
        Self::new(id, pos, sprite, speed_mod, Some(due))
    }

    /// Consume the points this gem is worth. Returns 0 on every call after the first.
    pub fn collect(&mut self) -> u64 {
        self.enabled = false;
        std::mem::take(&mut self.score_value)
    }
}

impl Entity for Collectible {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn sprite(&self) -> Sprite {
        self.sprite
    }
}

impl Drifter for Collectible {
    fn id(&self) -> u32 {
        self.id
    }

    fn pos_mut(&mut self) -> &mut Vec2 {
        &mut self.pos
    }

    fn speed_mod(&self) -> i32 {
        self.speed_mod
    }

    fn clear_spawn_at(&mut self) {
        self.spawn_at = None;
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal distance still to slide (signed pixels)
    pub move_x: i32,
    /// Vertical distance still to slide (signed pixels)
    pub move_y: i32,
    /// Pixels drained from the motion queue per tick
    pub speed: i32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_SPEED)
    }
}

impl Player {
    /// `speed` below 1 is raised to 1 so a slide always finishes
    pub fn new(speed: i32) -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            move_x: 0,
            move_y: 0,
            speed: speed.max(1),
        }
    }

    /// True when no slide is in progress
    pub fn is_idle(&self) -> bool {
        self.move_x == 0 && self.move_y == 0
    }

    /// Queue a one-cell slide. Returns whether the input was accepted.
    ///
    /// Inputs during a slide are dropped, as are inputs that would leave
    /// the play field.
    pub fn handle_input(&mut self, direction: Direction) -> bool {
        if !self.is_idle() {
            return false;
        }

        let blocked = match direction {
            Direction::Right => self.pos.x > BOUND_X_MAX,
            Direction::Left => self.pos.x < BOUND_X_MIN,
            Direction::Up => self.pos.y < BOUND_Y_MIN,
            Direction::Down => self.pos.y > BOUND_Y_MAX,
        };
        if blocked {
            return false;
        }

        match direction {
            Direction::Up => self.move_y -= STEP_Y,
            Direction::Down => self.move_y += STEP_Y,
            Direction::Left => self.move_x -= STEP_X,
            Direction::Right => self.move_x += STEP_X,
        }
        true
    }

    /// Apply one tick of the motion queue on both axes
    pub fn update(&mut self) {
        self.pos.x += drain(&mut self.move_x, self.speed) as f32;
        self.pos.y += drain(&mut self.move_y, self.speed) as f32;
    }
}

impl Entity for Player {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn sprite(&self) -> Sprite {
        Sprite::CharBoy
    }
}

/// Take up to `speed` off a pending distance without crossing zero
fn drain(pending: &mut i32, speed: i32) -> i32 {
    let step = pending.signum() * pending.abs().min(speed);
    *pending -= step;
    step
}
