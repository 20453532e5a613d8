//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as arguments (tick `dt`, current epoch second)
//! - Seeded RNG only
//! - Stable iteration order (by slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod slots;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{HitWindow, collectibles_hit, first_mover_hit};
pub use entity::{Collectible, Direction, Drifter, Entity, EntityKind, Mover, Player, Sprite};
pub use slots::SlotRing;
pub use spawn::{DueTimers, SpawnScheduler, SpawnTimer, SpawnTrigger, random_spawn_point};
pub use state::{GameEvent, GamePhase, GameState, RestartPolicy, Rules};
pub use tick::{TickInput, check_collisions, confirm_restart, run_spawns, tick, update_entities};
