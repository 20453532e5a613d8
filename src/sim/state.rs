//! Round state and core simulation types
//!
//! A `GameState` owns everything a round needs: the player, both slot rings,
//! the spawn timers, score and top score. Nothing here reads the clock; the
//! current epoch second is always handed in.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Collectible, Drifter, EntityKind, Mover, Player};
use super::slots::SlotRing;
use super::spawn::{SpawnScheduler, SpawnTrigger};
use crate::consts::*;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// A mover hit the player; waiting for a yes/no on restarting
    AwaitingRestartConfirmation,
    /// Restart was declined
    Halted,
}

/// What to do with the answer to the restart prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RestartPolicy {
    /// Yes restarts, no halts
    #[default]
    RespectAnswer,
    /// Any answer restarts
    AlwaysReset,
}

/// Things that happened during a tick, drained by the loop driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    TopScoreChanged(u64),
    CollectiblePicked { id: u32, points: u64 },
    MoverHit { id: u32 },
    Spawned { kind: EntityKind, slot: usize },
    RoundReset,
    Halted,
}

/// Gameplay rules fixed for the lifetime of a state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Lane drift speed (units/second)
    pub base_speed: f32,
    /// Player slide pixels per tick
    pub player_speed: i32,
    pub spawn_trigger: SpawnTrigger,
    pub restart_policy: RestartPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            player_speed: PLAYER_SPEED,
            spawn_trigger: SpawnTrigger::default(),
            restart_policy: RestartPolicy::default(),
        }
    }
}

/// Complete round state (deterministic for a given seed and clock)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rules: Rules,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    pub movers: SlotRing<Mover>,
    pub collectibles: SlotRing<Collectible>,
    pub spawns: SpawnScheduler,
    /// Score of the current round
    pub score: u64,
    /// Best score since the process started; survives resets
    pub top_score: u64,
    /// Simulation tick counter (whole session)
    pub time_ticks: u64,
    /// Number of rounds started
    pub rounds: u32,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh running round
    pub fn new(seed: u64, rules: Rules, now_second: u64) -> Self {
        let mut state = Self::unstarted(seed, rules);
        state.reset(now_second);
        state
    }

    /// An empty field with no round begun; `reset` starts the first one
    pub fn unstarted(seed: u64, rules: Rules) -> Self {
        Self {
            seed,
            rules,
            phase: GamePhase::Running,
            player: Player::new(rules.player_speed),
            movers: SlotRing::new(),
            collectibles: SlotRing::new(),
            spawns: SpawnScheduler::new(),
            score: 0,
            top_score: 0,
            time_ticks: 0,
            rounds: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Start a new round: fresh player, reseeded lanes, score back to zero.
    /// The top score is kept.
    pub fn reset(&mut self, now_second: u64) {
        self.player = Player::new(self.rules.player_speed);
        self.movers.clear();
        self.collectibles.clear();
        self.spawns.clear();

        self.spawn_collectible(Vec2::new(-300.0, 50.0), now_second);
        self.spawn_mover(Vec2::new(-200.0, VALID_ROWS[0]), now_second);
        self.spawn_mover(Vec2::new(-400.0, VALID_ROWS[2]), now_second);
        debug_assert_eq!(self.movers.write_index(), MOVER_START_INDEX);
        debug_assert_eq!(self.collectibles.write_index(), COLLECTIBLE_START_INDEX);

        self.score = 0;
        self.phase = GamePhase::Running;
        self.rounds += 1;

        self.events.push(GameEvent::RoundReset);
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::TopScoreChanged(self.top_score));
        log::info!("Round {} started (top score {})", self.rounds, self.top_score);
    }

    /// Create a mover at `pos` and schedule its successor. Returns the slot used.
    pub fn spawn_mover(&mut self, pos: Vec2, now_second: u64) -> usize {
        let id = self.next_entity_id();
        let mover = Mover::spawn(id, pos, now_second, &mut self.rng);
        if let Some(due) = mover.spawn_at {
            self.spawns.schedule(due, EntityKind::Mover, id);
        }
        self.movers.insert(mover)
    }

    /// Create a collectible at `pos` and schedule its successor. Returns the slot used.
    pub fn spawn_collectible(&mut self, pos: Vec2, now_second: u64) -> usize {
        let id = self.next_entity_id();
        let gem = Collectible::spawn(id, pos, now_second, &mut self.rng);
        if let Some(due) = gem.spawn_at {
            self.spawns.schedule(due, EntityKind::Collectible, id);
        }
        self.collectibles.insert(gem)
    }

    /// Mark a timer's owner as spent, if it is still on the field
    pub fn consume_spawn_timer(&mut self, kind: EntityKind, parent: u32) {
        match kind {
            EntityKind::Mover => clear_timer(&mut self.movers, parent),
            EntityKind::Collectible => clear_timer(&mut self.collectibles, parent),
        }
    }

    /// Add points and keep the top score in step
    pub fn award(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.score += points;
        self.events.push(GameEvent::ScoreChanged(self.score));
        if self.score > self.top_score {
            self.top_score = self.score;
            self.events.push(GameEvent::TopScoreChanged(self.top_score));
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }
}

fn clear_timer<T: Drifter>(ring: &mut SlotRing<T>, parent: u32) {
    if let Some(entity) = ring.iter_mut().find(|e| e.id() == parent) {
        entity.clear_spawn_at();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Entity;

    #[test]
    fn test_new_round_layout() {
        let state = GameState::new(42, Rules::default(), 1_000);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.pos, Vec2::new(200.0, 400.0));
        assert_eq!(state.score, 0);

        let movers: Vec<Vec2> = state.movers.iter().map(|m| m.pos()).collect();
        assert_eq!(movers, vec![Vec2::new(-200.0, 60.0), Vec2::new(-400.0, 230.0)]);
        let gems: Vec<Vec2> = state.collectibles.iter().map(|c| c.pos()).collect();
        assert_eq!(gems, vec![Vec2::new(-300.0, 50.0)]);

        assert_eq!(state.movers.write_index(), 2);
        assert_eq!(state.collectibles.write_index(), 1);
        // One successor timer per seeded entity
        assert_eq!(state.spawns.len(), 3);
    }

    #[test]
    fn test_reset_keeps_top_score() {
        let mut state = GameState::new(42, Rules::default(), 1_000);
        state.award(300);
        assert_eq!(state.top_score, 300);

        state.player.pos = Vec2::new(100.0, 60.0);
        state.reset(1_010);
        assert_eq!(state.score, 0);
        assert_eq!(state.top_score, 300);
        assert_eq!(state.player, Player::default());
        assert_eq!(state.movers.len(), 2);
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.rounds, 2);
    }

    #[test]
    fn test_award_emits_events() {
        let mut state = GameState::new(1, Rules::default(), 0);
        state.drain_events();

        state.award(100);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ScoreChanged(100), GameEvent::TopScoreChanged(100)]
        );

        state.award(0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_consume_timer_clears_parent() {
        let mut state = GameState::new(9, Rules::default(), 500);
        let id = state.movers.iter().next().map(|m| m.id).unwrap_or_default();
        state.consume_spawn_timer(EntityKind::Mover, id);
        assert_eq!(state.movers.get(0).and_then(|m| m.spawn_at), None);
        assert!(state.movers.get(1).and_then(|m| m.spawn_at).is_some());
    }

    #[test]
    fn test_same_seed_same_round() {
        let a = GameState::new(77, Rules::default(), 100);
        let b = GameState::new(77, Rules::default(), 100);
        let speeds_a: Vec<i32> = a.movers.iter().map(|m| m.speed_mod).collect();
        let speeds_b: Vec<i32> = b.movers.iter().map(|m| m.speed_mod).collect();
        assert_eq!(speeds_a, speeds_b);
        assert_eq!(a.spawns.next_due(), b.spawns.next_due());
    }
}
