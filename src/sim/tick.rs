//! Fixed timestep simulation tick
//!
//! One tick: apply input, move everything, fire due spawn timers, then
//! resolve collisions. A mover hit ends the round and parks it until the
//! restart prompt is answered.

use super::collision::{HitWindow, collectibles_hit, first_mover_hit};
use super::entity::{Direction, Drifter, EntityKind};
use super::spawn::random_spawn_point;
use super::state::{GameEvent, GamePhase, GameState, RestartPolicy};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Arrow key pressed since the last tick
    pub direction: Option<Direction>,
}

/// Advance the round by one timestep. `now_second` is the current epoch second.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32, now_second: u64) {
    // Nothing moves while the restart prompt is up or after halting
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    if let Some(direction) = input.direction {
        state.player.handle_input(direction);
    }

    update_entities(state, dt);
    run_spawns(state, now_second);
    check_collisions(state);
}

/// Drift every lane entity and drain one step of the player's motion queue
pub fn update_entities(state: &mut GameState, dt: f32) {
    let base_speed = state.rules.base_speed;
    for mover in &mut state.movers {
        mover.advance(dt, base_speed);
    }
    for gem in &mut state.collectibles {
        gem.advance(dt, base_speed);
    }
    state.player.update();
}

/// Spawn successors for every timer due at `now_second`
pub fn run_spawns(state: &mut GameState, now_second: u64) {
    let due = state.spawns.drain_due(now_second, state.rules.spawn_trigger);

    for timer in due.missed {
        log::debug!(
            "{:?} {} missed its spawn second {} (now {})",
            timer.kind,
            timer.parent,
            timer.due,
            now_second
        );
        state.consume_spawn_timer(timer.kind, timer.parent);
    }

    for timer in due.fired {
        let pos = random_spawn_point(state.rng());
        let slot = match timer.kind {
            EntityKind::Mover => state.spawn_mover(pos, now_second),
            EntityKind::Collectible => state.spawn_collectible(pos, now_second),
        };
        state.consume_spawn_timer(timer.kind, timer.parent);
        log::debug!(
            "{:?} {} spawned successor at ({}, {}) in slot {}",
            timer.kind,
            timer.parent,
            pos.x,
            pos.y,
            slot
        );
        state.events.push(GameEvent::Spawned {
            kind: timer.kind,
            slot,
        });
    }
}

/// Test the player against every mover and collectible.
///
/// A mover hit moves the round to `AwaitingRestartConfirmation` and stops
/// the scan. Collectibles in reach pay out their points once each.
pub fn check_collisions(state: &mut GameState) {
    let window = HitWindow::around(state.player.pos);

    if let Some(id) = first_mover_hit(&window, &state.movers) {
        log::info!(
            "Mover {} hit the player at ({}, {}), score {}",
            id,
            state.player.pos.x,
            state.player.pos.y,
            state.score
        );
        state.phase = GamePhase::AwaitingRestartConfirmation;
        state.events.push(GameEvent::MoverHit { id });
        return;
    }

    let mut picked = Vec::new();
    for gem in collectibles_hit(window, &mut state.collectibles) {
        let points = gem.collect();
        if points > 0 {
            picked.push((gem.id, points));
        }
    }

    for (id, points) in picked {
        log::debug!("Collectible {} picked up for {} points", id, points);
        state.events.push(GameEvent::CollectiblePicked { id, points });
        state.award(points);
    }
}

/// Answer the restart prompt. Returns the phase the round ends up in.
pub fn confirm_restart(state: &mut GameState, restart: bool, now_second: u64) -> GamePhase {
    if state.phase != GamePhase::AwaitingRestartConfirmation {
        return state.phase;
    }

    match (state.rules.restart_policy, restart) {
        (_, true) | (RestartPolicy::AlwaysReset, false) => state.reset(now_second),
        (RestartPolicy::RespectAnswer, false) => {
            log::info!(
                "Restart declined, halting (score {}, top score {})",
                state.score,
                state.top_score
            );
            state.phase = GamePhase::Halted;
            state.events.push(GameEvent::Halted);
        }
    }
    state.phase
}
