//! Timed successor spawning
//!
//! Every mover and collectible schedules exactly one successor when it is
//! created. Timers live here, ordered by due second, instead of being polled
//! on each entity, so a timer still fires after its parent's slot is reused.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::EntityKind;
use crate::consts::{SPAWN_COLUMNS, VALID_ROWS};

/// How a due second is compared against the current second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpawnTrigger {
    /// Fire once the current second reaches or passes the due second
    #[default]
    AtOrAfter,
    /// Fire only on the exact due second; a skipped second loses the spawn
    Exact,
}

/// A pending successor spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub due: u64,
    pub kind: EntityKind,
    /// Id of the entity that owns this timer
    pub parent: u32,
    seq: u64,
}

impl SpawnTimer {
    fn key(&self) -> (u64, u64) {
        (self.due, self.seq)
    }
}

/// Result of draining the queue for one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DueTimers {
    /// Timers that should spawn now
    pub fired: Vec<SpawnTimer>,
    /// Timers whose second passed without firing (exact trigger only)
    pub missed: Vec<SpawnTimer>,
}

/// Queue of spawn timers, earliest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Sorted by (due, seq) descending so the earliest timer pops off the end
    queue: Vec<SpawnTimer>,
    next_seq: u64,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: u64, kind: EntityKind, parent: u32) {
        let timer = SpawnTimer {
            due,
            kind,
            parent,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        let key = timer.key();
        let at = self.queue.partition_point(|t| t.key() > key);
        self.queue.insert(at, timer);
    }

    /// Pop every timer due at or before `now_second`
    pub fn drain_due(&mut self, now_second: u64, trigger: SpawnTrigger) -> DueTimers {
        let mut due = DueTimers::default();
        while let Some(timer) = self.queue.last().copied() {
            if timer.due > now_second {
                break;
            }
            self.queue.pop();
            match trigger {
                SpawnTrigger::Exact if timer.due < now_second => due.missed.push(timer),
                _ => due.fired.push(timer),
            }
        }
        due
    }

    /// Earliest due second, if any timer is pending
    pub fn next_due(&self) -> Option<u64> {
        self.queue.last().map(|t| t.due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

/// Pick an off-screen spawn point on a random lane
pub fn random_spawn_point(rng: &mut impl Rng) -> Vec2 {
    let x = SPAWN_COLUMNS[rng.random_range(0..SPAWN_COLUMNS.len())];
    let y = VALID_ROWS[rng.random_range(0..VALID_ROWS.len())];
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_drains_in_due_order() {
        let mut sched = SpawnScheduler::new();
        sched.schedule(12, EntityKind::Mover, 1);
        sched.schedule(10, EntityKind::Collectible, 2);
        sched.schedule(10, EntityKind::Mover, 3);
        sched.schedule(15, EntityKind::Mover, 4);
        assert_eq!(sched.next_due(), Some(10));

        let due = sched.drain_due(12, SpawnTrigger::AtOrAfter);
        let parents: Vec<u32> = due.fired.iter().map(|t| t.parent).collect();
        // Same-second timers keep scheduling order
        assert_eq!(parents, vec![2, 3, 1]);
        assert!(due.missed.is_empty());
        assert_eq!(sched.len(), 1);
        assert_eq!(sched.next_due(), Some(15));
    }

    #[test]
    fn test_nothing_due_yet() {
        let mut sched = SpawnScheduler::new();
        sched.schedule(20, EntityKind::Mover, 1);
        let due = sched.drain_due(19, SpawnTrigger::AtOrAfter);
        assert!(due.fired.is_empty());
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn test_exact_trigger_drops_skipped_seconds() {
        let mut sched = SpawnScheduler::new();
        sched.schedule(10, EntityKind::Mover, 1);
        sched.schedule(11, EntityKind::Mover, 2);

        let due = sched.drain_due(11, SpawnTrigger::Exact);
        assert_eq!(due.missed.len(), 1);
        assert_eq!(due.missed[0].parent, 1);
        assert_eq!(due.fired.len(), 1);
        assert_eq!(due.fired[0].parent, 2);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_spawn_points_on_lanes() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen_columns = [false; 2];
        for _ in 0..100 {
            let p = random_spawn_point(&mut rng);
            assert!(VALID_ROWS.contains(&p.y));
            let col = SPAWN_COLUMNS.iter().position(|&x| x == p.x);
            assert!(col.is_some());
            if let Some(col) = col {
                seen_columns[col] = true;
            }
        }
        assert_eq!(seen_columns, [true, true]);
    }
}
