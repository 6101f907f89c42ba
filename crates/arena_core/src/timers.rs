//! Deferred work as explicit events on the sim clock.
//!
//! Cooldown releases, respawns, chase decay and the missile re-target
//! cadence all go through this queue. Nothing in the crate touches wall
//! clocks; the only time source is the `dt` fed into each tick, so tests
//! drive every delay by stepping.

use crate::actor::{ActorId, EnemyKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Which archetype a respawn refills. Ground slots re-pick tank vs super
/// tank at fire time so the mix tracks the current difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSlot {
    Ground,
    Ufo,
    Missile,
}

impl SpawnSlot {
    pub fn of(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Tank | EnemyKind::SuperTank => SpawnSlot::Ground,
            EnemyKind::Ufo => SpawnSlot::Ufo,
            EnemyKind::Missile => SpawnSlot::Missile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// An enemy's shot cooldown elapsed.
    CooldownReady(ActorId),
    PlayerCooldownReady,
    /// The chase latch for this enemy runs out.
    ChaseDecay(ActorId),
    /// A homing missile re-plans toward the player.
    Retarget(ActorId),
    /// Refill a slot emptied by a kill.
    Respawn(SpawnSlot),
    /// The one extra tank scheduled when play begins.
    Reinforce,
}

#[derive(Debug, Clone)]
struct Entry {
    at: f64,
    seq: u64,
    handle: TimerHandle,
    event: TimerEvent,
}

#[derive(Debug, Default)]
pub struct Timers {
    entries: Vec<Entry>,
    next: u64,
}

impl Timers {
    pub fn schedule(&mut self, at: f64, event: TimerEvent) -> TimerHandle {
        self.next += 1;
        let handle = TimerHandle(self.next);
        self.entries.push(Entry { at, seq: self.next, handle, event });
        handle
    }

    /// Drop a pending entry. No-op once it has fired; re-arming is cancel
    /// plus schedule, so the latest arm wins.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        before != self.entries.len()
    }

    /// Remove and return everything due by `now`, ordered by (fire time,
    /// schedule order) so same-tick events stay deterministic.
    pub fn drain_due(&mut self, now: f64) -> Vec<TimerEvent> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].at <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.at.total_cmp(&b.at).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.event).collect()
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}
