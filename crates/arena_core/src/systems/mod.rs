//! Per-tick systems, run in a fixed order from [`crate::ArenaState::step`]:
//! decisions, action heads, guarded integration, projectile flight, overlap
//! evaluation, combat dispatch.

use crate::actor::{ActorId, ProjectileId};
use crate::overlap::Contact;
use std::collections::HashSet;

pub mod ai;
pub mod combat;
pub mod motion;
pub mod projectiles;

/// Buses shared by the systems of one tick.
pub struct TickCtx {
    pub dt: f32,
    pub now: f64,
    /// Enemies whose `Shoot` head resolved this tick.
    pub shots: Vec<ActorId>,
    /// Fresh contacts reported by the overlap pass.
    pub contacts: Vec<Contact>,
    /// Rounds whose range elapsed this tick; their contacts are void.
    pub expired: HashSet<ProjectileId>,
    /// Rounds consumed by combat this tick.
    pub consumed: HashSet<ProjectileId>,
}

impl TickCtx {
    pub fn new(dt: f32, now: f64) -> Self {
        Self {
            dt,
            now,
            shots: Vec::new(),
            contacts: Vec::new(),
            expired: HashSet::new(),
            consumed: HashSet::new(),
        }
    }
}
