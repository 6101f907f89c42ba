//! Action plans: the FIFO of intents one enemy works through.
//!
//! Only the head of a queue is ever executed, one head per tick. `Rotate`
//! resolves before any movement does, `Idle` burns time in place, and
//! `AvoidObstacle` is substituted by the collision guard when a plan drives
//! into something solid.

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Turn the short way onto an absolute yaw.
    Rotate { target: f32 },
    /// Drive to a point; arrival snaps onto it exactly.
    Move { dest: Vec3 },
    Shoot,
    StartTargeting,
    EndTargeting,
    /// Hold position while the timer runs down.
    Idle { remaining_s: f32 },
    /// Back straight out along the reverse of the current heading.
    AvoidObstacle,
}
