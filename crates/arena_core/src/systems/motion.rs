//! Action head execution and guarded movement integration.
//!
//! One head per enemy per tick. Turning always wins over driving: while a
//! yaw rate is set the integrator leaves the position alone, so a tank never
//! slides sideways through a turn.

use crate::ArenaState;
use crate::action::Action;
use crate::actor::Enemy;
use crate::geom;
use crate::systems::TickCtx;
use glam::Vec3;

/// Squared arrival window for `Move` heads.
const ARRIVE_EPS_SQ: f32 = 0.01;

pub fn resolve_actions(srv: &mut ArenaState, ctx: &mut TickCtx) {
    let backtrack = srv.cfg.backtrack_dist;
    for i in 0..srv.enemies.len() {
        let e = &mut srv.enemies[i];
        if !e.alive {
            continue;
        }
        let Some(head) = e.queue.front().copied() else {
            continue;
        };
        match head {
            Action::Rotate { target } => rotate_toward(e, target, ctx.dt),
            Action::Move { dest } => {
                if arrived(e.pos, dest, e.vel) {
                    e.pos = dest;
                    e.vel = Vec3::ZERO;
                    e.queue.pop_front();
                    aim_at_head(e);
                }
            }
            Action::Shoot => {
                e.queue.pop_front();
                ctx.shots.push(e.id);
            }
            Action::StartTargeting => {
                e.targeting = true;
                e.queue.pop_front();
            }
            Action::EndTargeting => {
                e.targeting = false;
                e.queue.pop_front();
            }
            Action::Idle { .. } => {
                if let Some(Action::Idle { remaining_s }) = e.queue.front_mut() {
                    *remaining_s -= ctx.dt;
                    if *remaining_s <= 0.0 {
                        e.queue.pop_front();
                    }
                }
            }
            Action::AvoidObstacle => {
                // Back straight out, no turn; reuse the Move arrival logic.
                let back = e.muzzle();
                let dest = e.pos - back * backtrack;
                e.vel = -back * e.tuning.move_speed;
                e.queue.pop_front();
                e.queue.push_front(Action::Move { dest });
            }
        }
    }
}

/// Step the yaw toward `target`, shortest way. Inside one increment the
/// heading snaps onto the target exactly and the turn ends.
fn rotate_toward(e: &mut Enemy, target: f32, dt: f32) {
    let diff = geom::wrap_angle(target - e.heading);
    let step = e.tuning.turn_speed * dt;
    if diff.abs() <= step {
        e.snap_heading(target);
        e.yaw_rate = None;
        e.queue.pop_front();
        aim_at_head(e);
    } else {
        e.rotate_step(step.copysign(diff));
        e.yaw_rate = Some(e.tuning.turn_speed.copysign(diff));
    }
}

/// Point the velocity at the head `Move`'s own destination. A waypoint
/// appended mid-turn leaves `vel` aimed at the newest leg; re-deriving here
/// keeps each leg driving toward the destination its arrival is measured
/// against. A zero-length leg keeps its velocity and arrives immediately.
fn aim_at_head(e: &mut Enemy) {
    if let Some(Action::Move { dest }) = e.queue.front().copied()
        && let Some(dir) = (dest - e.pos).try_normalize()
    {
        e.vel = dir * e.tuning.move_speed;
    }
}

/// Inside the window, or already past the point along the travel direction.
/// The overrun case matters for fast movers whose per-tick step is wider
/// than the window.
fn arrived(pos: Vec3, dest: Vec3, vel: Vec3) -> bool {
    let to = dest - pos;
    if to.length_squared() <= ARRIVE_EPS_SQ {
        return true;
    }
    vel != Vec3::ZERO && to.dot(vel) <= 0.0
}

/// Integrate positions and roll back anything that ended up inside an
/// obstacle (or the player, for armor that collides with it). A rolled-back
/// `Move` plan is replaced with a reverse maneuver. `Shoot` heads never
/// reach the guard; they resolve earlier in the same tick.
pub fn integrate_and_guard(srv: &mut ArenaState, ctx: &mut TickCtx) {
    for i in 0..srv.enemies.len() {
        let e = &mut srv.enemies[i];
        if !e.alive {
            continue;
        }
        e.prev_pos = e.pos;
        if e.yaw_rate.is_some() || e.vel == Vec3::ZERO {
            continue;
        }
        e.pos += e.vel * ctx.dt;

        let bb = e.aabb();
        let mut blocked = srv.obstacles.iter().any(|o| bb.overlaps(&o.aabb()));
        if !blocked && e.tuning.collides_with_player {
            blocked = bb.overlaps(&srv.player.aabb());
        }
        if blocked {
            e.pos = e.prev_pos;
            if matches!(e.queue.front(), Some(Action::Move { .. })) {
                e.clear_plan();
                e.queue.push_back(Action::AvoidObstacle);
            }
        }
    }
}
