//! Per-tick enemy decisions.
//!
//! Assault armor rolls for a shot or wanders; roamers only wander, with the
//! containment bound pulling them back toward the middle; homing missiles do
//! not decide here at all, their re-planning rides the retarget timer.

use crate::ArenaState;
use crate::action::Action;
use crate::actor::Behavior;
use crate::geom::{self, Aabb};
use crate::systems::TickCtx;
use crate::timers::TimerEvent;
use glam::Vec3;
use rand::Rng;

pub fn decide(srv: &mut ArenaState, ctx: &mut TickCtx) {
    let player_pos = srv.player.pos;
    for i in 0..srv.enemies.len() {
        if !srv.enemies[i].alive {
            continue;
        }
        match srv.enemies[i].kind.behavior() {
            Behavior::Assault => decide_assault(srv, i, player_pos, ctx.now),
            Behavior::Roam => decide_roam(srv, i, player_pos),
            Behavior::Home => {}
        }
    }
}

fn decide_assault(srv: &mut ArenaState, i: usize, player_pos: Vec3, now: f64) {
    let dist = srv.enemies[i].pos.distance(player_pos);
    let in_range = dist <= srv.enemies[i].tuning.shoot_range;
    if in_range {
        // Latch and re-arm the decay; the newest sighting wins.
        let id = srv.enemies[i].id;
        let decay_at = now + f64::from(srv.cfg.chase_decay_s);
        if let Some(h) = srv.enemies[i].chase_decay.take() {
            srv.timers.cancel(h);
        }
        let handle = srv.timers.schedule(decay_at, TimerEvent::ChaseDecay(id));
        let e = &mut srv.enemies[i];
        e.chasing = true;
        e.chase_decay = Some(handle);
    }

    let roll: f32 = srv.rng.random();
    let e = &srv.enemies[i];
    let eligible = in_range && !e.cooling && !e.targeting && e.tuning.engages;
    if eligible && (roll < e.tuning.shoot_chance || e.chasing) {
        let idle_s =
            if e.chasing { srv.cfg.idle_chasing_s } else { srv.cfg.idle_after_shot_s };
        let aim = geom::heading_to(e.pos, player_pos);
        let e = &mut srv.enemies[i];
        e.clear_plan();
        e.queue.push_back(Action::StartTargeting);
        e.plan_rotate(aim);
        e.queue.push_back(Action::Shoot);
        e.queue.push_back(Action::EndTargeting);
        e.queue.push_back(Action::Idle { remaining_s: idle_s });
    } else if srv.enemies[i].queue.is_empty() {
        plan_wander(srv, i, player_pos);
    }
}

fn decide_roam(srv: &mut ArenaState, i: usize, player_pos: Vec3) {
    if !srv.enemies[i].queue.is_empty() {
        return;
    }
    plan_wander(srv, i, player_pos);
}

/// Pick the next wander leg. While chasing (or on the approach roll) the leg
/// aims one standoff past the player along the line of sight, which orbits
/// the actor at range instead of parking it in melee. Otherwise a small
/// random offset, positive on both axes.
fn plan_wander(srv: &mut ArenaState, i: usize, player_pos: Vec3) {
    let bound = srv.cfg.containment_bound;
    let pos = srv.enemies[i].pos;
    if pos.x.abs() > bound || pos.z.abs() > bound {
        srv.enemies[i].plan_move_to(Vec3::ZERO);
        return;
    }

    for _ in 0..srv.cfg.wander_retry_cap {
        let chasing = srv.enemies[i].chasing;
        let approach_chance = srv.enemies[i].tuning.approach_chance;
        let standoff = srv.enemies[i].tuning.standoff;
        let half = srv.enemies[i].half;
        let dest = if chasing || srv.rng.random::<f32>() < approach_chance {
            player_pos + (player_pos - pos).normalize_or_zero() * standoff
        } else {
            pos + Vec3::new(
                srv.rng.random_range(5.0..10.0),
                0.0,
                srv.rng.random_range(5.0..10.0),
            )
        };
        let bb = Aabb::centered(dest, half);
        if !srv.obstacles.iter().any(|o| bb.overlaps(&o.aabb())) {
            srv.enemies[i].plan_move_to(dest);
            return;
        }
    }
    // Every candidate clipped an obstacle; sit this tick out.
}
