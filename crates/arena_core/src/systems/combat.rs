//! Contact resolution: kills, score awards, player damage and respawn
//! scheduling.
//!
//! Contacts arrive from the overlap pass already edge-triggered. Resolution
//! runs them in registration order; a round whose impactor died or expired
//! earlier in the same tick burns with no effect.

use crate::actor::EnemyKind;
use crate::overlap::{Impactor, Target};
use crate::systems::TickCtx;
use crate::timers::{SpawnSlot, TimerEvent};
use crate::{ArenaState, GameEvent};
use rand::Rng;

pub fn resolve(srv: &mut ArenaState, ctx: &mut TickCtx) {
    let contacts = std::mem::take(&mut ctx.contacts);
    for c in contacts {
        if !impactor_live(srv, ctx, &c.impactor) {
            continue;
        }
        match c.target {
            Target::Enemy(id) => hit_enemy(srv, id),
            Target::Player => hit_player(srv, &c.impactor),
            // Obstacles soak rounds; the consume below is the whole effect.
            Target::Obstacle(_) => {}
        }
        if let Impactor::Projectile(pid) = c.impactor {
            ctx.consumed.insert(pid);
        }
    }
}

fn impactor_live(srv: &ArenaState, ctx: &TickCtx, imp: &Impactor) -> bool {
    match imp {
        Impactor::Projectile(pid) => !ctx.expired.contains(pid) && !ctx.consumed.contains(pid),
        Impactor::MissileBody(aid) => srv.enemy(*aid).is_some_and(|e| e.alive),
    }
}

fn hit_enemy(srv: &mut ArenaState, id: crate::actor::ActorId) {
    // Another round may have killed this enemy earlier in the tick; the
    // late one burns with nothing left to credit.
    let Some((kind, points)) = srv
        .enemies
        .iter()
        .find(|e| e.id == id && e.alive)
        .map(|e| (e.kind, e.tuning.points))
    else {
        return;
    };
    srv.kill_enemy(id);
    srv.award(points);
    let at = match kind {
        EnemyKind::Ufo => {
            let lo = srv.cfg.ufo_respawn_min_s;
            let hi = srv.cfg.ufo_respawn_max_s;
            srv.time_s + f64::from(srv.rng.random_range(lo..hi))
        }
        EnemyKind::Tank | EnemyKind::SuperTank => {
            srv.difficulty += srv.cfg.difficulty_per_kill;
            log::debug!(
                "ground kill: difficulty {:.1}, next respawn in {:.1}s",
                srv.difficulty,
                srv.respawn_delay()
            );
            srv.time_s + f64::from(srv.respawn_delay())
        }
        EnemyKind::Missile => srv.time_s + f64::from(srv.respawn_delay()),
    };
    srv.timers.schedule(at, TimerEvent::Respawn(SpawnSlot::of(kind)));
}

fn hit_player(srv: &mut ArenaState, imp: &Impactor) {
    let amount = match imp {
        Impactor::MissileBody(aid) => {
            // The ram kills the missile too and refills its slot like any
            // other loss, but awards nothing.
            srv.kill_enemy(*aid);
            let at = srv.time_s + f64::from(srv.respawn_delay());
            srv.timers
                .schedule(at, TimerEvent::Respawn(SpawnSlot::Missile));
            srv.cfg.missile_damage
        }
        Impactor::Projectile(_) => srv.cfg.bullet_damage,
    };
    let died = srv.player.health.damage(amount);
    let hp = srv.player.health.hp;
    srv.events.push(GameEvent::PlayerDamaged { amount, hp });
    metrics::counter!("combat.player_hits").increment(1);
    if died {
        srv.on_player_death();
    }
}
