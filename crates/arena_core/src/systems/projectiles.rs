//! Projectile flight and range expiry.

use crate::{ArenaState, GameEvent};
use crate::systems::TickCtx;

/// Advance every round and mark the ones whose horizontal travel crossed
/// their range. Marked rounds are removed in cleanup and their contacts are
/// void for the rest of the tick, so expiry can never double with an impact.
pub fn integrate(srv: &mut ArenaState, ctx: &mut TickCtx) {
    for p in &mut srv.projectiles {
        p.pos += p.vel * ctx.dt;
        if p.traveled_xz() > p.range {
            ctx.expired.insert(p.id);
        }
    }
    for id in &ctx.expired {
        srv.events.push(GameEvent::ProjectileExpired { id: *id });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::actor::Side;
    use crate::scoreboard::MemoryScores;
    use glam::{Vec3, vec3};

    #[test]
    fn rounds_fly_straight_and_expire_once() {
        let mut srv = ArenaState::with_seed(Box::new(MemoryScores::default()), 1);
        srv.begin_empty_play();
        let id = srv.push_projectile(Vec3::ZERO, vec3(0.0, 0.0, -180.0), 150.0, Side::Enemy);

        let dt = 1.0 / 60.0;
        let mut expiries = 0;
        for _ in 0..120 {
            srv.step(dt);
            expiries += srv
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::ProjectileExpired { id: eid } if *eid == id))
                .count();
        }
        assert_eq!(expiries, 1, "exactly one expiry event");
        assert!(
            srv.projectiles.iter().all(|p| p.id != id),
            "expired round is removed"
        );
    }
}
