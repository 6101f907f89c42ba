//! Pairwise overlap watches with edge-triggered reporting.
//!
//! A watch pairs an impactor (a flying round, or a homing missile body) with
//! exactly one target. Evaluation reports only fresh contacts: a pair that
//! stays overlapped keeps quiet until it separates and meets again. In
//! practice that second meeting never matters because combat consumes the
//! impactor on the first report.

use crate::actor::{ActorId, Enemy, Obstacle, ObstacleId, Player, Projectile, ProjectileId};
use crate::geom::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Impactor {
    Projectile(ProjectileId),
    MissileBody(ActorId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Enemy(ActorId),
    Obstacle(ObstacleId),
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub impactor: Impactor,
    pub target: Target,
}

#[derive(Debug, Clone, Copy)]
struct Watch {
    impactor: Impactor,
    target: Target,
    was: bool,
}

#[derive(Debug, Default)]
pub struct Overlaps {
    watches: Vec<Watch>,
}

impl Overlaps {
    pub fn watch(&mut self, impactor: Impactor, target: Target) {
        self.watches.push(Watch { impactor, target, was: false });
    }

    /// Test every watch against current boxes and report fresh contacts in
    /// registration order.
    pub fn evaluate(
        &mut self,
        projectiles: &[Projectile],
        enemies: &[Enemy],
        obstacles: &[Obstacle],
        player: &Player,
    ) -> Vec<Contact> {
        let mut out = Vec::new();
        for w in &mut self.watches {
            let Some(a) = impactor_box(w.impactor, projectiles, enemies) else {
                continue;
            };
            let Some(b) = target_box(w.target, enemies, obstacles, player) else {
                continue;
            };
            let now = a.overlaps(&b);
            if now && !w.was {
                out.push(Contact { impactor: w.impactor, target: w.target });
            }
            w.was = now;
        }
        out
    }

    /// Drop watches whose impactor or enemy target is gone.
    pub fn sweep(&mut self, projectiles: &[Projectile], enemies: &[Enemy]) {
        self.watches.retain(|w| {
            let impactor_live = match w.impactor {
                Impactor::Projectile(pid) => projectiles.iter().any(|p| p.id == pid),
                Impactor::MissileBody(aid) => enemies.iter().any(|e| e.id == aid && e.alive),
            };
            let target_live = match w.target {
                Target::Enemy(aid) => enemies.iter().any(|e| e.id == aid && e.alive),
                Target::Obstacle(_) | Target::Player => true,
            };
            impactor_live && target_live
        });
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }
}

fn impactor_box(i: Impactor, projectiles: &[Projectile], enemies: &[Enemy]) -> Option<Aabb> {
    match i {
        Impactor::Projectile(pid) => projectiles.iter().find(|p| p.id == pid).map(|p| p.aabb()),
        Impactor::MissileBody(aid) => {
            enemies.iter().find(|e| e.id == aid && e.alive).map(|e| e.aabb())
        }
    }
}

fn target_box(
    t: Target,
    enemies: &[Enemy],
    obstacles: &[Obstacle],
    player: &Player,
) -> Option<Aabb> {
    match t {
        Target::Enemy(aid) => enemies.iter().find(|e| e.id == aid && e.alive).map(|e| e.aabb()),
        Target::Obstacle(oid) => obstacles.iter().find(|o| o.id == oid).map(|o| o.aabb()),
        Target::Player => Some(player.aabb()),
    }
}
