//! Runtime entity types: enemies, the player, obstacles and projectiles.

use crate::action::Action;
use crate::geom::{self, Aabb};
use crate::timers::TimerHandle;
use data_runtime::specs::enemies::EnemyTuning;
use glam::{Quat, Vec3};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Tank,
    SuperTank,
    Ufo,
    Missile,
}

/// The real behavioral forks between archetypes. Everything else about an
/// archetype is tuning data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    /// Wanders, latches onto the player in range and plans shots.
    Assault,
    /// Never shoots; drifts on its own wander and gets pushed back inside
    /// the containment bound.
    Roam,
    /// Is itself the projectile: re-plans toward the player on a timer
    /// cadence and detonates on contact.
    Home,
}

impl EnemyKind {
    pub fn behavior(self) -> Behavior {
        match self {
            EnemyKind::Tank | EnemyKind::SuperTank => Behavior::Assault,
            EnemyKind::Ufo => Behavior::Roam,
            EnemyKind::Missile => Behavior::Home,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EnemyKind::Tank => "tank",
            EnemyKind::SuperTank => "super_tank",
            EnemyKind::Ufo => "ufo",
            EnemyKind::Missile => "missile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub hp: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { hp: max, max }
    }

    /// Clamp at zero. Returns `true` only on the application that reached
    /// zero; repeats at zero stay `false` so death triggers exactly once.
    pub fn damage(&mut self, amount: i32) -> bool {
        let was_alive = self.hp > 0;
        self.hp = (self.hp - amount).max(0);
        was_alive && self.hp == 0
    }

    pub fn alive(&self) -> bool {
        self.hp > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: ActorId,
    pub kind: EnemyKind,
    pub tuning: EnemyTuning,
    pub pos: Vec3,
    /// Accumulated yaw, wrapped to [0, 2pi). Kept alongside `rot` because
    /// the quaternion only ever moves in increments and the transform alone
    /// does not give the absolute angle back; `rotate_step` is the one place
    /// both change.
    pub heading: f32,
    pub rot: Quat,
    /// Signed rad/s while a turn is in progress, `None` otherwise. Movement
    /// integration is skipped while this is set.
    pub yaw_rate: Option<f32>,
    pub vel: Vec3,
    pub half: Vec3,
    pub alive: bool,
    pub queue: VecDeque<Action>,
    pub targeting: bool,
    pub cooling: bool,
    pub chasing: bool,
    pub chase_decay: Option<TimerHandle>,
    /// Position at the start of the last integration, for guard rollback.
    pub prev_pos: Vec3,
}

impl Enemy {
    pub fn new(id: ActorId, kind: EnemyKind, tuning: EnemyTuning, pos: Vec3) -> Self {
        let half = Vec3::from(tuning.half_extents);
        Self {
            id,
            kind,
            tuning,
            pos,
            heading: 0.0,
            rot: Quat::IDENTITY,
            yaw_rate: None,
            vel: Vec3::ZERO,
            half,
            alive: true,
            queue: VecDeque::new(),
            targeting: false,
            cooling: false,
            chasing: false,
            chase_decay: None,
            prev_pos: pos,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::centered(self.pos, self.half)
    }

    pub fn aabb_at(&self, pos: Vec3) -> Aabb {
        Aabb::centered(pos, self.half)
    }

    pub fn muzzle(&self) -> Vec3 {
        geom::muzzle_dir(self.heading)
    }

    /// One rotate increment about +Y. The only mutation point for `rot` and
    /// `heading`, so the pair cannot drift apart unnoticed.
    pub fn rotate_step(&mut self, dyaw: f32) {
        self.rot = Quat::from_rotation_y(dyaw) * self.rot;
        self.heading = geom::wrap_heading(self.heading + dyaw);
        debug_assert!(
            geom::wrap_angle(self.derived_heading() - self.heading).abs() < 1e-3,
            "heading {} drifted from transform {}",
            self.heading,
            self.derived_heading()
        );
    }

    /// Land exactly on `target`, absorbing float drift from the increments.
    pub fn snap_heading(&mut self, target: f32) {
        let residual = geom::wrap_angle(target - self.heading);
        self.rot = Quat::from_rotation_y(residual) * self.rot;
        self.heading = geom::wrap_heading(target);
        debug_assert!(geom::wrap_angle(self.derived_heading() - self.heading).abs() < 1e-3);
    }

    fn derived_heading(&self) -> f32 {
        let f = self.rot * Vec3::NEG_Z;
        geom::wrap_heading((-f.x).atan2(-f.z))
    }

    /// Drop the whole plan and stop. Queued intents imply motion, so the yaw
    /// rate and velocity go with them.
    pub fn clear_plan(&mut self) {
        self.queue.clear();
        self.vel = Vec3::ZERO;
        self.yaw_rate = None;
    }

    pub fn plan_rotate(&mut self, target: f32) {
        self.queue.push_back(Action::Rotate { target });
    }

    /// Queue rotate-then-drive to `dest`. A zero-length request is dropped
    /// silently.
    pub fn plan_move_to(&mut self, dest: Vec3) {
        let d = dest - self.pos;
        if d.length_squared() <= 1e-12 {
            return;
        }
        self.plan_rotate(geom::heading_to(self.pos, dest));
        self.vel = d.normalize() * self.tuning.move_speed;
        self.queue.push_back(Action::Move { dest });
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec3,
    pub half: Vec3,
    pub health: Health,
    pub cooling: bool,
}

impl Player {
    pub fn aabb(&self) -> Aabb {
        Aabb::centered(self.pos, self.half)
    }
}

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub pos: Vec3,
    pub half: Vec3,
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::centered(self.pos, self.half)
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner: Side,
    pub pos: Vec3,
    pub vel: Vec3,
    pub spawn_pos: Vec3,
    /// Horizontal travel budget; crossing it removes the round.
    pub range: f32,
    pub half: Vec3,
}

impl Projectile {
    pub fn aabb(&self) -> Aabb {
        Aabb::centered(self.pos, self.half)
    }

    pub fn traveled_xz(&self) -> f32 {
        geom::dist_xz(self.pos, self.spawn_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_runtime::specs::enemies::EnemySpecDb;
    use glam::vec3;
    use std::f32::consts::PI;

    fn tank(pos: Vec3) -> Enemy {
        Enemy::new(ActorId(1), EnemyKind::Tank, EnemySpecDb::default().tank, pos)
    }

    #[test]
    fn health_clamps_and_triggers_once() {
        let mut h = Health::new(5);
        assert!(!h.damage(2));
        assert!(!h.damage(2));
        assert!(h.damage(2), "the crossing to zero is the trigger");
        assert_eq!(h.hp, 0);
        assert!(!h.damage(2), "already at zero; no second trigger");
        assert_eq!(h.hp, 0);
    }

    #[test]
    fn rotate_steps_keep_heading_and_transform_in_sync() {
        let mut e = tank(Vec3::ZERO);
        for _ in 0..100 {
            e.rotate_step(0.07);
        }
        // The debug_assert inside rotate_step is the real check; make sure a
        // long run of increments still lands where the bookkeeping says.
        let f = e.rot * Vec3::NEG_Z;
        let derived = geom::wrap_heading((-f.x).atan2(-f.z));
        assert!(geom::wrap_angle(derived - e.heading).abs() < 1e-3);
    }

    #[test]
    fn snap_lands_exactly() {
        let mut e = tank(Vec3::ZERO);
        e.rotate_step(1.0);
        e.snap_heading(PI / 3.0);
        assert_eq!(e.heading, geom::wrap_heading(PI / 3.0));
    }

    #[test]
    fn clear_plan_resets_motion() {
        let mut e = tank(Vec3::ZERO);
        e.plan_move_to(vec3(10.0, 0.0, 10.0));
        e.yaw_rate = Some(1.0);
        assert!(!e.queue.is_empty());
        e.clear_plan();
        assert!(e.queue.is_empty());
        assert_eq!(e.vel, Vec3::ZERO);
        assert!(e.yaw_rate.is_none());
    }

    #[test]
    fn zero_length_move_is_dropped() {
        let mut e = tank(vec3(4.0, 0.0, -4.0));
        e.plan_move_to(vec3(4.0, 0.0, -4.0));
        assert!(e.queue.is_empty());
        assert_eq!(e.vel, Vec3::ZERO);
    }

    #[test]
    fn move_plan_rotates_first_and_sets_velocity() {
        let mut e = tank(Vec3::ZERO);
        e.plan_move_to(vec3(0.0, 0.0, -20.0));
        assert!(matches!(e.queue.front(), Some(Action::Rotate { .. })));
        assert!(matches!(e.queue.get(1), Some(Action::Move { .. })));
        assert!((e.vel.length() - e.tuning.move_speed).abs() < 1e-4);
    }
}
