//! Authoritative arena simulation: enemy AI, fire control, movement and
//! combat resolution advanced by a fixed-order tick.
//!
//! Hosts construct an [`ArenaState`] around a [`scoreboard::ScoreStore`],
//! call [`ArenaState::begin_play`], then drive it with [`ArenaState::step`]
//! plus the player intents ([`ArenaState::move_player`],
//! [`ArenaState::player_fire`]) and read results back through the accessors
//! and [`ArenaState::drain_events`]. Nothing here touches a wall clock or a
//! frame; all timing flows from the `dt` handed to `step`.

#![forbid(unsafe_code)]

pub mod action;
pub mod actor;
pub mod geom;
pub mod overlap;
pub mod scoreboard;
pub mod systems;
pub mod timers;

use crate::action::Action;
use crate::actor::{
    ActorId, Enemy, EnemyKind, Health, Obstacle, ObstacleId, Player, Projectile, ProjectileId,
    Side,
};
use crate::geom::Aabb;
use crate::overlap::{Impactor, Overlaps, Target};
use crate::scoreboard::{ScoreStore, Scoreboard};
use crate::systems::TickCtx;
use crate::timers::{SpawnSlot, TimerEvent, Timers};
use anyhow::ensure;
use data_runtime::configs::gameplay::GameplayCfg;
use data_runtime::specs::enemies::{EnemySpecDb, EnemyTuning};
use glam::{Vec3, vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Attempts at a clear random spawn position before giving up for this
/// spawn. A skipped spawn is retried by the next timer that refills the
/// slot, so the field can run one short but never deadlocks.
const SPAWN_TRIES: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lobby,
    Playing,
    Death,
}

/// Everything observable that happened during a tick, drained by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ShotFired { pos: Vec3, by: Side },
    DestroyBurst { pos: Vec3, kind: EnemyKind },
    PlayerDamaged { amount: i32, hp: i32 },
    PlayerDied,
    ProjectileExpired { id: ProjectileId },
    ScoreChanged { score: u32 },
    BestScore { best: u32 },
}

pub struct ArenaState {
    pub cfg: GameplayCfg,
    pub specs: EnemySpecDb,
    pub time_s: f64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    pub timers: Timers,
    pub overlaps: Overlaps,
    pub events: Vec<GameEvent>,
    pub rng: SmallRng,
    pub(crate) phase: Phase,
    pub(crate) difficulty: f32,
    pub(crate) scoreboard: Scoreboard,
    next_enemy: u32,
    next_projectile: u32,
    next_obstacle: u32,
}

impl ArenaState {
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        Self::build(store, SmallRng::from_os_rng())
    }

    /// Same state but with a seeded generator, for reproducible runs.
    pub fn with_seed(store: Box<dyn ScoreStore>, seed: u64) -> Self {
        Self::build(store, SmallRng::seed_from_u64(seed))
    }

    fn build(store: Box<dyn ScoreStore>, rng: SmallRng) -> Self {
        let cfg = data_runtime::configs::gameplay::load_default().unwrap_or_else(|e| {
            log::warn!("gameplay config unavailable ({e:#}); using defaults");
            GameplayCfg::default()
        });
        let specs = data_runtime::specs::enemies::load_default().unwrap_or_else(|e| {
            log::warn!("enemy specs unavailable ({e:#}); using defaults");
            EnemySpecDb::default()
        });
        let player = Player {
            pos: Vec3::ZERO,
            half: Vec3::from(cfg.player.half_extents),
            health: Health::new(cfg.player.max_hp),
            cooling: false,
        };
        let difficulty = cfg.initial_difficulty;
        Self {
            cfg,
            specs,
            time_s: 0.0,
            player,
            enemies: Vec::new(),
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            timers: Timers::default(),
            overlaps: Overlaps::default(),
            events: Vec::new(),
            rng,
            phase: Phase::Lobby,
            difficulty,
            scoreboard: Scoreboard::new(store),
            next_enemy: 0,
            next_projectile: 0,
            next_obstacle: 0,
        }
    }

    /// Reset the run and populate the battlefield: the configured obstacle
    /// scatter, the ground mix, one UFO, one missile, and a single delayed
    /// reinforcement tank.
    pub fn begin_play(&mut self) {
        self.reset_run();
        for _ in 0..self.cfg.obstacle_count {
            self.spawn_obstacle();
        }
        for _ in 0..self.cfg.enemy_count {
            let kind = self.pick_ground_kind();
            self.spawn_enemy(kind);
        }
        self.spawn_enemy(EnemyKind::Ufo);
        self.spawn_enemy(EnemyKind::Missile);
        let at = self.time_s + f64::from(self.respawn_delay());
        self.timers.schedule(at, TimerEvent::Reinforce);
        log::info!(
            "arena live: {} enemies, {} obstacles, best {}",
            self.enemies.len(),
            self.obstacles.len(),
            self.scoreboard.best()
        );
    }

    /// Reset the run without populating anything. Callers spawn what they
    /// need, which keeps scripted scenarios deterministic.
    pub fn begin_empty_play(&mut self) {
        self.reset_run();
    }

    fn reset_run(&mut self) {
        self.phase = Phase::Playing;
        self.time_s = 0.0;
        self.difficulty = self.cfg.initial_difficulty;
        self.player = Player {
            pos: Vec3::ZERO,
            half: Vec3::from(self.cfg.player.half_extents),
            health: Health::new(self.cfg.player.max_hp),
            cooling: false,
        };
        self.enemies.clear();
        self.obstacles.clear();
        self.projectiles.clear();
        self.timers = Timers::default();
        self.overlaps = Overlaps::default();
        self.events.clear();
        self.scoreboard.reset_run();
    }

    /// Advance one tick. Outside `Playing` this is a no-op; the world is
    /// frozen in the lobby and after death.
    pub fn step(&mut self, dt: f32) {
        if self.phase != Phase::Playing {
            return;
        }
        let t0 = Instant::now();
        self.time_s += f64::from(dt);
        let mut ctx = TickCtx::new(dt, self.time_s);
        for ev in self.timers.drain_due(self.time_s) {
            self.apply_timer_event(ev);
        }
        systems::ai::decide(self, &mut ctx);
        systems::motion::resolve_actions(self, &mut ctx);
        self.fire_shots(&mut ctx);
        systems::motion::integrate_and_guard(self, &mut ctx);
        systems::projectiles::integrate(self, &mut ctx);
        ctx.contacts =
            self.overlaps
                .evaluate(&self.projectiles, &self.enemies, &self.obstacles, &self.player);
        systems::combat::resolve(self, &mut ctx);
        self.cleanup(&ctx);
        metrics::histogram!("tick.ms").record(t0.elapsed().as_secs_f64() * 1000.0);
    }

    fn apply_timer_event(&mut self, ev: TimerEvent) {
        match ev {
            TimerEvent::CooldownReady(id) => {
                if let Some(e) = self.enemies.iter_mut().find(|e| e.id == id) {
                    e.cooling = false;
                }
            }
            TimerEvent::PlayerCooldownReady => self.player.cooling = false,
            TimerEvent::ChaseDecay(id) => {
                if let Some(e) = self.enemies.iter_mut().find(|e| e.id == id) {
                    e.chasing = false;
                    e.chase_decay = None;
                }
            }
            TimerEvent::Retarget(id) => self.retarget_missile(id),
            TimerEvent::Respawn(slot) => {
                let kind = match slot {
                    SpawnSlot::Ground => self.pick_ground_kind(),
                    SpawnSlot::Ufo => EnemyKind::Ufo,
                    SpawnSlot::Missile => EnemyKind::Missile,
                };
                self.spawn_enemy(kind);
            }
            TimerEvent::Reinforce => {
                let kind = self.pick_ground_kind();
                self.spawn_enemy(kind);
            }
        }
    }

    /// Periodic homing re-plan. A moving missile swaps its whole plan for a
    /// fresh waypoint at the player; one mid-turn keeps the turn and appends
    /// instead, up to the queue cap. Dead missiles let the cadence lapse.
    fn retarget_missile(&mut self, id: ActorId) {
        let player_pos = self.player.pos;
        let cap = self.cfg.missile_queue_cap;
        let Some(e) = self.enemies.iter_mut().find(|e| e.id == id && e.alive) else {
            return;
        };
        if matches!(e.queue.front(), Some(Action::Move { .. })) {
            e.clear_plan();
            e.plan_move_to(player_pos);
        } else if e.queue.len() < cap {
            e.plan_move_to(player_pos);
        }
        let at = self.time_s + f64::from(self.cfg.missile_retarget_s);
        self.timers.schedule(at, TimerEvent::Retarget(id));
    }

    /// Turn the tick's `Shoot` consumptions into live rounds. A shooter whose
    /// barrel is still cooling consumed its action for nothing.
    fn fire_shots(&mut self, ctx: &mut TickCtx) {
        let shots = std::mem::take(&mut ctx.shots);
        for id in shots {
            let Some((pos, dir, speed, range, cooldown)) = self
                .enemies
                .iter_mut()
                .find(|e| e.id == id && e.alive)
                .and_then(|e| {
                    if e.cooling {
                        return None;
                    }
                    e.cooling = true;
                    Some((
                        e.pos,
                        e.muzzle(),
                        e.tuning.bullet_speed,
                        e.tuning.bullet_range,
                        e.tuning.shoot_cooldown_s,
                    ))
                })
            else {
                continue;
            };
            let at = self.time_s + f64::from(cooldown);
            self.timers.schedule(at, TimerEvent::CooldownReady(id));
            let pid = self.push_projectile(pos, dir * speed, range, Side::Enemy);
            self.overlaps.watch(Impactor::Projectile(pid), Target::Player);
            for ob in &self.obstacles {
                self.overlaps
                    .watch(Impactor::Projectile(pid), Target::Obstacle(ob.id));
            }
            self.events.push(GameEvent::ShotFired { pos, by: Side::Enemy });
            metrics::counter!("combat.shots").increment(1);
        }
    }

    /// Player shot intent. Gated on phase and the player's own cooldown; a
    /// zero direction is dropped. The round watches every enemy alive right
    /// now plus the obstacle field.
    pub fn player_fire(&mut self, dir: Vec3) {
        if self.phase != Phase::Playing || self.player.cooling {
            return;
        }
        let Some(dir) = dir.try_normalize() else {
            return;
        };
        self.player.cooling = true;
        let at = self.time_s + f64::from(self.cfg.player.shoot_cooldown_s);
        self.timers.schedule(at, TimerEvent::PlayerCooldownReady);
        let pos = self.player.pos + dir;
        let speed = self.cfg.player.bullet_speed;
        let range = self.cfg.player.bullet_range;
        let pid = self.push_projectile(pos, dir * speed, range, Side::Player);
        for e in &self.enemies {
            if e.alive {
                self.overlaps
                    .watch(Impactor::Projectile(pid), Target::Enemy(e.id));
            }
        }
        for ob in &self.obstacles {
            self.overlaps
                .watch(Impactor::Projectile(pid), Target::Obstacle(ob.id));
        }
        self.events.push(GameEvent::ShotFired { pos, by: Side::Player });
        metrics::counter!("combat.shots").increment(1);
    }

    /// Whether the player's aim ray touches any live enemy. Hosts light the
    /// crosshair off this; it reads nothing but geometry.
    pub fn aim_locked(&self, look_dir: Vec3) -> bool {
        self.enemies
            .iter()
            .any(|e| e.alive && geom::ray_hits_aabb(self.player.pos, look_dir, &e.aabb()))
    }

    /// Player move intent. The move is rejected whole if the body would end
    /// up inside an obstacle.
    pub fn move_player(&mut self, to: Vec3) {
        if self.phase != Phase::Playing {
            return;
        }
        let probe = Aabb::centered(to, self.player.half);
        if self.obstacles.iter().any(|o| probe.overlaps(&o.aabb())) {
            return;
        }
        self.player.pos = to;
    }

    pub fn push_projectile(&mut self, pos: Vec3, vel: Vec3, range: f32, owner: Side) -> ProjectileId {
        let id = ProjectileId(self.next_projectile);
        self.next_projectile += 1;
        self.projectiles.push(Projectile {
            id,
            owner,
            pos,
            vel,
            spawn_pos: pos,
            range,
            half: Vec3::splat(1.0),
        });
        id
    }

    pub fn spawn_obstacle(&mut self) -> ObstacleId {
        let pos = self.random_field_pos();
        let half = Vec3::from(self.cfg.obstacle_half);
        self.spawn_obstacle_at(pos, half)
    }

    pub fn spawn_obstacle_at(&mut self, pos: Vec3, half: Vec3) -> ObstacleId {
        let id = ObstacleId(self.next_obstacle);
        self.next_obstacle += 1;
        self.obstacles.push(Obstacle { id, pos, half });
        id
    }

    /// Spawn at a random clear spot, or skip when the scatter refuses to
    /// yield one.
    pub fn spawn_enemy(&mut self, kind: EnemyKind) -> Option<ActorId> {
        let half = Vec3::from(self.tuning_for(kind).half_extents);
        for _ in 0..SPAWN_TRIES {
            let pos = self.random_field_pos();
            let probe = Aabb::centered(pos, half);
            if self.obstacles.iter().any(|o| probe.overlaps(&o.aabb())) {
                continue;
            }
            return Some(self.spawn_enemy_at(kind, pos));
        }
        log::debug!("no clear ground for a {}; skipping spawn", kind.label());
        None
    }

    pub fn spawn_enemy_at(&mut self, kind: EnemyKind, pos: Vec3) -> ActorId {
        let id = ActorId(self.next_enemy);
        self.next_enemy += 1;
        let tuning = self.tuning_for(kind);
        self.enemies.push(Enemy::new(id, kind, tuning, pos));
        if kind == EnemyKind::Missile {
            self.overlaps.watch(Impactor::MissileBody(id), Target::Player);
            let at = self.time_s + f64::from(self.cfg.missile_retarget_s);
            self.timers.schedule(at, TimerEvent::Retarget(id));
        }
        metrics::counter!("spawn.enemies").increment(1);
        log::debug!("spawned {} {id:?} at {pos}", kind.label());
        id
    }

    fn tuning_for(&self, kind: EnemyKind) -> EnemyTuning {
        match kind {
            EnemyKind::Tank => self.specs.tank.clone(),
            EnemyKind::SuperTank => self.specs.super_tank.clone(),
            EnemyKind::Ufo => self.specs.ufo.clone(),
            EnemyKind::Missile => self.specs.missile.clone(),
        }
    }

    /// Random point on the field, at least `spawn_margin` out from the
    /// origin on both axes so nothing lands on the player start.
    fn random_field_pos(&mut self) -> Vec3 {
        let margin = self.cfg.spawn_margin;
        let span = self.cfg.battlefield_size / 2.0 - margin;
        let mut mag = [0.0f32; 2];
        for m in &mut mag {
            let v = margin + self.rng.random_range(0.0..span);
            *m = if self.rng.random_bool(0.5) { v } else { -v };
        }
        vec3(mag[0], 0.0, mag[1])
    }

    /// Ground replacements skew toward super tanks as the difficulty climbs,
    /// up to the configured cap.
    fn pick_ground_kind(&mut self) -> EnemyKind {
        let p_super = (self.difficulty / 2.0).min(self.cfg.super_mix_cap);
        if self.rng.random::<f32>() < p_super {
            EnemyKind::SuperTank
        } else {
            EnemyKind::Tank
        }
    }

    /// Mark an enemy dead and announce the burst. Removal from the roster
    /// happens in end-of-tick cleanup so the rest of the tick still sees it.
    pub(crate) fn kill_enemy(&mut self, id: ActorId) {
        let Some(e) = self.enemies.iter_mut().find(|e| e.id == id) else {
            return;
        };
        if !e.alive {
            return;
        }
        e.alive = false;
        e.clear_plan();
        let pos = e.pos;
        let kind = e.kind;
        self.events.push(GameEvent::DestroyBurst { pos, kind });
        metrics::counter!("combat.kills").increment(1);
        log::debug!("{} {id:?} destroyed", kind.label());
    }

    pub(crate) fn award(&mut self, points: u32) {
        let best_moved = self.scoreboard.award(points);
        self.events.push(GameEvent::ScoreChanged { score: self.scoreboard.score() });
        if best_moved {
            self.events.push(GameEvent::BestScore { best: self.scoreboard.best() });
        }
    }

    pub(crate) fn on_player_death(&mut self) {
        debug_assert!(self.phase == Phase::Playing);
        self.phase = Phase::Death;
        self.events.push(GameEvent::PlayerDied);
        metrics::counter!("combat.player_deaths").increment(1);
        log::info!("player destroyed; run over at {} points", self.scoreboard.score());
    }

    /// Host-driven death transition (console command, scripted loss). Dying
    /// to damage goes through combat instead; both end in `Death` exactly
    /// once.
    pub fn set_phase_death(&mut self) -> anyhow::Result<()> {
        ensure!(
            self.phase == Phase::Playing,
            "death transition outside Playing (phase {:?})",
            self.phase
        );
        self.on_player_death();
        Ok(())
    }

    /// Host-driven teardown of a specific enemy, outside the combat path.
    /// Unknown ids are a caller bug and refuse loudly.
    pub fn destroy_enemy(&mut self, id: ActorId) -> anyhow::Result<()> {
        ensure!(
            self.enemies.iter().any(|e| e.id == id),
            "destroy_enemy: unknown actor {id:?}"
        );
        self.kill_enemy(id);
        self.remove_dead();
        self.overlaps.sweep(&self.projectiles, &self.enemies);
        Ok(())
    }

    fn cleanup(&mut self, ctx: &TickCtx) {
        self.projectiles
            .retain(|p| !ctx.expired.contains(&p.id) && !ctx.consumed.contains(&p.id));
        self.remove_dead();
        self.overlaps.sweep(&self.projectiles, &self.enemies);
    }

    fn remove_dead(&mut self) {
        let mut i = 0;
        while i < self.enemies.len() {
            if self.enemies[i].alive {
                i += 1;
                continue;
            }
            if let Some(h) = self.enemies[i].chase_decay {
                self.timers.cancel(h);
            }
            self.enemies.swap_remove(i);
        }
    }

    /// Delay before a destroyed ground or missile slot refills. Shrinks as
    /// the difficulty climbs, down to the configured floor.
    pub fn respawn_delay(&self) -> f32 {
        self.cfg
            .respawn_floor_s
            .max(self.cfg.respawn_scale_s / self.difficulty.max(f32::EPSILON))
    }

    pub fn enemy(&self, id: ActorId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: ActorId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score()
    }

    pub fn best(&self) -> u32 {
        self.scoreboard.best()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
