//! Arena, spawning, progression and player tuning from
//! `data/config/gameplay.toml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameplayCfg {
    /// Full side length of the square battlefield.
    pub battlefield_size: f32,
    /// Spawns land at least this far from the origin on each axis.
    pub spawn_margin: f32,
    /// Beyond this |x| or |z| a wanderer is forced back toward the origin.
    pub containment_bound: f32,
    pub enemy_count: usize,
    pub obstacle_count: usize,
    pub obstacle_half: (f32, f32, f32),

    pub initial_difficulty: f32,
    pub difficulty_per_kill: f32,
    /// Cap on the super-tank share of replacement spawns.
    pub super_mix_cap: f32,

    pub respawn_floor_s: f32,
    pub respawn_scale_s: f32,
    pub ufo_respawn_min_s: f32,
    pub ufo_respawn_max_s: f32,

    pub chase_decay_s: f32,
    pub idle_after_shot_s: f32,
    pub idle_chasing_s: f32,
    pub backtrack_dist: f32,
    pub wander_retry_cap: u32,
    pub missile_retarget_s: f32,
    pub missile_queue_cap: usize,

    pub bullet_damage: i32,
    pub missile_damage: i32,

    pub player: PlayerCfg,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerCfg {
    pub max_hp: i32,
    pub shoot_cooldown_s: f32,
    pub bullet_speed: f32,
    pub bullet_range: f32,
    pub half_extents: (f32, f32, f32),
}

impl Default for GameplayCfg {
    fn default() -> Self {
        Self {
            battlefield_size: 1000.0,
            spawn_margin: 40.0,
            containment_bound: 1000.0,
            enemy_count: 10,
            obstacle_count: 20,
            obstacle_half: (10.0, 10.0, 10.0),
            initial_difficulty: 0.1,
            difficulty_per_kill: 0.1,
            super_mix_cap: 0.75,
            respawn_floor_s: 4.0,
            respawn_scale_s: 1.0,
            ufo_respawn_min_s: 10.0,
            ufo_respawn_max_s: 20.0,
            chase_decay_s: 5.0,
            idle_after_shot_s: 1.0,
            idle_chasing_s: 0.25,
            backtrack_dist: 15.0,
            wander_retry_cap: 8,
            missile_retarget_s: 1.0,
            missile_queue_cap: 5,
            bullet_damage: 1,
            missile_damage: 2,
            player: PlayerCfg::default(),
        }
    }
}

impl Default for PlayerCfg {
    fn default() -> Self {
        Self {
            max_hp: 5,
            shoot_cooldown_s: 1.0,
            bullet_speed: 10.0,
            bullet_range: 400.0,
            half_extents: (25.0, 10.0, 25.0),
        }
    }
}

fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

/// Load `data/config/gameplay.toml`; fall back to built-in defaults when the
/// file is absent.
pub fn load_default() -> Result<GameplayCfg> {
    let path = data_root().join("config/gameplay.toml");
    if !path.is_file() {
        return Ok(GameplayCfg::default());
    }
    let txt =
        std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: GameplayCfg = toml::from_str(&txt).context("parse gameplay.toml")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_arena() {
        let cfg = GameplayCfg::default();
        assert!(cfg.spawn_margin < cfg.battlefield_size / 2.0);
        assert!(cfg.containment_bound >= cfg.battlefield_size);
        assert!(cfg.missile_damage > cfg.bullet_damage);
        assert!(cfg.wander_retry_cap > 0);
    }

    #[test]
    fn load_default_reads_workspace_file() {
        let cfg = load_default().expect("gameplay cfg");
        assert_eq!(cfg.enemy_count, 10);
        assert_eq!(cfg.obstacle_count, 20);
        assert_eq!(cfg.player.max_hp, 5);
    }
}
