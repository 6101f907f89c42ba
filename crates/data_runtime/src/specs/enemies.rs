//! Enemy archetype tuning loaded from `data/config/enemies.toml`.
//!
//! Plain numbers and flags only. Which archetype shoots, homes or wanders is
//! decided in the sim crate; this table carries the knobs so balancing never
//! requires a code change.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// One archetype's knobs. Speeds are units/second, `turn_speed` rad/second,
/// ranges in world units, cooldowns in seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyTuning {
    pub move_speed: f32,
    pub turn_speed: f32,
    pub bullet_speed: f32,
    pub shoot_range: f32,
    pub bullet_range: f32,
    pub shoot_cooldown_s: f32,
    /// Per-decision roll; 0 disables shooting entirely.
    pub shoot_chance: f32,
    /// Chance a wander leg heads for the player instead of a random offset.
    pub approach_chance: f32,
    pub standoff: f32,
    pub half_extents: (f32, f32, f32),
    pub collides_with_player: bool,
    /// Whether the archetype plans targeting sequences at all.
    pub engages: bool,
    pub points: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemySpecDb {
    pub tank: EnemyTuning,
    pub super_tank: EnemyTuning,
    pub ufo: EnemyTuning,
    pub missile: EnemyTuning,
}

impl Default for EnemySpecDb {
    fn default() -> Self {
        let deg = std::f32::consts::PI / 180.0;
        let tank = EnemyTuning {
            move_speed: 10.0,
            turn_speed: 120.0 * deg,
            bullet_speed: 180.0,
            shoot_range: 200.0,
            bullet_range: 150.0,
            shoot_cooldown_s: 10.0,
            shoot_chance: 0.9,
            approach_chance: 0.5,
            standoff: 30.0,
            half_extents: (5.0, 3.0, 5.0),
            collides_with_player: true,
            engages: true,
            points: 1_000,
        };
        Self {
            super_tank: EnemyTuning {
                half_extents: (5.0, 3.5, 5.0),
                points: 3_000,
                ..tank.clone()
            },
            ufo: EnemyTuning {
                move_speed: 40.0,
                turn_speed: 240.0 * deg,
                bullet_speed: 0.0,
                shoot_range: 0.0,
                bullet_range: 0.0,
                shoot_cooldown_s: 0.0,
                shoot_chance: 0.0,
                approach_chance: 0.0,
                standoff: 30.0,
                half_extents: (6.0, 2.0, 6.0),
                collides_with_player: true,
                engages: false,
                points: 5_000,
            },
            missile: EnemyTuning {
                move_speed: 100.0,
                turn_speed: 300.0 * deg,
                bullet_speed: 0.0,
                shoot_range: 0.0,
                bullet_range: 0.0,
                shoot_cooldown_s: 0.0,
                shoot_chance: 0.0,
                approach_chance: 0.0,
                standoff: 0.0,
                half_extents: (2.0, 2.0, 4.0),
                collides_with_player: false,
                engages: false,
                points: 2_000,
            },
            tank,
        }
    }
}

fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

/// Load the archetype table from `data/config/enemies.toml`; fall back to the
/// built-in defaults when the file is absent.
pub fn load_default() -> Result<EnemySpecDb> {
    let path = data_root().join("config/enemies.toml");
    if !path.is_file() {
        return Ok(EnemySpecDb::default());
    }
    let txt =
        std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let db: EnemySpecDb = toml::from_str(&txt).context("parse enemies.toml")?;
    Ok(db)
}
