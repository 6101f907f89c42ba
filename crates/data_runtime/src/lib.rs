//! data_runtime: data schemas and loaders for the arena game.
//!
//! Tuning tables and persistence live here so the sim crate stays free of
//! file I/O. Keep this crate free of simulation types; the sim converts
//! these plain configs into its own runtime state on spawn.

#![forbid(unsafe_code)]

pub mod score;
pub mod specs {
    pub mod enemies;
}
pub mod configs {
    pub mod gameplay;
}
