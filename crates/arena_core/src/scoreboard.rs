//! Run score and the persisted best.
//!
//! The best is compared and rewritten on every award rather than at run end,
//! mirroring how the browser build wrote through to storage the moment a
//! record fell.

use anyhow::Result;

pub trait ScoreStore {
    fn load(&mut self) -> Result<Option<u32>>;
    fn save(&mut self, best: u32) -> Result<()>;
}

/// In-memory store: the default for hosts that do not persist, and the only
/// store tests need.
#[derive(Debug, Default)]
pub struct MemoryScores {
    pub best: Option<u32>,
}

impl ScoreStore for MemoryScores {
    fn load(&mut self) -> Result<Option<u32>> {
        Ok(self.best)
    }

    fn save(&mut self, best: u32) -> Result<()> {
        self.best = Some(best);
        Ok(())
    }
}

impl ScoreStore for data_runtime::score::BestScoreFile {
    fn load(&mut self) -> Result<Option<u32>> {
        self.read()
    }

    fn save(&mut self, best: u32) -> Result<()> {
        self.write(best)
    }
}

pub struct Scoreboard {
    score: u32,
    best: u32,
    store: Box<dyn ScoreStore>,
}

impl Scoreboard {
    pub fn new(mut store: Box<dyn ScoreStore>) -> Self {
        let best = match store.load() {
            Ok(v) => v.unwrap_or(0),
            Err(e) => {
                log::warn!("best score unavailable: {e:#}");
                0
            }
        };
        Self { score: 0, best, store }
    }

    /// Add points and write through a fresh best immediately. Returns whether
    /// the best advanced.
    pub fn award(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > self.best {
            self.best = self.score;
            if let Err(e) = self.store.save(self.best) {
                log::warn!("persist best score: {e:#}");
            }
            return true;
        }
        false
    }

    /// New run: the score resets, the best survives.
    pub fn reset_run(&mut self) {
        self.score = 0;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }
}
