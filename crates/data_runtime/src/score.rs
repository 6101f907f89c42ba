//! Best-score persistence.
//!
//! The store is one text value on disk: the best score as a decimal string,
//! parsed on read. A missing file means no best has been recorded yet. The
//! sim compares and rewrites it after every award, not at run end, so a
//! crash never loses a record.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

fn data_root() -> PathBuf {
    let here = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let ws = here.join("../../data");
    if ws.is_dir() { ws } else { here.join("data") }
}

#[derive(Debug, Clone)]
pub struct BestScoreFile {
    path: PathBuf,
}

impl BestScoreFile {
    /// Store under the workspace `data/save/` directory.
    pub fn default_path() -> Self {
        Self { path: data_root().join("save/best_score.txt") }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `Ok(None)` when nothing has been saved yet.
    pub fn read(&self) -> Result<Option<u32>> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let txt = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        let best = txt
            .trim()
            .parse::<u32>()
            .with_context(|| format!("parse best score {:?}", txt.trim()))?;
        Ok(Some(best))
    }

    pub fn write(&self, best: u32) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("mkdir {}", dir.display()))?;
        }
        fs::write(&self.path, best.to_string())
            .with_context(|| format!("write {}", self.path.display()))
    }
}
