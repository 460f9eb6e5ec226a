//! Best-score persistence
//!
//! A single best score stored as a small JSON document. A missing or
//! malformed file is treated as "no score yet" so a corrupt store can
//! never keep the game from starting.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default store file name (mirrors the HUD's high-score slot).
pub const DEFAULT_STORE: &str = "neon-swarm-highscore.json";

/// Persisted best score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub best: u64,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run. Updates the stored best only when exceeded;
    /// returns whether a new best was set.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            return true;
        }
        false
    }

    /// Load from disk. Missing or unreadable files yield the default.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => Self::parse(&json),
            Err(_) => {
                log::info!("no high score file at {}, starting fresh", path.display());
                Self::new()
            }
        }
    }

    fn parse(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(scores) => {
                log::info!("loaded high score: {}", scores.best);
                scores
            }
            Err(err) => {
                log::warn!("high score file unreadable ({err}), starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
