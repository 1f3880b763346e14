/// Best-score persistence: a single decimal integer as the whole file.

use std::path::{Path, PathBuf};

use crate::error::Result;

pub trait HighScoreStore {
    /// Stored best score, or 0 if nothing usable is stored.
    fn load(&self) -> u32;

    /// Persist `candidate` if it beats the stored value. Returns whether
    /// anything was written.
    fn save(&mut self, candidate: u32) -> Result<bool>;
}

#[derive(Debug, Clone)]
pub struct FileHighScore {
    path: PathBuf,
}

impl FileHighScore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileHighScore {
    fn load(&self) -> u32 {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    fn save(&mut self, candidate: u32) -> Result<bool> {
        let current = self.load();
        if candidate <= current {
            return Ok(false);
        }
        std::fs::write(&self.path, candidate.to_string())?;
        tracing::info!(
            path = %self.path.display(),
            previous = current,
            score = candidate,
            "new high score saved"
        );
        Ok(true)
    }
}
