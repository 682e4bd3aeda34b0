//! JSON-file backed score ledger.
//!
//! The whole history lives in one JSON array file (`data/scores.json` by
//! default). Writes happen under an async mutex and land via an atomic
//! tempfile rename, so concurrent submissions never lose appends.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::ledger::{
    compute_standing, compute_stats, QuestionStats, ScoreEntry, ScoreLedger, Standing,
};

/// Default scores file path, relative to the working directory.
pub const DEFAULT_SCORES_FILE: &str = "data/scores.json";

/// File-backed [`ScoreLedger`].
pub struct JsonFileLedger {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Ledger at the default path, honoring `MOCKPANEL_SCORES_FILE`.
    pub fn from_env() -> Self {
        let path = std::env::var("MOCKPANEL_SCORES_FILE")
            .unwrap_or_else(|_| DEFAULT_SCORES_FILE.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<Vec<ScoreEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn persist(&self, entries: &[ScoreEntry]) -> StoreResult<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, entries)?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::Persist(e.to_string()))?;
        debug!(path = %self.path.display(), entries = entries.len(), "scores persisted");
        Ok(())
    }

    fn scores_for(&self, question_id: &str) -> StoreResult<Vec<u32>> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|e| e.question_id == question_id)
            .map(|e| e.score)
            .collect())
    }

    fn validate(score: u32) -> StoreResult<()> {
        if score > 100 {
            return Err(StoreError::InvalidScore { score });
        }
        Ok(())
    }

    fn append(&self, question_id: &str, score: u32) -> StoreResult<()> {
        let mut entries = self.load()?;
        entries.push(ScoreEntry {
            question_id: question_id.to_string(),
            score,
            recorded_at: Utc::now(),
        });
        self.persist(&entries)
    }
}

#[async_trait]
impl ScoreLedger for JsonFileLedger {
    async fn record(&self, question_id: &str, score: u32) -> StoreResult<()> {
        Self::validate(score)?;
        let _guard = self.write_lock.lock().await;
        self.append(question_id, score)
    }

    async fn submit(&self, question_id: &str, score: u32) -> StoreResult<Standing> {
        Self::validate(score)?;
        let _guard = self.write_lock.lock().await;
        let prior = self.scores_for(question_id)?;
        let standing = compute_standing(&prior, score);
        self.append(question_id, score)?;
        Ok(standing)
    }

    async fn stats(&self, question_id: &str) -> StoreResult<Option<QuestionStats>> {
        let scores = self.scores_for(question_id)?;
        Ok(compute_stats(&scores))
    }
}
