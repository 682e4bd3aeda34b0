//! In-memory fake for the score ledger (testing only).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::ledger::{compute_standing, compute_stats, QuestionStats, ScoreLedger, Standing};

/// In-memory ledger backed by a `HashMap<question_id, Vec<score>>`.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    scores: Mutex<HashMap<String, Vec<u32>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreLedger for MemoryLedger {
    async fn record(&self, question_id: &str, score: u32) -> StoreResult<()> {
        if score > 100 {
            return Err(StoreError::InvalidScore { score });
        }
        let mut scores = self.scores.lock().unwrap();
        scores.entry(question_id.to_string()).or_default().push(score);
        Ok(())
    }

    async fn submit(&self, question_id: &str, score: u32) -> StoreResult<Standing> {
        if score > 100 {
            return Err(StoreError::InvalidScore { score });
        }
        let mut scores = self.scores.lock().unwrap();
        let history = scores.entry(question_id.to_string()).or_default();
        let standing = compute_standing(history, score);
        history.push(score);
        Ok(standing)
    }

    async fn stats(&self, question_id: &str) -> StoreResult<Option<QuestionStats>> {
        let scores = self.scores.lock().unwrap();
        Ok(scores
            .get(question_id)
            .and_then(|history| compute_stats(history)))
    }
}
