//! Score ledger trait and standing computation.
//!
//! The ledger is an append-only history of overall scores keyed loosely
//! by question id. [`compute_standing`] derives a "top X%" percentile and
//! a 1-indexed rank for a new score against the prior history.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// One recorded score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub question_id: String,
    /// Overall jury score, 0–100.
    pub score: u32,
    pub recorded_at: DateTime<Utc>,
}

/// How a new score ranks against prior responses to the same question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    /// "Top X%" — 100 means first response, 1 means best possible.
    pub percentile: u32,
    /// 1-indexed position in a descending sort including the new score.
    pub rank: usize,
    /// Prior responses plus the new one.
    pub total_responses: usize,
}

/// Aggregate statistics over all responses to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStats {
    pub total_responses: usize,
    pub average_score: u32,
    pub highest_score: u32,
    pub lowest_score: u32,
}

/// Append-only score history, keyed by question id.
///
/// Implementations must serialize concurrent appends so no update is lost.
#[async_trait]
pub trait ScoreLedger: Send + Sync {
    /// Append a score to the history.
    async fn record(&self, question_id: &str, score: u32) -> StoreResult<()>;

    /// Compute the standing of `score` against prior history for the
    /// question, then append it — both under one lock so concurrent
    /// submissions see a consistent history.
    async fn submit(&self, question_id: &str, score: u32) -> StoreResult<Standing>;

    /// Aggregate stats over the question's history, or `None` when no
    /// responses exist.
    async fn stats(&self, question_id: &str) -> StoreResult<Option<QuestionStats>>;
}

/// Derive the standing of `score` against `prior` scores for the same
/// question (not yet including `score` itself).
///
/// Percentile counts scores strictly below plus half of the ties, converts
/// to "top X%", and clamps to 1..=99; the very first response reports 100.
pub fn compute_standing(prior: &[u32], score: u32) -> Standing {
    if prior.is_empty() {
        return Standing {
            percentile: 100,
            rank: 1,
            total_responses: 1,
        };
    }

    let below = prior.iter().filter(|&&s| s < score).count();
    let ties = prior.iter().filter(|&&s| s == score).count();
    let beaten = (below as f64 + ties as f64 * 0.5) / prior.len() as f64;
    let pct = (beaten * 100.0).round() as i64;
    let percentile = (100 - pct + 1).clamp(1, 99) as u32;

    let mut sorted: Vec<u32> = prior.to_vec();
    sorted.push(score);
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let rank = sorted
        .iter()
        .position(|&s| s == score)
        .map(|i| i + 1)
        .unwrap_or(1);

    Standing {
        percentile,
        rank,
        total_responses: prior.len() + 1,
    }
}

/// Aggregate stats over a question's scores, or `None` when empty.
pub fn compute_stats(scores: &[u32]) -> Option<QuestionStats> {
    if scores.is_empty() {
        return None;
    }
    let total: u32 = scores.iter().sum();
    Some(QuestionStats {
        total_responses: scores.len(),
        average_score: ((f64::from(total) / scores.len() as f64).round()) as u32,
        highest_score: *scores.iter().max().expect("non-empty"),
        lowest_score: *scores.iter().min().expect("non-empty"),
    })
}
