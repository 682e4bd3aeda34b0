//! Verdict domain model.
//!
//! Everything the aggregation engine consumes and produces: one
//! [`PanelistVerdict`] per interviewer persona in, one [`JuryVerdict`] out.
//! All types serialize to the camelCase wire shapes consumed by callers.

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// One panelist's categorical judgment on a five-level scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    StrongPass,
    Pass,
    Borderline,
    Fail,
    StrongFail,
}

impl Verdict {
    /// Ordinal severity weight: strong_fail=1 … strong_pass=5.
    ///
    /// Used only for disagreement-spread computation, never for the
    /// final-decision rule (that uses category counts).
    pub fn severity(&self) -> u8 {
        match self {
            Verdict::StrongFail => 1,
            Verdict::Fail => 2,
            Verdict::Borderline => 3,
            Verdict::Pass => 4,
            Verdict::StrongPass => 5,
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Verdict::StrongPass => "strong pass",
            Verdict::Pass => "pass",
            Verdict::Borderline => "borderline",
            Verdict::Fail => "fail",
            Verdict::StrongFail => "strong fail",
        };
        write!(f, "{label}")
    }
}

/// The jury's synthesized decision. Derived, never stored independently
/// of the verdict set that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinalDecision {
    Pass,
    Borderline,
    Fail,
}

/// Score on one named rubric axis, with the panelist's rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    /// Dimension name (e.g. `"Structured Approach"`).
    pub dimension: String,
    /// Score on the 1–5 scale.
    pub score: u8,
    /// Why the panelist gave this score.
    pub rationale: String,
}

/// The normalized output of one panelist's evaluation.
///
/// Invariant: `scores` is non-empty when produced successfully. Malformed
/// backend output is a hard failure for that panelist call upstream, never
/// a silently-defaulted verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelistVerdict {
    /// Stable persona identifier (e.g. `"hiring_manager"`).
    pub panelist_id: String,
    /// Display name of the persona.
    pub panelist_name: String,
    pub verdict: Verdict,
    /// Self-reported confidence, 0–100.
    pub confidence: u8,
    pub scores: Vec<DimensionScore>,
    pub strengths: Vec<String>,
    pub red_flags: Vec<String>,
    pub raw_feedback: String,
}

/// Averaged score for one distinct dimension name, pooled across panelists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub dimension: String,
    /// Rescaled to 0–100.
    pub score: u8,
    /// Equal weighting: 1 / number of distinct dimension names.
    pub weight: f64,
}

/// One panelist's stance within a detected disagreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub panelist_name: String,
    /// Human-readable verdict plus raw severity, e.g. `"pass (4/5)"`.
    pub stance: String,
}

/// A detected split in panelist verdict severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disagreement {
    pub topic: String,
    pub positions: Vec<Position>,
}

/// The aggregation engine's sole output: one coherent decision synthesized
/// from N independent panelist verdicts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JuryVerdict {
    pub final_decision: FinalDecision,
    /// Pooled mean of all dimension scores, rescaled to 0–100.
    pub overall_score: u8,
    pub breakdown: Vec<ScoreBreakdown>,
    /// Strengths reported by two or more panelists.
    pub strengths: Vec<String>,
    /// Union of every panelist's red flags, deduplicated.
    pub red_flags: Vec<String>,
    pub disagreements: Vec<Disagreement>,
    pub panelist_verdicts: Vec<PanelistVerdict>,
}

/// An evaluation request: the interview question and the candidate's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub question: String,
    pub answer: String,
}

impl EvaluationRequest {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Reject empty or whitespace-only fields before any backend call.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.question.trim().is_empty() {
            return Err(RequestError::InvalidRequest {
                field: "question".to_string(),
            });
        }
        if self.answer.trim().is_empty() {
            return Err(RequestError::InvalidRequest {
                field: "answer".to_string(),
            });
        }
        Ok(())
    }
}
