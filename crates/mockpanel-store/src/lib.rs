//! mockpanel score store
//!
//! Append-only score history with percentile standing and per-question
//! stats. The [`ScoreLedger`] trait is backend-agnostic; a JSON-file
//! implementation and an in-memory fake are provided.

pub mod error;
pub mod json_file;
pub mod ledger;
pub mod memory;

pub use error::{StoreError, StoreResult};
pub use json_file::{JsonFileLedger, DEFAULT_SCORES_FILE};
pub use ledger::{
    compute_standing, compute_stats, QuestionStats, ScoreEntry, ScoreLedger, Standing,
};
pub use memory::MemoryLedger;
