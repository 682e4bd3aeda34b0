//! mockpanel core library
//!
//! Domain model and deterministic aggregation engine for the mock
//! interview panel: verdict types, the jury aggregator, persona
//! configuration, the guided answer flow, and the question bank.
//! Everything here is pure — network I/O lives in `mockpanel-llm`,
//! persistence in `mockpanel-store`.

pub mod aggregator;
pub mod error;
pub mod flow;
pub mod persona;
pub mod question;
pub mod telemetry;
pub mod verdict;

pub use aggregator::aggregate_verdicts;
pub use error::RequestError;
pub use flow::{FlowSession, FlowStep, StepConfig, STEP_ORDER};
pub use persona::{default_panel, Panelist, PanelistKind};
pub use question::{Question, QuestionCategory};
pub use telemetry::init_tracing;
pub use verdict::{
    Disagreement, DimensionScore, EvaluationRequest, FinalDecision, JuryVerdict, PanelistVerdict,
    Position, ScoreBreakdown, Verdict,
};

/// mockpanel version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
