//! Panel invoker: fan-out evaluation across personas.
//!
//! [`PanelInvoker`] issues one independent backend call per configured
//! panelist — no persona ever sees another's output — collects the
//! verdicts in panel order, and hands them to the aggregation engine.
//! Any single failure aborts the whole evaluation: the system never
//! returns a jury verdict built from fewer than the configured panel.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info};

use mockpanel_core::{
    aggregate_verdicts, default_panel, EvaluationRequest, JuryVerdict, Panelist, PanelistVerdict,
};

use crate::client::{ChatBackend, ChatMessage};
use crate::error::{LlmError, LlmResult};
use crate::parse::parse_verdict;

/// Runs the configured panel against one answer and aggregates the result.
pub struct PanelInvoker {
    backend: Arc<dyn ChatBackend>,
    panel: Vec<Panelist>,
}

impl PanelInvoker {
    /// Invoker over the reference three-member panel.
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self::with_panel(backend, default_panel())
    }

    pub fn with_panel(backend: Arc<dyn ChatBackend>, panel: Vec<Panelist>) -> Self {
        Self { backend, panel }
    }

    pub fn panel(&self) -> &[Panelist] {
        &self.panel
    }

    /// Evaluate one answer with every panelist concurrently and aggregate
    /// the verdicts into a [`JuryVerdict`].
    ///
    /// Fails fast: the first panelist error aborts the remaining calls.
    pub async fn evaluate(&self, request: &EvaluationRequest) -> LlmResult<JuryVerdict> {
        request.validate()?;

        let mut join_set = JoinSet::new();
        for (idx, panelist) in self.panel.iter().cloned().enumerate() {
            let backend = Arc::clone(&self.backend);
            let prompt = evaluation_prompt(&panelist, request);
            join_set.spawn(async move {
                debug!(panelist = %panelist.name, "requesting verdict");
                let raw = backend
                    .complete(&panelist.instructions, &[ChatMessage::user(prompt)])
                    .await?;
                let verdict = parse_verdict(&panelist, &raw)?;
                Ok::<(usize, PanelistVerdict), LlmError>((idx, verdict))
            });
        }

        let mut ordered: Vec<Option<PanelistVerdict>> = vec![None; self.panel.len()];
        while let Some(joined) = join_set.join_next().await {
            let (idx, verdict) = joined.map_err(|e| LlmError::Join(e.to_string()))??;
            ordered[idx] = Some(verdict);
        }

        let verdicts: Vec<PanelistVerdict> = ordered
            .into_iter()
            .map(|slot| slot.ok_or_else(|| LlmError::Join("missing panelist verdict".to_string())))
            .collect::<LlmResult<_>>()?;

        let jury = aggregate_verdicts(&verdicts);
        info!(
            decision = ?jury.final_decision,
            score = jury.overall_score,
            disagreements = jury.disagreements.len(),
            "panel evaluation complete"
        );
        Ok(jury)
    }
}

/// The user-turn prompt pairing the question with the candidate's answer.
fn evaluation_prompt(panelist: &Panelist, request: &EvaluationRequest) -> String {
    format!(
        "INTERVIEW QUESTION:\n{}\n\nCANDIDATE'S ANSWER:\n{}\n\n\
         Please evaluate this answer from your perspective as {}, {}.\n\
         Remember to respond with ONLY a valid JSON object in the specified format.",
        request.question, request.answer, panelist.name, panelist.title
    )
}
