//! Guided-flow coaching turns.
//!
//! One [`Coach::advise`] call per candidate response: the backend reads
//! the current framework step, the response, and the conversation so
//! far, then decides whether to advance. The evaluation pipeline never
//! sees any of this — it only consumes the finished answer string the
//! flow session assembles.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use mockpanel_core::FlowStep;

use crate::client::{ChatBackend, ChatMessage, ChatRole};
use crate::error::{LlmError, LlmResult};
use crate::parse::extract_json_object;

/// One prior turn of the coaching conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachTurn {
    pub role: CoachRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachRole {
    User,
    Coach,
}

/// Input for one coaching turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachRequest {
    pub question: String,
    pub current_step: FlowStep,
    pub user_response: String,
    #[serde(default)]
    pub conversation_history: Vec<CoachTurn>,
}

/// The coach's decision for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachReply {
    pub feedback: String,
    pub should_progress: bool,
    pub next_step: FlowStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encouragement: Option<String>,
}

/// Wire shape of the backend's coaching decision.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCoachReply {
    feedback: String,
    #[serde(default)]
    should_progress: bool,
    encouragement: Option<String>,
}

/// Turn-by-turn interview coach over a [`ChatBackend`].
pub struct Coach {
    backend: Arc<dyn ChatBackend>,
}

impl Coach {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Run one coaching turn and decide whether the flow advances.
    pub async fn advise(&self, request: &CoachRequest) -> LlmResult<CoachReply> {
        let system = coaching_prompt(&request.question, request.current_step);

        let mut messages: Vec<ChatMessage> = request
            .conversation_history
            .iter()
            .map(|turn| ChatMessage {
                role: match turn.role {
                    CoachRole::User => ChatRole::User,
                    CoachRole::Coach => ChatRole::Assistant,
                },
                content: turn.content.clone(),
            })
            .collect();
        messages.push(ChatMessage::user(request.user_response.clone()));

        debug!(step = ?request.current_step, "coaching turn");
        let raw_text = self.backend.complete(&system, &messages).await?;
        let payload = extract_json_object(&raw_text)?;
        let raw: RawCoachReply =
            serde_json::from_str(payload).map_err(|e| LlmError::MalformedVerdict {
                panelist: "coach".to_string(),
                detail: e.to_string(),
            })?;

        let next_step = if raw.should_progress {
            request.current_step.next()
        } else {
            request.current_step
        };

        Ok(CoachReply {
            feedback: raw.feedback,
            should_progress: raw.should_progress,
            next_step,
            encouragement: raw.encouragement,
        })
    }
}

/// The step-specific system prompt framing the coaching turn.
fn coaching_prompt(question: &str, step: FlowStep) -> String {
    let config = step.config();
    let tips: Vec<String> = config.tips.iter().map(|t| format!("- {t}")).collect();
    format!(
        r#"You are a supportive PM interview coach helping a candidate practice answering product sense questions. Your role is to guide them through a structured framework.

CURRENT QUESTION: "{question}"

CURRENT FRAMEWORK STEP: {title}
STEP OBJECTIVE: {prompt}

YOUR COACHING STYLE:
- Be warm, encouraging, and supportive
- Give brief, actionable feedback (2-3 sentences max)
- If their answer is good enough, acknowledge it and move on
- If it needs improvement, ask ONE clarifying question
- Never be harsh or discouraging
- Sound like a helpful friend, not a strict evaluator

TIPS FOR THIS STEP:
{tips}

DECISION CRITERIA:
- If the user's response adequately addresses this step (even if not perfect), set shouldProgress: true
- If the response is too vague, off-topic, or missing key elements, set shouldProgress: false and ask a follow-up
- Be lenient - this is practice, not a test

Respond with JSON only:
{{
  "feedback": "Your brief, encouraging feedback or follow-up question",
  "shouldProgress": true/false,
  "encouragement": "A short encouraging phrase (optional)"
}}"#,
        question = question,
        title = config.title,
        prompt = config.prompt,
        tips = tips.join("\n"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records what it was sent and answers with a fixed decision.
    struct RecordingBackend {
        reply: String,
        seen: Mutex<Vec<(String, Vec<ChatMessage>)>>,
    }

    #[async_trait]
    impl ChatBackend for RecordingBackend {
        async fn complete(&self, system: &str, messages: &[ChatMessage]) -> LlmResult<String> {
            self.seen
                .lock()
                .unwrap()
                .push((system.to_string(), messages.to_vec()));
            Ok(self.reply.clone())
        }
    }

    fn backend(reply: &str) -> Arc<RecordingBackend> {
        Arc::new(RecordingBackend {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn request(step: FlowStep) -> CoachRequest {
        CoachRequest {
            question: "Build a fitness app for seniors?".to_string(),
            current_step: step,
            user_response: "Retention is my goal.".to_string(),
            conversation_history: vec![
                CoachTurn {
                    role: CoachRole::Coach,
                    content: "What's the goal?".to_string(),
                },
                CoachTurn {
                    role: CoachRole::User,
                    content: "Let me think.".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_progressing_turn_advances_the_step() {
        let backend = backend(
            r#"{"feedback": "Great framing!", "shouldProgress": true, "encouragement": "Keep going!"}"#,
        );
        let coach = Coach::new(backend.clone());

        let reply = coach.advise(&request(FlowStep::Goal)).await.unwrap();
        assert!(reply.should_progress);
        assert_eq!(reply.next_step, FlowStep::Segments);
        assert_eq!(reply.encouragement.as_deref(), Some("Keep going!"));

        // The system prompt framed the current step and the question.
        let seen = backend.seen.lock().unwrap();
        let (system, messages) = &seen[0];
        assert!(system.contains("Clarify the Goal"));
        assert!(system.contains("fitness app for seniors"));
        // History turns plus the new user response, coach mapped to assistant.
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, ChatRole::Assistant);
        assert_eq!(messages[2].content, "Retention is my goal.");
    }

    #[tokio::test]
    async fn test_non_progressing_turn_stays_on_step() {
        let backend = backend(r#"{"feedback": "Which users exactly?", "shouldProgress": false}"#);
        let coach = Coach::new(backend);

        let reply = coach.advise(&request(FlowStep::Segments)).await.unwrap();
        assert!(!reply.should_progress);
        assert_eq!(reply.next_step, FlowStep::Segments);
        assert!(reply.encouragement.is_none());
    }

    #[tokio::test]
    async fn test_prose_only_reply_is_a_hard_failure() {
        let backend = backend("You're doing great, just keep talking to me!");
        let coach = Coach::new(backend);
        let err = coach.advise(&request(FlowStep::Goal)).await.unwrap_err();
        assert!(matches!(err, LlmError::NoJsonPayload));
    }
}
