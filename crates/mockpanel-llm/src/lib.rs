//! mockpanel LLM layer
//!
//! Talks to the text-generation backend: the Messages API client, the
//! strict verdict parser, the parallel panel invoker, and the guided-flow
//! coach. All jury semantics live in `mockpanel-core`; this crate only
//! moves prompts out and verdicts in.

pub mod client;
pub mod coach;
pub mod error;
pub mod invoker;
pub mod parse;

pub use client::{
    AnthropicClient, BackendConfig, ChatBackend, ChatMessage, ChatRole, DEFAULT_API_URL,
    DEFAULT_MODEL,
};
pub use coach::{Coach, CoachReply, CoachRequest, CoachRole, CoachTurn};
pub use error::{LlmError, LlmResult};
pub use invoker::PanelInvoker;
pub use parse::{extract_json_object, parse_verdict};
