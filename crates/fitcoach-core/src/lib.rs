//! Coaching logic for fitcoach.
//!
//! This crate owns the log lifecycle (records, memory documents, journal),
//! the deterministic coaching summary, and model-backed chat replies.

pub mod coach;
pub mod context;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod research;
pub mod response;

pub use coach::{Coach, MISSING_MODEL_REPLY, MODEL_ERROR_REPLY};
pub use context::CoachContext;
pub use error::CoachError;
pub use llm::{ChatModel, EMPTY_COMPLETION_REPLY, OpenAiChatModel};
pub use prompt::PromptBuilder;
/// Research search hooks and formatting.
pub use research::{
    ResearchProvider, ResearchResult, enhance_query, fallback_results, summarize_research,
};
pub use response::{GENERIC_ACKNOWLEDGMENT, coaching_response, record_response};
