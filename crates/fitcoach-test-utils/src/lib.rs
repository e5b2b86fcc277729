//! Test helpers shared across fitcoach crates.

pub mod llm;
pub mod records;
pub mod research;

pub use llm::{FailingChatModel, FixedChatModel, RecordedCall, RecordingChatModel};
pub use records::{record_at, record_days_ago, structured_record_days_ago};
pub use research::{FailingResearch, StubResearch};
