//! Error types for the coaching core crate.

use fitcoach_memory::MemoryError;
use thiserror::Error;

/// Errors returned by coach operations.
#[derive(Debug, Error)]
pub enum CoachError {
    /// No API key was available for the configured chat model.
    #[error("missing api key (env={0})")]
    MissingApiKey(String),
    /// Building or sending the HTTP request failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The upstream model answered with a non-success status.
    #[error("model request failed (status={status}): {body}")]
    Status { status: u16, body: String },
    /// The upstream response could not be decoded.
    #[error("invalid model response: {0}")]
    InvalidResponse(String),
    /// Research search failed.
    #[error("research error: {0}")]
    Research(String),
    /// Log persistence failed.
    #[error("memory error: {0}")]
    Memory(#[from] MemoryError),
    /// JSON encoding or decoding failed.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
