//! Error types for memory operations.

/// Errors returned by the log journal and memory helpers.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A journal line could not be decoded.
    #[error("corrupt journal line {line}: {message}")]
    CorruptLine { line: usize, message: String },
    /// Unknown summary timeframe.
    #[error("invalid timeframe: {0}")]
    InvalidTimeframe(String),
}
