//! Log memory for fitcoach: pseudo-embeddings, similarity recall, trends,
//! the JSONL log journal, and the chat transcript.

pub mod chat;
pub mod embedding;
pub mod error;
pub mod journal;
pub mod model;
pub mod store;
pub mod trends;

/// Persisted chat conversation.
pub use chat::FileChatTranscript;
/// Embedding interface, default hash encoder, and similarity metric.
pub use embedding::{EMBEDDING_DIMENSIONS, Embedder, HashEmbedder, cosine_similarity};
/// Memory error type.
pub use error::MemoryError;
/// File-backed log journal.
pub use journal::FileLogJournal;
/// Stored document model.
pub use model::MemoryDocument;
/// Similarity store.
pub use store::SimilarityMemoryStore;
/// Trend and summary types.
pub use trends::{PeriodSummary, Timeframe, TrendPoint};
