//! Memory document model derived from log records.

use chrono::{DateTime, Utc};
use fitcoach_protocol::{LogId, LogRecord, LogType, StructuredData};
use serde::{Deserialize, Serialize};

/// Encoded copy of a log held by the similarity store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryDocument {
    /// Identifier of the owning log record.
    pub id: LogId,
    /// Log content that was embedded.
    pub content: String,
    /// Log creation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Log category.
    #[serde(rename = "type")]
    pub log_type: LogType,
    /// Structured fields copied from the log, used for trends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured: Option<StructuredData>,
    /// Embedding of `content`.
    pub embedding: Vec<f32>,
}

impl MemoryDocument {
    /// Build a document for a record with a precomputed embedding.
    pub fn from_record(record: &LogRecord, embedding: Vec<f32>) -> Self {
        Self {
            id: record.id,
            content: record.content.clone(),
            timestamp: record.timestamp,
            log_type: record.log_type,
            structured: record.structured.clone(),
            embedding,
        }
    }

    /// Rebuild the log view of this document (attachments are not kept).
    pub fn to_record(&self) -> LogRecord {
        LogRecord {
            id: self.id,
            timestamp: self.timestamp,
            log_type: self.log_type,
            content: self.content.clone(),
            structured: self.structured.clone(),
            attachments: None,
        }
    }
}
