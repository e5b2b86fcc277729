//! Log records and chat messages exchanged between the forms, chat, and memory.

use crate::extract::extract_structured;
use crate::structured::StructuredData;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a log record.
pub type LogId = Uuid;

/// Category of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    Workout,
    Nutrition,
    Recovery,
    Metrics,
    Strength,
}

impl LogType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Workout => "workout",
            LogType::Nutrition => "nutrition",
            LogType::Recovery => "recovery",
            LogType::Metrics => "metrics",
            LogType::Strength => "strength",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a log type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log type: {0}")]
pub struct ParseLogTypeError(pub String);

impl FromStr for LogType {
    type Err = ParseLogTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "workout" => Ok(LogType::Workout),
            "nutrition" => Ok(LogType::Nutrition),
            "recovery" => Ok(LogType::Recovery),
            "metrics" => Ok(LogType::Metrics),
            "strength" => Ok(LogType::Strength),
            _ => Err(ParseLogTypeError(value.to_string())),
        }
    }
}

/// File metadata carried along with a log. Never inspected by the core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    /// Base64 encoded file content.
    pub content: String,
}

/// A single user log entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogRecord {
    /// Record identifier.
    pub id: LogId,
    /// Creation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Log category.
    #[serde(rename = "type")]
    pub log_type: LogType,
    /// Free-text description.
    pub content: String,
    /// Extracted or declared fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured: Option<StructuredData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl LogRecord {
    /// Create a record stamped now.
    ///
    /// When `structured` is `None` the free-text extractor runs over `content`,
    /// so a record only stays unstructured if nothing was recognized.
    pub fn new(
        log_type: LogType,
        content: impl Into<String>,
        structured: Option<StructuredData>,
    ) -> Self {
        Self::with_timestamp(log_type, content, structured, Utc::now())
    }

    /// Create a record with an explicit timestamp.
    pub fn with_timestamp(
        log_type: LogType,
        content: impl Into<String>,
        structured: Option<StructuredData>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let content = content.into();
        let structured = structured.or_else(|| extract_structured(&content));
        Self {
            id: Uuid::new_v4(),
            timestamp,
            log_type,
            content,
            structured,
            attachments: None,
        }
    }
}

/// Speaker for a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

/// Message in a coaching conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub role: ChatRole,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn new_record_extracts_when_unstructured() {
        let record = LogRecord::new(LogType::Metrics, "weighed in at 80.2kg", None);
        let structured = record.structured.expect("structured");
        assert_eq!(structured.weight, Some(80.2));
    }

    #[test]
    fn declared_structure_bypasses_extractor() {
        let declared = StructuredData {
            sleep: Some(8.0),
            ..StructuredData::default()
        };
        let record = LogRecord::new(LogType::Recovery, "doms 6", Some(declared.clone()));
        assert_eq!(record.structured, Some(declared));
    }

    #[test]
    fn unrecognized_content_stays_unstructured() {
        let record = LogRecord::new(LogType::Workout, "felt great on the bike", None);
        assert_eq!(record.structured, None);
    }

    #[test]
    fn record_serializes_type_field() {
        let record = LogRecord::new(LogType::Strength, "bench", None);
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value["type"], json!("strength"));
        assert!(value.get("structured").is_none());
        let back: LogRecord = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn log_type_parses_case_insensitively() {
        assert_eq!("Workout".parse::<LogType>(), Ok(LogType::Workout));
        assert!("cardio".parse::<LogType>().is_err());
    }
}
