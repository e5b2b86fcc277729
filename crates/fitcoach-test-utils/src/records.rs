use chrono::{DateTime, Duration, Utc};
use fitcoach_protocol::{LogRecord, LogType, StructuredData};

/// A record stamped at an explicit time; the extractor runs over `content`.
pub fn record_at(log_type: LogType, content: &str, timestamp: DateTime<Utc>) -> LogRecord {
    LogRecord::with_timestamp(log_type, content, None, timestamp)
}

/// A record stamped `days` days before `now`.
pub fn record_days_ago(
    log_type: LogType,
    content: &str,
    days: i64,
    now: DateTime<Utc>,
) -> LogRecord {
    record_at(log_type, content, now - Duration::days(days))
}

/// A record with explicit structured data stamped `days` days before `now`.
pub fn structured_record_days_ago(
    log_type: LogType,
    content: &str,
    structured: StructuredData,
    days: i64,
    now: DateTime<Utc>,
) -> LogRecord {
    LogRecord::with_timestamp(log_type, content, Some(structured), now - Duration::days(days))
}
