//! Plain-text rendering for CLI output.

use fitcoach_memory::{MemoryDocument, TrendPoint};
use fitcoach_protocol::{LogRecord, MetricKind};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One line per stored log: id, time, type, content.
pub fn render_history(records: &[LogRecord]) -> String {
    if records.is_empty() {
        return "No logs recorded yet.".to_string();
    }
    records
        .iter()
        .map(|record| {
            format!(
                "{}  {}  [{}]  {}",
                record.id,
                record.timestamp.format(TIMESTAMP_FORMAT),
                record.log_type,
                record.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Similarity hits with their score.
pub fn render_matches(matches: &[(f32, MemoryDocument)]) -> String {
    if matches.is_empty() {
        return "No matching logs.".to_string();
    }
    matches
        .iter()
        .map(|(score, document)| {
            format!(
                "{score:.3}  {}  [{}]  {}",
                document.timestamp.format(TIMESTAMP_FORMAT),
                document.log_type,
                document.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Documents for a single day.
pub fn render_documents(documents: &[MemoryDocument]) -> String {
    if documents.is_empty() {
        return "No logs on this day.".to_string();
    }
    documents
        .iter()
        .map(|document| {
            format!(
                "{}  [{}]  {}",
                document.timestamp.format("%H:%M"),
                document.log_type,
                document.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Metric values over time, oldest first.
pub fn render_trend(metric: MetricKind, days: i64, points: &[TrendPoint]) -> String {
    if points.is_empty() {
        return format!("No {metric} data in the last {days} days.");
    }
    let mut lines = vec![format!("{metric} over the last {days} days:")];
    lines.extend(points.iter().map(|point| {
        format!(
            "{}  {}{}",
            point.date.format("%Y-%m-%d"),
            point.value,
            metric.unit()
        )
    }));
    lines.join("\n")
}
