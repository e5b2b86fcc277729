//! Deterministic coaching summary for a freshly submitted log.

use fitcoach_protocol::{LogRecord, MetricKind, StructuredData};

/// Reply used when a log carries none of the tracked metrics.
pub const GENERIC_ACKNOWLEDGMENT: &str =
    "📝 Log recorded! I'll analyze this with your historical data to provide better coaching.";

const HEADER: &str = "📊 **Log Analysis**";
const FOOTER: &str = "💡 Keep tracking consistently for better insights!";

/// Hours of sleep counted as a good night.
const GOOD_SLEEP_HOURS: f64 = 7.0;

/// Build the coaching reply for a stored log record.
pub fn record_response(record: &LogRecord) -> String {
    match record.structured.as_ref() {
        Some(structured) => coaching_response(structured),
        None => GENERIC_ACKNOWLEDGMENT.to_string(),
    }
}

/// Build the coaching reply for structured metrics.
///
/// Lines appear in a fixed order (DOMS, weight, waist, body fat, sleep) and
/// only for metrics that are present.
pub fn coaching_response(structured: &StructuredData) -> String {
    if !structured.has_metrics() {
        return GENERIC_ACKNOWLEDGMENT.to_string();
    }

    let mut lines = vec![HEADER.to_string(), String::new()];
    if let Some(doms) = structured.doms_score() {
        lines.push(doms_line(doms).to_string());
    }
    if let Some(weight) = structured.metric(MetricKind::Weight) {
        lines.push(format!("⚖️ Weight: `{weight}kg` logged"));
    }
    if let Some(waist) = structured.metric(MetricKind::Waist) {
        lines.push(format!("📏 Waist: `{waist}cm` recorded"));
    }
    if let Some(body_fat) = structured.metric(MetricKind::BodyFat) {
        lines.push(format!("📊 Body Fat: `{body_fat}%` tracked"));
    }
    if let Some(sleep) = structured.metric(MetricKind::Sleep) {
        let verdict = if sleep >= GOOD_SLEEP_HOURS {
            "good"
        } else {
            "could be better"
        };
        lines.push(format!("😴 Sleep: `{sleep}h` - {verdict}"));
    }
    lines.push(String::new());
    lines.push(FOOTER.to_string());
    lines.join("\n")
}

fn doms_line(doms: u32) -> &'static str {
    match doms {
        0..=2 => "✅ Low DOMS - good recovery, ready for intensity",
        3..=4 => "⚠️ Moderate DOMS - consider lighter training",
        _ => "🔴 High DOMS - prioritize recovery today",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_protocol::{BodyMeasurements, LogType, RecoveryData};
    use pretty_assertions::assert_eq;

    #[test]
    fn full_metric_reply_lists_every_line_in_order() {
        let structured = StructuredData {
            doms: Some(6),
            weight: Some(80.0),
            waist: Some(84.5),
            body_fat: Some(15.0),
            sleep: Some(8.0),
            ..StructuredData::default()
        };
        assert_eq!(
            coaching_response(&structured),
            "📊 **Log Analysis**\n\n\
🔴 High DOMS - prioritize recovery today\n\
⚖️ Weight: `80kg` logged\n\
📏 Waist: `84.5cm` recorded\n\
📊 Body Fat: `15%` tracked\n\
😴 Sleep: `8h` - good\n\n\
💡 Keep tracking consistently for better insights!"
        );
    }

    #[test]
    fn doms_bands() {
        assert!(doms_line(1).starts_with("✅ Low DOMS"));
        assert!(doms_line(2).starts_with("✅ Low DOMS"));
        assert!(doms_line(3).starts_with("⚠️ Moderate DOMS"));
        assert!(doms_line(4).starts_with("⚠️ Moderate DOMS"));
        assert!(doms_line(5).starts_with("🔴 High DOMS"));
        assert!(doms_line(10).starts_with("🔴 High DOMS"));
    }

    #[test]
    fn extracted_free_text_reply() {
        let record = LogRecord::new(
            LogType::Workout,
            "DOMS 3, 71.4kg, 6.5h sleep, sore triceps",
            None,
        );
        let reply = record_response(&record);
        assert!(reply.contains("DOMS"));
        assert!(reply.contains("71.4kg"));
        assert!(reply.contains("6.5h"));
        assert!(reply.contains("could be better"));
    }

    #[test]
    fn nested_measurements_are_reported() {
        let structured = StructuredData {
            body_measurements: Some(BodyMeasurements {
                weight: Some(72.0),
                ..BodyMeasurements::default()
            }),
            recovery: Some(RecoveryData {
                doms: Some(1),
                ..RecoveryData::default()
            }),
            ..StructuredData::default()
        };
        let reply = coaching_response(&structured);
        assert!(reply.contains("✅ Low DOMS"));
        assert!(reply.contains("`72kg`"));
    }

    #[test]
    fn unstructured_record_gets_acknowledgment() {
        let record = LogRecord::new(LogType::Workout, "leg day, felt great", None);
        assert_eq!(record.structured, None);
        assert_eq!(record_response(&record), GENERIC_ACKNOWLEDGMENT);
    }

    #[test]
    fn structured_without_metrics_gets_acknowledgment() {
        let structured = StructuredData {
            recovery: Some(RecoveryData {
                hrv: Some(55.0),
                ..RecoveryData::default()
            }),
            ..StructuredData::default()
        };
        assert_eq!(coaching_response(&structured), GENERIC_ACKNOWLEDGMENT);
    }
}
