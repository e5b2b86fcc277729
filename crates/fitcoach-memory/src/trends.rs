//! Metric trends and periodic digests computed over stored documents.

use crate::error::MemoryError;
use crate::store::SimilarityMemoryStore;
use chrono::{DateTime, Duration, Utc};
use fitcoach_protocol::{LogType, MetricKind, extract_doms};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Summary window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// Trailing 7 days.
    Week,
    /// Trailing 30 days.
    Month,
}

impl Timeframe {
    pub fn days(&self) -> i64 {
        match self {
            Timeframe::Week => 7,
            Timeframe::Month => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Week => "week",
            Timeframe::Month => "month",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Timeframe::Week => "Week",
            Timeframe::Month => "Month",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = MemoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Timeframe::Week),
            "month" => Ok(Timeframe::Month),
            other => Err(MemoryError::InvalidTimeframe(other.to_string())),
        }
    }
}

/// One dated metric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub value: f64,
}

/// Digest of the logs inside a timeframe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub timeframe: Timeframe,
    pub total_logs: usize,
    pub workout_count: usize,
    /// Mean DOMS re-scanned from raw content; 0 when no log mentions one.
    pub average_doms: f64,
    pub most_frequent_type: Option<LogType>,
}

impl PeriodSummary {
    /// Render the digest as chat-ready markdown.
    pub fn render(&self) -> String {
        let Some(most_frequent) = self.most_frequent_type.filter(|_| self.total_logs > 0) else {
            return "No training data available for this timeframe.".to_string();
        };
        format!(
            "**{} Summary:**\n\
- Total workouts: `{}`\n\
- Average DOMS: `{:.1}/10`\n\
- Total logs: `{}`\n\
- Most frequent log type: `{}`",
            self.timeframe.title(),
            self.workout_count,
            self.average_doms,
            self.total_logs,
            most_frequent
        )
    }
}

impl fmt::Display for PeriodSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl SimilarityMemoryStore {
    /// Values of `metric` over the trailing `days`, oldest first.
    pub fn metric_trend(&self, metric: MetricKind, days: i64) -> Vec<TrendPoint> {
        self.metric_trend_at(metric, days, Utc::now())
    }

    /// `metric_trend` with an explicit reference time.
    pub fn metric_trend_at(
        &self,
        metric: MetricKind,
        days: i64,
        now: DateTime<Utc>,
    ) -> Vec<TrendPoint> {
        let start = Duration::try_days(days)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut points: Vec<TrendPoint> = self
            .range_query(start, now)
            .into_iter()
            .filter_map(|doc| {
                let value = doc.structured.as_ref()?.metric(metric)?;
                Some(TrendPoint {
                    date: doc.timestamp,
                    value,
                })
            })
            .collect();
        points.sort_by_key(|point| point.date);
        points
    }

    /// Digest of the trailing timeframe.
    pub fn period_summary(&self, timeframe: Timeframe) -> PeriodSummary {
        self.period_summary_at(timeframe, Utc::now())
    }

    /// `period_summary` with an explicit reference time.
    pub fn period_summary_at(&self, timeframe: Timeframe, now: DateTime<Utc>) -> PeriodSummary {
        let start = now - Duration::days(timeframe.days());
        let documents = self.range_query(start, now);

        let workout_count = documents
            .iter()
            .filter(|doc| doc.log_type == LogType::Workout)
            .count();

        let doms_values: Vec<u32> = documents
            .iter()
            .filter_map(|doc| extract_doms(&doc.content))
            .collect();
        let average_doms = if doms_values.is_empty() {
            0.0
        } else {
            doms_values.iter().map(|value| f64::from(*value)).sum::<f64>()
                / doms_values.len() as f64
        };

        // Counted in first-seen order so ties go to the earliest type.
        let mut counts: Vec<(LogType, usize)> = Vec::new();
        for doc in &documents {
            match counts.iter_mut().find(|(log_type, _)| *log_type == doc.log_type) {
                Some((_, count)) => *count += 1,
                None => counts.push((doc.log_type, 1)),
            }
        }
        let mut most_frequent_type: Option<(LogType, usize)> = None;
        for (log_type, count) in counts {
            if most_frequent_type.is_none_or(|(_, best)| count > best) {
                most_frequent_type = Some((log_type, count));
            }
        }

        PeriodSummary {
            timeframe,
            total_logs: documents.len(),
            workout_count,
            average_doms,
            most_frequent_type: most_frequent_type.map(|(log_type, _)| log_type),
        }
    }
}
