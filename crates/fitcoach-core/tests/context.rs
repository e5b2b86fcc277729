//! Log lifecycle integration tests.

use chrono::Utc;
use fitcoach_core::{CoachContext, GENERIC_ACKNOWLEDGMENT};
use fitcoach_memory::{FileLogJournal, SimilarityMemoryStore, Timeframe};
use fitcoach_protocol::{LogType, MetricKind, StructuredData};
use fitcoach_test_utils::{record_days_ago, structured_record_days_ago};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn submit_log_extracts_and_responds() {
    let mut context = CoachContext::new();
    let (record, response) = context
        .submit_log(
            LogType::Workout,
            "DOMS 3, 71.4kg, 6.5h sleep, sore triceps",
            None,
        )
        .expect("submit");

    let structured = record.structured.clone().expect("structured");
    assert_eq!(structured.doms, Some(3));
    assert_eq!(structured.weight, Some(71.4));
    assert_eq!(structured.sleep, Some(6.5));
    assert!(response.contains("DOMS"));
    assert!(response.contains("71.4kg"));
    assert!(response.contains("could be better"));

    assert_eq!(context.logs().len(), 1);
    assert_eq!(context.store().len(), 1);
    let document = context.store().get(record.id).expect("document");
    assert_eq!(document.content, record.content);
}

#[test]
fn uninitialized_store_is_readied_for_records() {
    let mut context = CoachContext::with_store(SimilarityMemoryStore::new());
    assert!(context.store().is_ready());

    let (record, _) = context
        .submit_log(LogType::Metrics, "waist 84", None)
        .expect("submit");
    assert_eq!(context.store().len(), 1);
    assert!(context.store().get(record.id).is_some());
    assert_eq!(context.search("waist", 1).len(), 1);
}

#[test]
fn plain_log_gets_acknowledgment() {
    let mut context = CoachContext::new();
    let (record, response) = context
        .submit_log(LogType::Workout, "leg day", None)
        .expect("submit");
    assert_eq!(record.structured, None);
    assert_eq!(response, GENERIC_ACKNOWLEDGMENT);
}

#[test]
fn logs_are_newest_first() {
    let now = Utc::now();
    let mut context = CoachContext::new();
    context
        .add_record(record_days_ago(LogType::Workout, "middle", 2, now))
        .expect("add");
    context
        .add_record(record_days_ago(LogType::Workout, "oldest", 5, now))
        .expect("add");
    context
        .add_record(record_days_ago(LogType::Workout, "newest", 0, now))
        .expect("add");

    let contents: Vec<_> = context
        .logs()
        .iter()
        .map(|record| record.content.as_str())
        .collect();
    assert_eq!(contents, vec!["newest", "middle", "oldest"]);
    assert_eq!(context.recent_logs(2).len(), 2);
    assert_eq!(context.recent_logs(10).len(), 3);
}

#[test]
fn delete_removes_record_and_document() {
    let mut context = CoachContext::new();
    let (keep, _) = context
        .submit_log(LogType::Workout, "arm day", None)
        .expect("submit");
    let (drop, _) = context
        .submit_log(LogType::Workout, "leg day", None)
        .expect("submit");

    assert!(context.delete_log(drop.id).expect("delete"));
    assert!(context.get(drop.id).is_none());
    assert!(context.store().get(drop.id).is_none());
    assert!(context.get(keep.id).is_some());
    assert_eq!(context.store().len(), 1);
    assert!(!context.delete_log(drop.id).expect("second delete"));
}

#[test]
fn re_adding_same_record_does_not_duplicate() {
    let now = Utc::now();
    let mut context = CoachContext::new();
    let record = record_days_ago(LogType::Metrics, "80kg", 1, now);
    context.add_record(record.clone()).expect("add");
    context.add_record(record.clone()).expect("add again");
    assert_eq!(context.logs().len(), 1);
    assert_eq!(context.store().len(), 1);
}

#[test]
fn journal_backed_context_survives_reopen() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("logs").join("journal.jsonl");
    let now = Utc::now();

    let (kept, deleted) = {
        let mut context =
            CoachContext::open(FileLogJournal::new(&path).expect("journal")).expect("open");
        let kept = structured_record_days_ago(
            LogType::Metrics,
            "weekly weigh-in",
            StructuredData {
                weight: Some(79.5),
                ..StructuredData::default()
            },
            1,
            now,
        );
        let deleted = record_days_ago(LogType::Workout, "doms 6 after squats", 2, now);
        context.add_record(kept.clone()).expect("add");
        context.add_record(deleted.clone()).expect("add");
        assert!(context.delete_log(deleted.id).expect("delete"));
        (kept, deleted)
    };

    let reopened =
        CoachContext::open(FileLogJournal::new(&path).expect("journal")).expect("reopen");
    assert_eq!(reopened.logs(), &[kept.clone()]);
    assert!(reopened.store().get(deleted.id).is_none());

    let trend = reopened.trend(MetricKind::Weight, 7);
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0].value, 79.5);
}

#[test]
fn summary_and_day_queries_pass_through() {
    let now = Utc::now();
    let mut context = CoachContext::new();
    let today = record_days_ago(LogType::Workout, "doms 4 bench", 0, now);
    context.add_record(today.clone()).expect("add");
    context
        .add_record(record_days_ago(LogType::Nutrition, "oats", 3, now))
        .expect("add");

    let summary = context.summary(Timeframe::Week);
    assert_eq!(summary.total_logs, 2);
    assert_eq!(summary.workout_count, 1);
    assert_eq!(summary.average_doms, 4.0);

    let day = context.day(today.timestamp.date_naive());
    assert!(day.iter().any(|document| document.id == today.id));

    let hits = context.search("doms 4 bench", 1);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, today.id);
}
