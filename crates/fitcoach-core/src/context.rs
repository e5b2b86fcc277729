//! Owner of the log list, its similarity memory, and the optional journal.

use crate::error::CoachError;
use crate::response::record_response;
use chrono::NaiveDate;
use fitcoach_memory::{
    FileLogJournal, MemoryDocument, PeriodSummary, SimilarityMemoryStore, Timeframe, TrendPoint,
};
use fitcoach_protocol::{LogId, LogRecord, LogType, MetricKind, StructuredData};
use log::{debug, info};

/// Keeps records, memory documents, and journal lines in step.
///
/// Records are held newest first. Every record has exactly one document in
/// the store; deleting a record removes its document and its journal line.
pub struct CoachContext {
    records: Vec<LogRecord>,
    store: SimilarityMemoryStore,
    journal: Option<FileLogJournal>,
}

impl CoachContext {
    /// Create an in-memory context with a ready store.
    pub fn new() -> Self {
        Self::with_store(SimilarityMemoryStore::initialized())
    }

    /// Create an in-memory context around an existing store, initializing
    /// it if needed.
    pub fn with_store(mut store: SimilarityMemoryStore) -> Self {
        if !store.is_ready() {
            debug!("initializing store handed to coach context");
            store.initialize();
        }
        Self {
            records: Vec::new(),
            store,
            journal: None,
        }
    }

    /// Open a journal-backed context, replaying stored records into memory.
    pub fn open(journal: FileLogJournal) -> Result<Self, CoachError> {
        let mut records = journal.load()?;
        let mut store = SimilarityMemoryStore::initialized();
        for record in &records {
            store.insert(record);
        }
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        info!(
            "coach context opened (path={}, records={})",
            journal.path().display(),
            records.len()
        );
        Ok(Self {
            records,
            store,
            journal: Some(journal),
        })
    }

    /// Create a log from user input and return it with its coaching reply.
    pub fn submit_log(
        &mut self,
        log_type: LogType,
        content: impl Into<String>,
        structured: Option<StructuredData>,
    ) -> Result<(LogRecord, String), CoachError> {
        let record = LogRecord::new(log_type, content, structured);
        let response = self.add_record(record.clone())?;
        Ok((record, response))
    }

    /// Store a prepared record and return its coaching reply.
    ///
    /// A record whose id is already present replaces the earlier version.
    pub fn add_record(&mut self, record: LogRecord) -> Result<String, CoachError> {
        if let Some(journal) = &self.journal {
            journal.append(&record)?;
        }
        self.store.insert(&record);
        self.records.retain(|existing| existing.id != record.id);
        let position = self
            .records
            .iter()
            .position(|existing| existing.timestamp <= record.timestamp)
            .unwrap_or(self.records.len());
        debug!(
            "log stored (id={}, type={}, structured={})",
            record.id,
            record.log_type,
            record.structured.is_some()
        );
        let response = record_response(&record);
        self.records.insert(position, record);
        Ok(response)
    }

    /// Delete a log along with its memory document and journal line.
    pub fn delete_log(&mut self, id: LogId) -> Result<bool, CoachError> {
        let journal_removed = match &self.journal {
            Some(journal) => journal.remove(id)?,
            None => false,
        };
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        let record_removed = self.records.len() != before;
        let document_removed = self.store.remove(id);
        debug!(
            "log delete (id={id}, record={record_removed}, document={document_removed}, journal={journal_removed})"
        );
        Ok(record_removed || document_removed || journal_removed)
    }

    /// All records, newest first.
    pub fn logs(&self) -> &[LogRecord] {
        &self.records
    }

    /// The `limit` most recent records.
    pub fn recent_logs(&self, limit: usize) -> &[LogRecord] {
        &self.records[..limit.min(self.records.len())]
    }

    /// Look up a record by id.
    pub fn get(&self, id: LogId) -> Option<&LogRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn store(&self) -> &SimilarityMemoryStore {
        &self.store
    }

    pub fn journal(&self) -> Option<&FileLogJournal> {
        self.journal.as_ref()
    }

    /// Documents most similar to `text`.
    pub fn search(&self, text: &str, limit: usize) -> Vec<MemoryDocument> {
        self.store.query(text, limit)
    }

    /// Values of `metric` over the last `days` days, oldest first.
    pub fn trend(&self, metric: MetricKind, days: i64) -> Vec<TrendPoint> {
        self.store.metric_trend(metric, days)
    }

    /// Aggregate summary for the trailing week or month.
    pub fn summary(&self, timeframe: Timeframe) -> PeriodSummary {
        self.store.period_summary(timeframe)
    }

    /// Documents logged on a calendar day (UTC).
    pub fn day(&self, day: NaiveDate) -> Vec<MemoryDocument> {
        self.store.day_query(day)
    }
}

impl Default for CoachContext {
    fn default() -> Self {
        Self::new()
    }
}
