//! In-memory similarity store over embedded log documents.
//!
//! The store is not ready until `initialize` is called. Until then every
//! operation logs a warning and returns an empty result instead of failing.
//! `is_ready` lets callers check first.

use crate::embedding::{Embedder, HashEmbedder, cosine_similarity};
use crate::model::MemoryDocument;
use chrono::{DateTime, NaiveDate, Utc};
use fitcoach_protocol::{LogId, LogRecord};
use log::{debug, info, warn};
use std::sync::Arc;

/// Ordered list of memory documents with similarity and time-range recall.
pub struct SimilarityMemoryStore {
    /// Documents in insertion order.
    documents: Vec<MemoryDocument>,
    /// Encoder applied to stored content and queries.
    embedder: Arc<dyn Embedder>,
    /// Set by `initialize`.
    ready: bool,
}

impl SimilarityMemoryStore {
    /// Create an uninitialized store using the hash embedder.
    pub fn new() -> Self {
        Self::with_embedder(Arc::new(HashEmbedder::new()))
    }

    /// Create an uninitialized store using a custom embedder.
    pub fn with_embedder(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            documents: Vec::new(),
            embedder,
            ready: false,
        }
    }

    /// Create a store that is already initialized.
    pub fn initialized() -> Self {
        let mut store = Self::new();
        store.initialize();
        store
    }

    /// Mark the store ready for use.
    pub fn initialize(&mut self) {
        self.ready = true;
        info!(
            "memory store initialized (dimensions={})",
            self.embedder.dimensions()
        );
    }

    /// Whether `initialize` has been called.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Embedder used by this store.
    pub fn embedder(&self) -> &dyn Embedder {
        self.embedder.as_ref()
    }

    /// Embed and store a record, replacing any document with the same id.
    ///
    /// A replaced document keeps its original position. Returns false when
    /// the store is not ready.
    pub fn insert(&mut self, record: &LogRecord) -> bool {
        if !self.ensure_ready("insert") {
            return false;
        }
        let document = MemoryDocument::from_record(record, self.embedder.embed(&record.content));
        match self.documents.iter_mut().find(|doc| doc.id == record.id) {
            Some(existing) => {
                *existing = document;
                debug!("replaced memory document (id={})", record.id);
            }
            None => {
                self.documents.push(document);
                debug!(
                    "stored memory document (id={}, type={}, total={})",
                    record.id,
                    record.log_type,
                    self.documents.len()
                );
            }
        }
        true
    }

    /// Remove the document owned by a log record.
    pub fn remove(&mut self, id: LogId) -> bool {
        if !self.ensure_ready("remove") {
            return false;
        }
        let before = self.documents.len();
        self.documents.retain(|doc| doc.id != id);
        let removed = self.documents.len() != before;
        debug!("remove memory document (id={}, removed={})", id, removed);
        removed
    }

    /// Look up a document by id.
    pub fn get(&self, id: LogId) -> Option<&MemoryDocument> {
        if !self.ensure_ready("get") {
            return None;
        }
        self.documents.iter().find(|doc| doc.id == id)
    }

    /// All documents in insertion order.
    pub fn documents(&self) -> &[MemoryDocument] {
        if !self.ensure_ready("documents") {
            return &[];
        }
        &self.documents
    }

    /// Return up to `limit` documents most similar to `text`.
    ///
    /// Results are ordered by descending similarity; equal scores keep
    /// insertion order.
    pub fn query(&self, text: &str, limit: usize) -> Vec<MemoryDocument> {
        self.query_scored(text, limit)
            .into_iter()
            .map(|(_, doc)| doc)
            .collect()
    }

    /// Like `query`, paired with each document's similarity score.
    pub fn query_scored(&self, text: &str, limit: usize) -> Vec<(f32, MemoryDocument)> {
        if !self.ensure_ready("query") || limit == 0 {
            return Vec::new();
        }
        let query_embedding = self.embedder.embed(text);
        let mut scored: Vec<(f32, &MemoryDocument)> = self
            .documents
            .iter()
            .map(|doc| (cosine_similarity(&query_embedding, &doc.embedding), doc))
            .collect();
        // Stable sort keeps insertion order among ties.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(limit);
        debug!(
            "memory query (query_len={}, limit={}, returned={})",
            text.len(),
            limit,
            scored.len()
        );
        scored
            .into_iter()
            .map(|(score, doc)| (score, doc.clone()))
            .collect()
    }

    /// Documents with a timestamp in `[start, end]`, in insertion order.
    pub fn range_query(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<MemoryDocument> {
        if !self.ensure_ready("range_query") {
            return Vec::new();
        }
        self.documents
            .iter()
            .filter(|doc| doc.timestamp >= start && doc.timestamp <= end)
            .cloned()
            .collect()
    }

    /// Documents logged on a calendar day (UTC).
    pub fn day_query(&self, day: NaiveDate) -> Vec<MemoryDocument> {
        if !self.ensure_ready("day_query") {
            return Vec::new();
        }
        self.documents
            .iter()
            .filter(|doc| doc.timestamp.date_naive() == day)
            .cloned()
            .collect()
    }

    fn ensure_ready(&self, operation: &str) -> bool {
        if !self.ready {
            warn!("memory store not initialized (operation={operation})");
        }
        self.ready
    }
}

impl Default for SimilarityMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
