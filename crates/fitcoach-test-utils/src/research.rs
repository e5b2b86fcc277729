use async_trait::async_trait;
use fitcoach_core::{CoachError, ResearchProvider, ResearchResult};
use parking_lot::Mutex;
use std::sync::Arc;

/// Returns canned results and remembers the queries it was asked.
#[derive(Debug, Clone, Default)]
pub struct StubResearch {
    results: Vec<ResearchResult>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl StubResearch {
    pub fn new(results: Vec<ResearchResult>) -> Self {
        Self {
            results,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider returning one result with the given title and URL.
    pub fn single(title: &str, url: &str) -> Self {
        Self::new(vec![ResearchResult {
            title: title.to_string(),
            url: url.to_string(),
            snippet: format!("{title} findings"),
            published_date: None,
        }])
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl ResearchProvider for StubResearch {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<ResearchResult>, CoachError> {
        self.queries.lock().push(query.to_string());
        Ok(self.results.iter().take(max_results).cloned().collect())
    }
}

/// Always fails.
#[derive(Debug, Clone, Default)]
pub struct FailingResearch;

#[async_trait]
impl ResearchProvider for FailingResearch {
    async fn search(
        &self,
        _query: &str,
        _max_results: usize,
    ) -> Result<Vec<ResearchResult>, CoachError> {
        Err(CoachError::Research("search backend offline".to_string()))
    }
}
