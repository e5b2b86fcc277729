//! Research search abstraction and result formatting.

use crate::error::CoachError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Terms that already steer a query toward scientific sources.
const SCIENTIFIC_TERMS: [&str; 6] = [
    "exercise physiology",
    "sports science",
    "resistance training",
    "peer reviewed",
    "study",
    "research",
];

const QUERY_SUFFIX: &str = " exercise science research study";
const SUMMARY_RESULTS: usize = 3;
const NO_RESULTS: &str = "No recent research found for this query.";
const SUMMARY_NOTE: &str = "*Note: Always consult with healthcare professionals before making significant changes to your training or nutrition.*";

/// One search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

/// A search backend for exercise science literature.
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<ResearchResult>, CoachError>;
}

/// Append scientific context to a query unless it already has some.
pub fn enhance_query(query: &str) -> String {
    let lowered = query.to_lowercase();
    if SCIENTIFIC_TERMS.iter().any(|term| lowered.contains(term)) {
        query.to_string()
    } else {
        format!("{query}{QUERY_SUFFIX}")
    }
}

/// Render the top results as a markdown research section.
pub fn summarize_research(results: &[ResearchResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS.to_string();
    }
    let summary = results
        .iter()
        .take(SUMMARY_RESULTS)
        .enumerate()
        .map(|(index, result)| {
            format!(
                "**{}. {}**\n{}\n*Source: {}*",
                index + 1,
                result.title,
                result.snippet,
                hostname(&result.url)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("## Latest Research Findings:\n\n{summary}\n\n{SUMMARY_NOTE}")
}

/// Placeholder result used when no search backend is reachable.
pub fn fallback_results() -> Vec<ResearchResult> {
    vec![ResearchResult {
        title: "Exercise Research Database - Search not available".to_string(),
        url: "https://pubmed.ncbi.nlm.nih.gov/".to_string(),
        snippet: "Real-time research search is currently unavailable. Please check your API configuration in settings. For now, recommendations are based on established exercise science principles.".to_string(),
        published_date: Some("2024".to_string()),
    }]
}

/// Host part of a URL, or the input unchanged when it has no scheme.
fn hostname(url: &str) -> &str {
    let Some((_, rest)) = url.split_once("://") else {
        return url;
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host_port = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => host_port,
    }
}
