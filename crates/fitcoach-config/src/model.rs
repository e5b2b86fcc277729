//! Configuration schema for fitcoach.

use serde::{Deserialize, Serialize};

/// Root config.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FitcoachConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub coach: CoachConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Language model settings for coach replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Recent logs included in the system prompt.
    #[serde(default = "default_context_logs")]
    pub context_logs: usize,
    /// Trailing conversation messages sent with each request.
    #[serde(default = "default_history_messages")]
    pub history_messages: usize,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            context_logs: default_context_logs(),
            history_messages: default_history_messages(),
        }
    }
}

fn default_model() -> String {
    "gpt-4.1-2025-04-14".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_context_logs() -> usize {
    10
}

fn default_history_messages() -> usize {
    10
}

/// Research search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Messages containing this keyword trigger a search.
    #[serde(default = "default_trigger_keyword")]
    pub trigger_keyword: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            trigger_keyword: default_trigger_keyword(),
            max_results: default_max_results(),
        }
    }
}

fn default_trigger_keyword() -> String {
    "research".to_string()
}

fn default_max_results() -> usize {
    5
}

/// Log memory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Default number of documents returned by recall.
    #[serde(default = "default_recall_limit")]
    pub recall_limit: usize,
    /// Optional JSONL journal path; logs are kept in memory only when unset.
    #[serde(default)]
    pub journal_path: Option<String>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            recall_limit: default_recall_limit(),
            journal_path: None,
        }
    }
}

fn default_recall_limit() -> usize {
    5
}
