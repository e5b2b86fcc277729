//! Conversational coach replies backed by a chat model and optional research.

use crate::error::CoachError;
use crate::llm::{ChatModel, OpenAiChatModel};
use crate::prompt::PromptBuilder;
use crate::research::{ResearchProvider, enhance_query, fallback_results, summarize_research};
use fitcoach_config::{FitcoachConfig, SearchConfig};
use fitcoach_memory::FileChatTranscript;
use fitcoach_protocol::{ChatMessage, LogRecord};
use log::{debug, info, warn};
use std::sync::Arc;

/// Reply when no chat model is configured.
pub const MISSING_MODEL_REPLY: &str = "I'd love to give you personalized advice! To unlock my full potential, please add your OpenAI API key in the Settings tab.";
/// Reply when the chat model fails.
pub const MODEL_ERROR_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Produces coach replies for chat messages.
///
/// `reply` never fails: a missing model, a failed search, or a failed model
/// call each degrade to a fixed reply.
#[derive(Clone)]
pub struct Coach {
    model: Option<Arc<dyn ChatModel>>,
    research: Option<Arc<dyn ResearchProvider>>,
    prompt: PromptBuilder,
    search: SearchConfig,
}

impl Coach {
    pub fn new(model: Option<Arc<dyn ChatModel>>, prompt: PromptBuilder) -> Self {
        Self {
            model,
            research: None,
            prompt,
            search: SearchConfig::default(),
        }
    }

    /// Build a coach from config, using the OpenAI client when a key is set.
    pub fn from_config(config: &FitcoachConfig) -> Result<Self, CoachError> {
        let model = OpenAiChatModel::from_env(&config.coach)?
            .map(|model| Arc::new(model) as Arc<dyn ChatModel>);
        info!(
            "coach configured (model={}, enabled={}, search={})",
            config.coach.model,
            model.is_some(),
            config.search.enabled
        );
        Ok(Self::new(model, PromptBuilder::from_config(&config.coach))
            .with_search_config(config.search.clone()))
    }

    pub fn with_research(mut self, research: Arc<dyn ResearchProvider>) -> Self {
        self.research = Some(research);
        self
    }

    pub fn with_search_config(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Answer `message` given the prior conversation and logs (newest first).
    pub async fn reply(
        &self,
        history: &[ChatMessage],
        message: &str,
        logs: &[LogRecord],
    ) -> String {
        let Some(model) = self.model.as_ref() else {
            debug!("no chat model configured; returning settings hint");
            return MISSING_MODEL_REPLY.to_string();
        };

        let research = if self.wants_research(message) {
            Some(self.research_notes(message).await)
        } else {
            None
        };

        let mut conversation = history.to_vec();
        conversation.push(ChatMessage::user(message));
        let window = self.prompt.conversation_window(&conversation);
        let system_prompt = self.prompt.build_system_prompt(logs, research.as_deref());

        match model.complete(&system_prompt, window).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!("coach reply failed (error={err})");
                MODEL_ERROR_REPLY.to_string()
            }
        }
    }

    /// Run one persisted turn: reply with the stored conversation as history,
    /// then append the question and the answer to the transcript.
    pub async fn converse(
        &self,
        transcript: &FileChatTranscript,
        message: &str,
        logs: &[LogRecord],
    ) -> Result<String, CoachError> {
        let history = transcript.load()?;
        let question = ChatMessage::user(message);
        let reply = self.reply(&history, message, logs).await;
        transcript.append(&question)?;
        transcript.append(&ChatMessage::assistant(reply.as_str()))?;
        debug!("chat turn stored (history={})", history.len() + 2);
        Ok(reply)
    }

    fn wants_research(&self, message: &str) -> bool {
        self.search.enabled
            && message
                .to_lowercase()
                .contains(&self.search.trigger_keyword.to_lowercase())
    }

    async fn research_notes(&self, message: &str) -> String {
        let results = match self.research.as_ref() {
            Some(provider) => {
                let query = enhance_query(message);
                match provider.search(&query, self.search.max_results).await {
                    Ok(results) => {
                        debug!("research search finished (results={})", results.len());
                        results
                    }
                    Err(err) => {
                        warn!("research search failed (error={err})");
                        fallback_results()
                    }
                }
            }
            None => {
                warn!("research provider not configured; using fallback results");
                fallback_results()
            }
        };
        summarize_research(&results)
    }
}
