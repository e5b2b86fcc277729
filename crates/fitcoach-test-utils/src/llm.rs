use async_trait::async_trait;
use fitcoach_core::{ChatModel, CoachError};
use fitcoach_protocol::{ChatMessage, ChatRole};
use parking_lot::Mutex;
use std::sync::Arc;

/// Always answers with the same text.
#[derive(Debug, Clone)]
pub struct FixedChatModel {
    response: String,
}

impl FixedChatModel {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl ChatModel for FixedChatModel {
    async fn complete(
        &self,
        _system_prompt: &str,
        _messages: &[ChatMessage],
    ) -> Result<String, CoachError> {
        Ok(self.response.clone())
    }
}

/// Always fails with an upstream status error.
#[derive(Debug, Clone, Default)]
pub struct FailingChatModel;

#[async_trait]
impl ChatModel for FailingChatModel {
    async fn complete(
        &self,
        _system_prompt: &str,
        _messages: &[ChatMessage],
    ) -> Result<String, CoachError> {
        Err(CoachError::Status {
            status: 500,
            body: "upstream unavailable".to_string(),
        })
    }
}

/// A captured `complete` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub system_prompt: String,
    pub messages: Vec<(ChatRole, String)>,
}

/// Answers with fixed text and records every request it receives.
#[derive(Debug, Clone)]
pub struct RecordingChatModel {
    response: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingChatModel {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().last().cloned()
    }
}

#[async_trait]
impl ChatModel for RecordingChatModel {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CoachError> {
        self.calls.lock().push(RecordedCall {
            system_prompt: system_prompt.to_string(),
            messages: messages
                .iter()
                .map(|message| (message.role, message.content.clone()))
                .collect(),
        });
        Ok(self.response.clone())
    }
}
