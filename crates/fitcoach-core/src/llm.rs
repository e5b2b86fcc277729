//! Chat model abstraction and the OpenAI-compatible HTTP client.

use crate::error::CoachError;
use async_trait::async_trait;
use fitcoach_config::CoachConfig;
use fitcoach_protocol::ChatMessage;
use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

/// Text returned when the model answers without any content.
pub const EMPTY_COMPLETION_REPLY: &str =
    "I apologize, but I encountered an error processing your request.";

/// A language model that turns a system prompt and a conversation into a reply.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CoachError>;
}

/// Chat completions client for OpenAI-compatible endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiChatModel {
    client: reqwest::Client,
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiChatModel {
    /// Build a client from coach settings and an explicit API key.
    pub fn new(config: &CoachConfig, api_key: &str) -> Result<Self, CoachError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(CoachError::MissingApiKey(config.api_key_env.clone()));
        }
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|err| {
                CoachError::InvalidResponse(format!("invalid API key header: {err}"))
            })?,
        );
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Build a client reading the key from the configured environment variable.
    ///
    /// Returns `Ok(None)` when the variable is unset or blank.
    pub fn from_env(config: &CoachConfig) -> Result<Option<Self>, CoachError> {
        match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Self::new(config, &key).map(Some),
            _ => {
                debug!("api key not set (env={})", config.api_key_env);
                Ok(None)
            }
        }
    }

    fn chat_completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            return base.to_string();
        }
        format!("{base}/chat/completions")
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn complete(
        &self,
        system_prompt: &str,
        messages: &[ChatMessage],
    ) -> Result<String, CoachError> {
        let body = build_request_body(
            &self.model,
            self.temperature,
            self.max_tokens,
            system_prompt,
            messages,
        );
        let url = self.chat_completions_url();
        debug!(
            "sending chat completion (model={}, messages={})",
            self.model,
            body.messages.len()
        );
        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            warn!("chat completion failed (status={})", status.as_u16());
            return Err(CoachError::Status {
                status: status.as_u16(),
                body: raw,
            });
        }
        parse_completion(&raw)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

fn build_request_body<'a>(
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    system_prompt: &'a str,
    messages: &'a [ChatMessage],
) -> CompletionRequest<'a> {
    let mut request_messages = Vec::with_capacity(messages.len() + 1);
    request_messages.push(RequestMessage {
        role: "system",
        content: system_prompt,
    });
    request_messages.extend(messages.iter().map(|message| RequestMessage {
        role: message.role.as_str(),
        content: &message.content,
    }));
    CompletionRequest {
        model,
        temperature,
        max_tokens,
        messages: request_messages,
    }
}

/// First choice text, or the apology string when the model returned none.
fn parse_completion(raw: &str) -> Result<String, CoachError> {
    let parsed: CompletionResponse = serde_json::from_str(raw)?;
    let text = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty());
    Ok(text.unwrap_or_else(|| EMPTY_COMPLETION_REPLY.to_string()))
}
