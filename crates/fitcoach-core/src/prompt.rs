//! System prompt assembly for coach replies.

use fitcoach_config::CoachConfig;
use fitcoach_protocol::{ChatMessage, LogRecord};

/// Builds the coach system prompt and the conversation window.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    /// Recent logs included in the training context block.
    context_logs: usize,
    /// Trailing conversation messages sent with each request.
    history_messages: usize,
}

impl PromptBuilder {
    pub fn new(context_logs: usize, history_messages: usize) -> Self {
        Self {
            context_logs,
            history_messages,
        }
    }

    pub fn from_config(config: &CoachConfig) -> Self {
        Self::new(config.context_logs, config.history_messages)
    }

    /// Build the system prompt from logs (newest first) and optional research notes.
    pub fn build_system_prompt(&self, logs: &[LogRecord], research: Option<&str>) -> String {
        let logs_summary = logs
            .iter()
            .take(self.context_logs)
            .map(|log| format!("{}: {}", log.timestamp.format("%Y-%m-%d"), log.content))
            .collect::<Vec<_>>()
            .join("\n");
        let research_section = match research {
            Some(notes) if !notes.is_empty() => {
                format!("## Latest Research Context:\n{notes}\n")
            }
            _ => String::new(),
        };

        format!(
            "{PERSONA}\n\n\
## Current Training Context:\n\
Recent training logs:\n\
```\n\
{logs_summary}\n\
```\n\n\
{research_section}\n\n\
{RESPONSE_GUIDE}"
        )
    }

    /// The trailing slice of the conversation sent to the model.
    pub fn conversation_window<'a>(&self, messages: &'a [ChatMessage]) -> &'a [ChatMessage] {
        let start = messages.len().saturating_sub(self.history_messages);
        &messages[start..]
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::from_config(&CoachConfig::default())
    }
}

const PERSONA: &str = "You are an elite AI fitness coach with deep expertise in evidence-based training, nutrition, and recovery. Your persona combines the analytical rigor of a sports scientist with the motivational energy of a world-class trainer.

## Core Principles:
- **Science-First**: Always base recommendations on peer-reviewed research
- **Individual Context**: Consider the user's complete training history and current state
- **Notion-Style Formatting**: Use markdown with code blocks for key metrics, structured data, and actionable items
- **Motivational Tone**: Be direct, encouraging, and goal-oriented
- **Practical Application**: Provide specific, actionable guidance";

const RESPONSE_GUIDE: &str = "## Response Format:
- Use **bold** for key concepts and recommendations
- Use `code blocks` for specific metrics, rep ranges, percentages
- Use bullet points and numbered lists for clarity
- Include relevant emojis sparingly for visual structure
- Always provide reasoning behind recommendations

## Key Areas of Expertise:
- Progressive overload and periodization
- Recovery optimization (sleep, nutrition, stress)
- Body composition changes during cuts/bulks
- DOMS interpretation and training adjustments
- Exercise selection and form optimization
- Injury prevention and movement quality

Respond as if you're analyzing data in real-time, connecting patterns from their training history to provide personalized, science-backed guidance.";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fitcoach_protocol::LogType;
    use pretty_assertions::assert_eq;

    fn log_on(day: u32, content: &str) -> LogRecord {
        let timestamp = Utc
            .with_ymd_and_hms(2024, 3, day, 9, 0, 0)
            .single()
            .expect("timestamp");
        LogRecord::with_timestamp(LogType::Workout, content, None, timestamp)
    }

    #[test]
    fn prompt_lists_logs_by_date() {
        let builder = PromptBuilder::new(10, 10);
        let logs = vec![log_on(2, "arm day"), log_on(1, "leg day")];
        let prompt = builder.build_system_prompt(&logs, None);
        assert!(prompt.contains("```\n2024-03-02: arm day\n2024-03-01: leg day\n```"));
        assert!(!prompt.contains("## Latest Research Context:"));
        assert!(prompt.starts_with("You are an elite AI fitness coach"));
        assert!(prompt.ends_with("science-backed guidance."));
    }

    #[test]
    fn prompt_caps_context_logs() {
        let builder = PromptBuilder::new(2, 10);
        let logs = vec![log_on(3, "c"), log_on(2, "b"), log_on(1, "a")];
        let prompt = builder.build_system_prompt(&logs, None);
        assert!(prompt.contains("2024-03-02: b"));
        assert!(!prompt.contains("2024-03-01: a"));
    }

    #[test]
    fn prompt_includes_research_section() {
        let builder = PromptBuilder::default();
        let prompt = builder.build_system_prompt(&[], Some("protein timing matters less"));
        assert!(prompt.contains("## Latest Research Context:\nprotein timing matters less\n"));
    }

    #[test]
    fn conversation_window_keeps_tail() {
        let builder = PromptBuilder::new(10, 2);
        let messages = vec![
            ChatMessage::user("one"),
            ChatMessage::assistant("two"),
            ChatMessage::user("three"),
        ];
        let window: Vec<_> = builder
            .conversation_window(&messages)
            .iter()
            .map(|message| message.content.as_str())
            .collect();
        assert_eq!(window, vec!["two", "three"]);
    }
}
