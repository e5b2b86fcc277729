//! JSONL transcript of the coaching conversation.

use crate::error::MemoryError;
use fitcoach_protocol::ChatMessage;
use log::{debug, info};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Conversation history kept next to the log journal, one message per line.
#[derive(Debug, Clone)]
pub struct FileChatTranscript {
    path: PathBuf,
}

impl FileChatTranscript {
    /// Open a transcript at `path`, creating parent directories.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        debug!("opened chat transcript (path={})", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, message: &ChatMessage) -> Result<(), MemoryError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(message)?;
        writeln!(file, "{line}")?;
        debug!(
            "appended chat message (role={}, content_len={})",
            message.role.as_str(),
            message.content.len()
        );
        Ok(())
    }

    /// Load the conversation oldest first. A missing file is an empty transcript.
    pub fn load(&self) -> Result<Vec<ChatMessage>, MemoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(OpenOptions::new().read(true).open(&self.path)?);
        let mut messages = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let message: ChatMessage =
                serde_json::from_str(&line).map_err(|err| MemoryError::CorruptLine {
                    line: index + 1,
                    message: err.to_string(),
                })?;
            messages.push(message);
        }
        debug!(
            "loaded chat transcript (path={}, messages={})",
            self.path.display(),
            messages.len()
        );
        Ok(messages)
    }

    /// Drop the whole conversation.
    pub fn clear(&self) -> Result<(), MemoryError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("cleared chat transcript (path={})", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitcoach_protocol::ChatRole;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn conversation_survives_reopen() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("chat.jsonl");
        let question = ChatMessage::user("should I deload?");
        let answer = ChatMessage::assistant("Yes, drop volume by a third.");
        {
            let transcript = FileChatTranscript::new(&path).expect("transcript");
            assert_eq!(transcript.load().expect("load"), Vec::new());
            transcript.append(&question).expect("append question");
            transcript.append(&answer).expect("append answer");
        }

        let reopened = FileChatTranscript::new(&path).expect("reopen");
        let messages = reopened.load().expect("load");
        assert_eq!(messages, vec![question, answer]);
        assert_eq!(messages[0].role, ChatRole::User);
    }

    #[test]
    fn clear_empties_and_tolerates_missing_file() {
        let temp = tempdir().expect("tempdir");
        let transcript = FileChatTranscript::new(temp.path().join("chat.jsonl")).expect("transcript");
        transcript.clear().expect("clear missing");
        transcript
            .append(&ChatMessage::user("hi"))
            .expect("append");
        transcript.clear().expect("clear");
        assert!(!transcript.path().exists());
        assert_eq!(transcript.load().expect("load"), Vec::new());
    }

    #[test]
    fn corrupt_line_reports_position() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("chat.jsonl");
        std::fs::write(&path, "{\"broken\": true}\n").expect("write");
        let transcript = FileChatTranscript::new(&path).expect("transcript");
        let err = transcript.load().unwrap_err();
        assert!(matches!(err, MemoryError::CorruptLine { line: 1, .. }));
    }
}
