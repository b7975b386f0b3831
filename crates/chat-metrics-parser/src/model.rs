use std::fmt;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::errors::SkipReason;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Other(other) => other.as_str(),
        }
    }

    pub fn is_user(&self) -> bool {
        matches!(self, Role::User)
    }

    pub fn is_assistant(&self) -> bool {
        matches!(self, Role::Assistant)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        let lowered = value.to_lowercase();
        match lowered.as_str() {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::Other(lowered),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub timestamp: NaiveDateTime,
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(timestamp: NaiveDateTime, role: impl Into<Role>, content: impl Into<String>) -> Self {
        Self {
            timestamp,
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Messages recovered from one source, plus the records that were dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    pub messages: Vec<Message>,
    pub skipped: Vec<SkippedRecord>,
}

impl Transcript {
    pub(crate) fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub(crate) fn push_skipped(&mut self, index: usize, reason: SkipReason) {
        self.skipped.push(SkippedRecord { index, reason });
    }

    /// Stable sort, so messages sharing a timestamp keep their source order.
    pub fn sort_chronologically(&mut self) {
        self.messages.sort_by_key(|message| message.timestamp);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranscriptFormat {
    #[default]
    Auto,
    Json,
    Csv,
}

impl TranscriptFormat {
    /// Resolves `Auto` from the file extension; anything that is not `.csv` reads as JSON.
    pub fn resolve(self, path: &Path) -> TranscriptFormat {
        match self {
            TranscriptFormat::Auto => {
                let extension = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.to_ascii_lowercase());
                match extension.as_deref() {
                    Some("csv") => TranscriptFormat::Csv,
                    _ => TranscriptFormat::Json,
                }
            }
            explicit => explicit,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptFormat::Auto => "auto",
            TranscriptFormat::Json => "json",
            TranscriptFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
