use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the append-only assistant chat log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(id: u64, content: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            role: ChatRole::User,
            content: content.to_string(),
            timestamp,
        }
    }

    pub fn assistant(id: u64, content: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            role: ChatRole::Assistant,
            content: content.to_string(),
            timestamp,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ChatRole::User
    }
}
