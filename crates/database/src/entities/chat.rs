//! Chat entity definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub title: String,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChatInput {
    pub title: String,
    #[serde(rename = "type")]
    pub chat_type: ChatType,
}

/// Rename request. An absent `title` still touches `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateChatInput {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatType {
    SmartAnswer,
    GroupChat,
    Autopilot,
}

impl ChatType {
    pub const ALL: [ChatType; 3] = [ChatType::SmartAnswer, ChatType::GroupChat, ChatType::Autopilot];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatType::SmartAnswer => "smart_answer",
            ChatType::GroupChat => "group_chat",
            ChatType::Autopilot => "autopilot",
        }
    }
}

impl FromStr for ChatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smart_answer" => Ok(ChatType::SmartAnswer),
            "group_chat" => Ok(ChatType::GroupChat),
            "autopilot" => Ok(ChatType::Autopilot),
            other => Err(format!("unknown chat type '{other}'")),
        }
    }
}

impl fmt::Display for ChatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
