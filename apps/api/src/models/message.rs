use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
        }
    }

    /// Parses the wire value. Exact match only — "Facebook" is not "facebook".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "facebook" => Some(Platform::Facebook),
            "instagram" => Some(Platform::Instagram),
            _ => None,
        }
    }
}

/// The conversation surface: a public comment thread or a direct message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Comment,
    Message,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Comment => "comment",
            Channel::Message => "message",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "comment" => Some(Channel::Comment),
            "message" => Some(Channel::Message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Unread,
    Responded,
    Snoozed,
}

impl MessageStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unread" => Some(MessageStatus::Unread),
            "responded" => Some(MessageStatus::Responded),
            "snoozed" => Some(MessageStatus::Snoozed),
            _ => None,
        }
    }
}

/// One inbound comment or DM in the triage inbox. Seeded from sample data at
/// startup; status is mutated in place, rows are never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMessage {
    pub id: Uuid,
    pub platform: Platform,
    pub channel: Channel,
    pub author: String,
    pub snippet: String,
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
}
