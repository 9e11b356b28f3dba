use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityOutcome {
    /// Live dispatch accepted by the remote API.
    Sent,
    /// Dry run — no outbound call was made.
    Simulated,
    Error,
}

/// One dispatch attempt. The log is append-only and unbounded; entries are
/// prepended so the newest attempt is always first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub outcome: ActivityOutcome,
    pub summary: String,
    /// Raw response payload: the remote JSON body or the dry-run receipt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    /// Inbox message this attempt replied to, when the caller told us.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(
        outcome: ActivityOutcome,
        summary: String,
        response: Option<Value>,
        message_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            outcome,
            summary,
            response,
            message_id,
            timestamp: Utc::now(),
        }
    }
}
