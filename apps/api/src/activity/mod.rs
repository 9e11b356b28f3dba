pub mod handlers;

use serde_json::Value;
use uuid::Uuid;

use crate::models::activity::{ActivityEntry, ActivityOutcome};
use crate::state::AppState;

/// Records one dispatch attempt. Entries are prepended — newest first — and
/// the log is never trimmed.
pub fn record(
    state: &AppState,
    outcome: ActivityOutcome,
    summary: String,
    response: Option<Value>,
    message_id: Option<Uuid>,
) {
    let entry = ActivityEntry::new(outcome, summary, response, message_id);
    state
        .activity
        .write()
        .expect("state lock poisoned")
        .insert(0, entry);
}
