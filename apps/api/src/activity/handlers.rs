use axum::{extract::State, Json};

use crate::models::activity::ActivityEntry;
use crate::state::AppState;

/// GET /api/activity
/// Dispatch history, newest first.
pub async fn handle_list_activity(State(state): State<AppState>) -> Json<Vec<ActivityEntry>> {
    Json(state.activity.read().expect("state lock poisoned").clone())
}
