use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and state counts.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": "0.1.0",
        "service": "signalbox-api",
        "messages": state.inbox.read().expect("state lock poisoned").len(),
        "rules": state.rules.read().expect("state lock poisoned").len(),
    }))
}
