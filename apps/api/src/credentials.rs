use axum::{extract::State, Json};

use crate::models::credentials::AccountCredentials;
use crate::state::AppState;

/// GET /api/credentials
pub async fn handle_get_credentials(State(state): State<AppState>) -> Json<AccountCredentials> {
    Json(state.credentials.read().expect("state lock poisoned").clone())
}

/// PUT /api/credentials
/// Replaces the stored identifiers and token wholesale, verbatim.
pub async fn handle_put_credentials(
    State(state): State<AppState>,
    Json(credentials): Json<AccountCredentials>,
) -> Json<AccountCredentials> {
    *state.credentials.write().expect("state lock poisoned") = credentials.clone();
    Json(credentials)
}
