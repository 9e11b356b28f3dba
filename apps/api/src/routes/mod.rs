pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::activity;
use crate::credentials;
use crate::errors::AppError;
use crate::inbox;
use crate::respond;
use crate::rules;
use crate::state::AppState;

async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Respond relay
        .route("/api/respond", post(respond::handlers::handle_respond))
        // Triage inbox
        .route("/api/messages", get(inbox::handlers::handle_list_messages))
        .route(
            "/api/messages/:id/status",
            patch(inbox::handlers::handle_update_status),
        )
        // Automation rules (stored and listed only — never evaluated)
        .route(
            "/api/rules",
            get(rules::handlers::handle_list_rules).post(rules::handlers::handle_create_rule),
        )
        .route(
            "/api/rules/:id/status",
            patch(rules::handlers::handle_toggle_rule),
        )
        .route("/api/rules/:id", delete(rules::handlers::handle_delete_rule))
        // Activity log
        .route(
            "/api/activity",
            get(activity::handlers::handle_list_activity),
        )
        // Connected-account credentials
        .route(
            "/api/credentials",
            get(credentials::handle_get_credentials).put(credentials::handle_put_credentials),
        )
        // Webhook ingestion (future)
        .route("/api/webhooks/meta", post(not_implemented))
        .with_state(state)
}
