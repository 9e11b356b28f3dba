use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::activity;
use crate::errors::AppError;
use crate::graph::Dispatch;
use crate::models::activity::ActivityOutcome;
use crate::models::message::{Channel, MessageStatus, Platform};
use crate::state::AppState;

/// Wire-format body for `POST /api/respond`.
///
/// Every field is optional at the serde layer so a missing required field
/// reaches `validate` and produces the contract's 400 body instead of a
/// framework deserialization rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RespondRequest {
    pub platform: Option<String>,
    pub target_id: Option<String>,
    pub message: Option<String>,
    pub channel: Option<String>,
    pub dry_run: Option<bool>,
    pub access_token: Option<String>,
    pub instagram_business_account_id: Option<String>,
    pub reply_to_id: Option<String>,
    /// Inbox message this reply belongs to; marked responded on success.
    pub message_id: Option<Uuid>,
}

/// POST /api/respond
///
/// Validates, resolves the endpoint, then either returns a dry-run receipt or
/// performs the single outbound call and relays the remote JSON. Every
/// attempt past validation lands in the activity log exactly once.
pub async fn handle_respond(
    State(state): State<AppState>,
    Json(req): Json<RespondRequest>,
) -> Result<Json<Value>, AppError> {
    let dispatch = validate(&req)?;
    let label = dispatch_label(&dispatch);

    let plan = match state.graph.plan(&dispatch) {
        Ok(plan) => plan,
        Err(e) => {
            let message = e.to_string();
            activity::record(
                &state,
                ActivityOutcome::Error,
                format!("Failed {label}: {message}"),
                None,
                req.message_id,
            );
            return Err(AppError::Dispatch(message));
        }
    };

    // Token resolution: request token, else the META_ACCESS_TOKEN fallback.
    // No token at all forces a dry run.
    let token = req
        .access_token
        .clone()
        .filter(|t| !t.is_empty())
        .or_else(|| state.config.meta_access_token.clone());
    let token = if req.dry_run.unwrap_or(false) { None } else { token };

    let result = match token {
        None => {
            let receipt = serde_json::to_value(plan.into_receipt())
                .map_err(|e| AppError::Internal(e.into()))?;
            activity::record(
                &state,
                ActivityOutcome::Simulated,
                format!("Simulated {label}"),
                Some(receipt.clone()),
                req.message_id,
            );
            receipt
        }
        Some(token) => match state.graph.send(&plan, &token).await {
            Ok(body) => {
                activity::record(
                    &state,
                    ActivityOutcome::Sent,
                    format!("Sent {label}"),
                    Some(body.clone()),
                    req.message_id,
                );
                body
            }
            Err(e) => {
                let message = e.to_string();
                activity::record(
                    &state,
                    ActivityOutcome::Error,
                    format!("Failed {label}: {message}"),
                    None,
                    req.message_id,
                );
                return Err(AppError::Dispatch(message));
            }
        },
    };

    mark_responded(&state, req.message_id);

    Ok(Json(json!({ "ok": true, "result": result })))
}

fn validate(req: &RespondRequest) -> Result<Dispatch, AppError> {
    let platform = required(req.platform.as_deref(), "platform")?;
    let target_id = required(req.target_id.as_deref(), "targetId")?;
    let message = required(req.message.as_deref(), "message")?;
    let channel = required(req.channel.as_deref(), "channel")?;

    let channel = Channel::parse(channel).ok_or_else(|| {
        AppError::Validation("channel must be \"comment\" or \"message\"".to_string())
    })?;
    let platform = Platform::parse(platform).ok_or_else(|| {
        AppError::Validation("platform must be \"facebook\" or \"instagram\"".to_string())
    })?;

    Ok(Dispatch {
        platform,
        channel,
        target_id: target_id.to_string(),
        message: message.to_string(),
        reply_to_id: req.reply_to_id.clone(),
        instagram_business_account_id: req.instagram_business_account_id.clone(),
    })
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

fn dispatch_label(dispatch: &Dispatch) -> String {
    format!(
        "{} {} reply to {}",
        dispatch.platform.as_str(),
        dispatch.channel.as_str(),
        dispatch.target_id
    )
}

fn mark_responded(state: &AppState, message_id: Option<Uuid>) {
    let Some(id) = message_id else { return };

    let mut inbox = state.inbox.write().expect("state lock poisoned");
    if let Some(message) = inbox.iter_mut().find(|m| m.id == id) {
        message.status = MessageStatus::Responded;
    }
}
