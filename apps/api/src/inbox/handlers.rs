use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::message::{Channel, MessageStatus, Platform, SocialMessage};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct InboxQuery {
    pub platform: Option<String>,
    pub channel: Option<String>,
    pub status: Option<String>,
    /// Free-text search over author, snippet, and intent tag.
    pub q: Option<String>,
}

/// GET /api/messages
pub async fn handle_list_messages(
    State(state): State<AppState>,
    Query(query): Query<InboxQuery>,
) -> Result<Json<Vec<SocialMessage>>, AppError> {
    let platform = parse_filter(query.platform.as_deref(), Platform::parse, "platform")?;
    let channel = parse_filter(query.channel.as_deref(), Channel::parse, "channel")?;
    let status = parse_filter(query.status.as_deref(), MessageStatus::parse, "status")?;
    let needle = query
        .q
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let inbox = state.inbox.read().expect("state lock poisoned");
    let messages = inbox
        .iter()
        .filter(|m| {
            platform.map_or(true, |p| m.platform == p)
                && channel.map_or(true, |c| m.channel == c)
                && status.map_or(true, |s| m.status == s)
                && needle.as_deref().map_or(true, |n| matches_query(m, n))
        })
        .cloned()
        .collect();

    Ok(Json(messages))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// PATCH /api/messages/:id/status
/// Triage transitions: unread ↔ snoozed ↔ responded. Messages are never deleted.
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdate>,
) -> Result<Json<SocialMessage>, AppError> {
    let status = MessageStatus::parse(&req.status).ok_or_else(|| {
        AppError::Validation(format!("unknown message status '{}'", req.status))
    })?;

    let mut inbox = state.inbox.write().expect("state lock poisoned");
    let message = inbox
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Message {id} not found")))?;

    message.status = status;
    Ok(Json(message.clone()))
}

fn matches_query(message: &SocialMessage, needle: &str) -> bool {
    message.author.to_lowercase().contains(needle)
        || message.snippet.to_lowercase().contains(needle)
        || message
            .intent
            .as_deref()
            .map_or(false, |intent| intent.to_lowercase().contains(needle))
}

/// An absent or empty query param means "no filter"; an unknown value is a
/// client-input error rather than an empty result set.
fn parse_filter<T>(
    value: Option<&str>,
    parse: impl Fn(&str) -> Option<T>,
    field: &str,
) -> Result<Option<T>, AppError> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => parse(raw)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("unknown {field} filter '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_message(author: &str, snippet: &str, intent: Option<&str>) -> SocialMessage {
        SocialMessage {
            id: Uuid::new_v4(),
            platform: Platform::Facebook,
            channel: Channel::Comment,
            author: author.to_string(),
            snippet: snippet.to_string(),
            timestamp: Utc::now(),
            status: MessageStatus::Unread,
            intent: intent.map(str::to_string),
        }
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        let message = make_message("Ria", "Do you ship to Canada?", None);
        assert!(matches_query(&message, "canada"));
        assert!(matches_query(&message, "ria"));
        assert!(!matches_query(&message, "refund"));
    }

    #[test]
    fn test_matches_query_searches_intent_tag() {
        let message = make_message("Tom", "Are you open?", Some("commission"));
        assert!(matches_query(&message, "commission"));
    }

    #[test]
    fn test_parse_filter_empty_means_no_filter() {
        let parsed = parse_filter(Some(""), Platform::parse, "platform").unwrap();
        assert!(parsed.is_none());
        let parsed = parse_filter(None, Platform::parse, "platform").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_parse_filter_rejects_unknown_value() {
        let err = parse_filter(Some("tiktok"), Platform::parse, "platform").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
