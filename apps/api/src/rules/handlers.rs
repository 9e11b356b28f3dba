use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::message::Channel;
use crate::models::rule::{AutomationRule, PlatformFilter, RuleStatus};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateRuleRequest {
    pub name: Option<String>,
    pub platform: Option<PlatformFilter>,
    pub channel: Option<Channel>,
    pub trigger: Option<String>,
    pub response: Option<String>,
}

/// GET /api/rules
pub async fn handle_list_rules(State(state): State<AppState>) -> Json<Vec<AutomationRule>> {
    Json(state.rules.read().expect("state lock poisoned").clone())
}

/// POST /api/rules
/// New rules are prepended (newest first) and the whole list persisted.
pub async fn handle_create_rule(
    State(state): State<AppState>,
    Json(req): Json<CreateRuleRequest>,
) -> Result<Json<AutomationRule>, AppError> {
    let name = require_text(req.name, "name")?;
    let trigger = require_text(req.trigger, "trigger")?;
    let response = require_text(req.response, "response")?;

    let rule = AutomationRule {
        id: Uuid::new_v4(),
        name,
        platform: req.platform.unwrap_or(PlatformFilter::All),
        channel: req.channel.unwrap_or(Channel::Comment),
        trigger,
        response,
        status: RuleStatus::Active,
        created_at: Utc::now(),
    };

    let snapshot = {
        let mut rules = state.rules.write().expect("state lock poisoned");
        rules.insert(0, rule.clone());
        rules.clone()
    };
    persist(&state, &snapshot)?;

    Ok(Json(rule))
}

/// PATCH /api/rules/:id/status
/// Flips the two-valued status: active ↔ paused.
pub async fn handle_toggle_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AutomationRule>, AppError> {
    let (rule, snapshot) = {
        let mut rules = state.rules.write().expect("state lock poisoned");
        let rule = {
            let rule = rules
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| AppError::NotFound(format!("Rule {id} not found")))?;

            rule.status = rule.status.toggled();
            rule.clone()
        };
        (rule, rules.clone())
    };
    persist(&state, &snapshot)?;

    Ok(Json(rule))
}

/// DELETE /api/rules/:id
pub async fn handle_delete_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let snapshot = {
        let mut rules = state.rules.write().expect("state lock poisoned");
        let before = rules.len();
        rules.retain(|r| r.id != id);
        if rules.len() == before {
            return Err(AppError::NotFound(format!("Rule {id} not found")));
        }
        rules.clone()
    };
    persist(&state, &snapshot)?;

    Ok(StatusCode::NO_CONTENT)
}

fn persist(state: &AppState, rules: &[AutomationRule]) -> Result<(), AppError> {
    state
        .rule_store
        .persist(rules)
        .map_err(|e| AppError::Store(e.to_string()))
}

fn require_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} must not be empty"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text_rejects_missing_and_blank() {
        assert!(require_text(None, "name").is_err());
        assert!(require_text(Some("  ".to_string()), "name").is_err());
        assert_eq!(
            require_text(Some("Pricing".to_string()), "name").unwrap(),
            "Pricing"
        );
    }

    #[test]
    fn test_require_text_reports_the_field_name() {
        let err = require_text(None, "trigger").unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "trigger must not be empty"));
    }
}
