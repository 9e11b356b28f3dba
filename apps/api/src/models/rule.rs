use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::message::Channel;

/// Platform scope of a rule. `All` applies the rule to both platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFilter {
    All,
    Facebook,
    Instagram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Active,
    Paused,
}

impl RuleStatus {
    pub fn toggled(self) -> Self {
        match self {
            RuleStatus::Active => RuleStatus::Paused,
            RuleStatus::Paused => RuleStatus::Active,
        }
    }
}

/// A stored keyword-trigger rule with a canned response template.
///
/// Rules are data entered by the user and persisted as a flat list. They are
/// never evaluated against inbox messages — there is no matching engine, and
/// `trigger` is free-form text that no code parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationRule {
    pub id: Uuid,
    pub name: String,
    pub platform: PlatformFilter,
    pub channel: Channel,
    pub trigger: String,
    pub response: String,
    pub status: RuleStatus,
    pub created_at: DateTime<Utc>,
}
