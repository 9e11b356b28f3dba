/// Graph client — the single point of entry for all Meta Graph API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Graph API directly.
/// All reply dispatches MUST go through this module.
///
/// A dispatch is resolved in two steps: `plan` maps (platform, channel) to a
/// concrete endpoint and payload, and `send` performs exactly one outbound
/// call — no retries, no timeout, pass-through failure.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::message::{Channel, Platform};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Graph API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Instagram dispatches require an instagramBusinessAccountId")]
    MissingBusinessAccount,
}

/// A validated reply dispatch, as handed over by the respond handler.
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub platform: Platform,
    pub channel: Channel,
    pub target_id: String,
    pub message: String,
    /// Parent comment to reply under, when replying inside a thread.
    /// Ignored for message dispatches.
    pub reply_to_id: Option<String>,
    pub instagram_business_account_id: Option<String>,
}

/// A fully-resolved outbound call: one endpoint, one JSON payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPlan {
    pub method: &'static str,
    pub endpoint: String,
    pub payload: Value,
    pub platform: Platform,
    pub channel: Channel,
}

/// What `POST /api/respond` returns for a dry run: a description of the call
/// that would have been made, with no network traffic.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRunReceipt {
    pub dry_run: bool,
    pub method: &'static str,
    pub endpoint: String,
    pub payload: Value,
    pub platform: Platform,
    pub channel: Channel,
}

impl DispatchPlan {
    pub fn into_receipt(self) -> DryRunReceipt {
        DryRunReceipt {
            dry_run: true,
            method: self.method,
            endpoint: self.endpoint,
            payload: self.payload,
            platform: self.platform,
            channel: self.channel,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphErrorEnvelope {
    error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    message: String,
}

/// The single Graph API client used by the respond relay.
#[derive(Clone)]
pub struct GraphClient {
    client: Client,
    base_url: String,
}

impl GraphClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Deterministic (platform, channel) → endpoint mapping.
    ///
    /// Facebook paths address the target object directly; Instagram paths go
    /// through the business account, so a missing business account id fails
    /// here — at dispatch time, not at request validation.
    pub fn plan(&self, dispatch: &Dispatch) -> Result<DispatchPlan, GraphError> {
        let (endpoint, payload) = match (dispatch.platform, dispatch.channel) {
            (Platform::Facebook, Channel::Comment) => {
                let object = dispatch
                    .reply_to_id
                    .as_deref()
                    .unwrap_or(&dispatch.target_id);
                (
                    format!("{}/{}/comments", self.base_url, object),
                    json!({ "message": dispatch.message }),
                )
            }
            (Platform::Facebook, Channel::Message) => (
                format!("{}/{}/messages", self.base_url, dispatch.target_id),
                send_api_payload(&dispatch.target_id, &dispatch.message),
            ),
            (Platform::Instagram, Channel::Comment) => {
                let account = self.business_account(dispatch)?;
                let comment = dispatch
                    .reply_to_id
                    .as_deref()
                    .unwrap_or(&dispatch.target_id);
                (
                    format!("{}/{}/replies", self.base_url, account),
                    json!({ "comment_id": comment, "message": dispatch.message }),
                )
            }
            (Platform::Instagram, Channel::Message) => {
                let account = self.business_account(dispatch)?;
                (
                    format!("{}/{}/messages", self.base_url, account),
                    send_api_payload(&dispatch.target_id, &dispatch.message),
                )
            }
        };

        Ok(DispatchPlan {
            method: "POST",
            endpoint,
            payload,
            platform: dispatch.platform,
            channel: dispatch.channel,
        })
    }

    /// Performs the one outbound call for a plan. A 2xx body is relayed
    /// verbatim; anything else becomes a `GraphError` with the remote message.
    pub async fn send(&self, plan: &DispatchPlan, access_token: &str) -> Result<Value, GraphError> {
        let response = self
            .client
            .post(&plan.endpoint)
            .query(&[("access_token", access_token)])
            .json(&plan.payload)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body: Value = response.json().await?;

        debug!(
            "Graph dispatch succeeded: {} {} ({})",
            plan.method,
            plan.endpoint,
            plan.platform.as_str()
        );

        Ok(body)
    }

    fn business_account<'a>(&self, dispatch: &'a Dispatch) -> Result<&'a str, GraphError> {
        dispatch
            .instagram_business_account_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(GraphError::MissingBusinessAccount)
    }
}

/// Messenger Send API payload, shared by both message channels.
fn send_api_payload(recipient_id: &str, text: &str) -> Value {
    json!({
        "recipient": { "id": recipient_id },
        "message": { "text": text }
    })
}

/// Extracts the Graph error envelope's message, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<GraphErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GraphClient {
        GraphClient::new("https://graph.test/v19.0".to_string())
    }

    fn dispatch(platform: Platform, channel: Channel) -> Dispatch {
        Dispatch {
            platform,
            channel,
            target_id: "123".to_string(),
            message: "hi".to_string(),
            reply_to_id: None,
            instagram_business_account_id: Some("17890".to_string()),
        }
    }

    #[test]
    fn test_facebook_comment_targets_object_directly() {
        let plan = client()
            .plan(&dispatch(Platform::Facebook, Channel::Comment))
            .unwrap();
        assert_eq!(plan.endpoint, "https://graph.test/v19.0/123/comments");
        assert_eq!(plan.payload, json!({ "message": "hi" }));
    }

    #[test]
    fn test_facebook_message_uses_send_api_payload() {
        let plan = client()
            .plan(&dispatch(Platform::Facebook, Channel::Message))
            .unwrap();
        assert_eq!(plan.endpoint, "https://graph.test/v19.0/123/messages");
        assert_eq!(
            plan.payload,
            json!({ "recipient": { "id": "123" }, "message": { "text": "hi" } })
        );
    }

    #[test]
    fn test_instagram_paths_go_through_business_account() {
        let comment = client()
            .plan(&dispatch(Platform::Instagram, Channel::Comment))
            .unwrap();
        assert_eq!(comment.endpoint, "https://graph.test/v19.0/17890/replies");
        assert_eq!(
            comment.payload,
            json!({ "comment_id": "123", "message": "hi" })
        );

        let message = client()
            .plan(&dispatch(Platform::Instagram, Channel::Message))
            .unwrap();
        assert_eq!(message.endpoint, "https://graph.test/v19.0/17890/messages");
    }

    #[test]
    fn test_instagram_without_business_account_fails() {
        let mut d = dispatch(Platform::Instagram, Channel::Comment);
        d.instagram_business_account_id = None;
        let err = client().plan(&d).unwrap_err();
        assert!(matches!(err, GraphError::MissingBusinessAccount));

        d.instagram_business_account_id = Some(String::new());
        assert!(client().plan(&d).is_err());
    }

    #[test]
    fn test_reply_to_id_overrides_comment_parent() {
        let mut d = dispatch(Platform::Facebook, Channel::Comment);
        d.reply_to_id = Some("456_789".to_string());
        let plan = client().plan(&d).unwrap();
        assert_eq!(plan.endpoint, "https://graph.test/v19.0/456_789/comments");
    }

    #[test]
    fn test_reply_to_id_ignored_for_messages() {
        let mut d = dispatch(Platform::Facebook, Channel::Message);
        d.reply_to_id = Some("456".to_string());
        let plan = client().plan(&d).unwrap();
        assert_eq!(plan.endpoint, "https://graph.test/v19.0/123/messages");
    }

    #[test]
    fn test_receipt_marks_dry_run() {
        let plan = client()
            .plan(&dispatch(Platform::Facebook, Channel::Comment))
            .unwrap();
        let receipt = plan.into_receipt();
        assert!(receipt.dry_run);
        assert_eq!(receipt.method, "POST");

        let raw = serde_json::to_value(&receipt).unwrap();
        assert_eq!(raw["dryRun"], json!(true));
        assert_eq!(raw["platform"], json!("facebook"));
    }

    #[test]
    fn test_error_message_extracts_envelope() {
        let body = r#"{"error":{"message":"Invalid OAuth access token.","type":"OAuthException","code":190}}"#;
        assert_eq!(error_message(body), "Invalid OAuth access token.");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("<html>Bad Gateway</html>"), "<html>Bad Gateway</html>");
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = GraphClient::new("https://graph.test/v19.0/".to_string());
        let plan = client
            .plan(&dispatch(Platform::Facebook, Channel::Comment))
            .unwrap();
        assert_eq!(plan.endpoint, "https://graph.test/v19.0/123/comments");
    }
}
