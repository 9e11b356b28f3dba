use serde::{Deserialize, Serialize};

/// Connected-account identifiers and token, held in memory and sent verbatim
/// in dispatch requests. No format or expiry validation is performed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountCredentials {
    pub facebook_page_id: Option<String>,
    pub instagram_business_account_id: Option<String>,
    pub access_token: Option<String>,
}
