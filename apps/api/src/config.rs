use std::path::PathBuf;

use anyhow::{Context, Result};

/// Default Graph API base; override with GRAPH_API_BASE_URL for staging.
pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com/v19.0";

/// Application configuration loaded from environment variables.
/// Everything is optional — with no environment at all the service boots with
/// defaults and runs every dispatch as a dry run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fallback token used when a dispatch request carries no accessToken.
    pub meta_access_token: Option<String>,
    pub graph_api_base: String,
    pub rules_store_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            meta_access_token: optional_env("META_ACCESS_TOKEN"),
            graph_api_base: std::env::var("GRAPH_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GRAPH_API_BASE.to_string()),
            rules_store_path: std::env::var("RULES_STORE_PATH")
                .unwrap_or_else(|_| "automation_rules.json".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
