use std::sync::{Arc, RwLock};

use crate::config::Config;
use crate::graph::GraphClient;
use crate::inbox::seed;
use crate::models::activity::ActivityEntry;
use crate::models::credentials::AccountCredentials;
use crate::models::message::SocialMessage;
use crate::models::rule::AutomationRule;
use crate::rules::store::RuleStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything is scoped to one process: the inbox is seeded at startup, the
/// activity log starts empty, and only the rule list survives a restart
/// (via the rule store).
#[derive(Clone)]
pub struct AppState {
    pub graph: GraphClient,
    pub config: Config,
    /// Pluggable rule persistence. Default: `JsonFileStore` at RULES_STORE_PATH.
    pub rule_store: Arc<dyn RuleStore>,
    pub rules: Arc<RwLock<Vec<AutomationRule>>>,
    pub inbox: Arc<RwLock<Vec<SocialMessage>>>,
    pub activity: Arc<RwLock<Vec<ActivityEntry>>>,
    pub credentials: Arc<RwLock<AccountCredentials>>,
}

impl AppState {
    pub fn new(config: Config, rule_store: Arc<dyn RuleStore>) -> Self {
        let graph = GraphClient::new(config.graph_api_base.clone());
        let rules = rule_store.load();

        Self {
            graph,
            config,
            rule_store,
            rules: Arc::new(RwLock::new(rules)),
            inbox: Arc::new(RwLock::new(seed::sample_messages())),
            activity: Arc::new(RwLock::new(Vec::new())),
            credentials: Arc::new(RwLock::new(AccountCredentials::default())),
        }
    }
}
