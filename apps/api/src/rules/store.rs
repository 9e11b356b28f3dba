//! Rule persistence — the whole list serialized as one flat JSON document,
//! rewritten on every mutation. Last writer wins; there is no conflict
//! detection, versioning, or migration. A missing or malformed payload is
//! discarded and the empty default kept, with no user-visible error.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

use crate::models::rule::AutomationRule;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write rule store: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to serialize rule store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persistence seam for the automation rule list. `AppState` carries an
/// `Arc<dyn RuleStore>`, so backends swap without touching handler code.
pub trait RuleStore: Send + Sync {
    /// Loads the persisted list. Corruption is never surfaced: a payload that
    /// does not parse yields the empty default.
    fn load(&self) -> Vec<AutomationRule>;

    fn persist(&self, rules: &[AutomationRule]) -> Result<(), StoreError>;
}

/// Flat-file JSON store, the default backend.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl RuleStore for JsonFileStore {
    fn load(&self) -> Vec<AutomationRule> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&raw) {
            Ok(rules) => rules,
            Err(e) => {
                warn!(
                    "Discarding malformed rule store {}: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    fn persist(&self, rules: &[AutomationRule]) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(rules)?;
        fs::write(&self.path, raw).map_err(StoreError::Write)
    }
}
