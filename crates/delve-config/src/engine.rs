//! Research engine service configuration.

use serde::{Deserialize, Serialize};

fn default_user_agent() -> String {
    format!("delve/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Base URL of the research engine service (e.g., `http://127.0.0.1:8000`).
    /// Empty means no engine is available.
    #[serde(default)]
    pub url: String,

    /// User agent sent with every engine request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user_agent: default_user_agent(),
        }
    }
}

impl EngineConfig {
    /// Whether an engine endpoint has been configured.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Base URL without a trailing slash, so paths can be appended directly.
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }
}
