use std::env;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_EXAMPLES_BASE_URL: &str = "http://localhost:5173/";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Base that relative URLs and built-in example paths resolve against.
    pub examples_base_url: String,
    pub user_agent: String,
    /// Per-request timeout. `None` waits for as long as the transport allows.
    pub request_timeout_ms: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            examples_base_url: DEFAULT_EXAMPLES_BASE_URL.to_string(),
            user_agent: format!("czml-loader/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_ms: None,
        }
    }
}

impl LoaderConfig {
    /// Defaults overridden by `CZML_EXAMPLES_BASE_URL`, `CZML_USER_AGENT` and
    /// `CZML_REQUEST_TIMEOUT_MS`. Unparseable timeouts are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = env::var("CZML_EXAMPLES_BASE_URL") {
            if !base.trim().is_empty() {
                config.examples_base_url = base;
            }
        }
        if let Ok(agent) = env::var("CZML_USER_AGENT") {
            if !agent.trim().is_empty() {
                config.user_agent = agent;
            }
        }
        config.request_timeout_ms = env::var("CZML_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0);
        config
    }

    #[must_use]
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.examples_base_url = base.into();
        self
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}
