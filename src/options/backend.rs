use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Backend", inline)]
#[serde(default)]
/// Where the molecule/search backend lives.
pub struct BackendOptions {
    /// Base URL prepended to every endpoint path.
    #[schemars(title = "Base URL")]
    pub base_url: String,
    /// Overall per-request timeout in seconds. `None` waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(title = "Timeout (s)")]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_owned(),
            timeout_secs: None,
        }
    }
}

impl BackendOptions {
    /// Join an endpoint path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
