use serde::{Deserialize, Serialize};

/// `[llm]` section: the generation API and its candidate models.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL of the generation API (default: Google's public endpoint)
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Candidate model ids, tried in order. Put the most quota-generous first.
    #[serde(default = "default_models")]
    pub models: Vec<String>,
    /// Sampling temperature (0.0 to 2.0). Unset leaves the API default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Whole-request timeout for one model call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".into()
}

fn default_models() -> Vec<String> {
    [
        "gemini-2.0-flash-lite",
        "gemini-2.0-flash",
        "gemini-2.5-flash",
        "gemini-2.5-pro",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            models: default_models(),
            temperature: None,
            max_output_tokens: None,
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}
