use std::env;
use std::time::Duration;
use tracing::{info, warn};

/// Default completion endpoint
pub const DEFAULT_COMPLETION_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";

/// Default cap on generated tokens
pub const DEFAULT_MAX_TOKENS: u32 = 200;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Completion API configuration
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Bearer token; requests fail fast without it
    pub api_key: Option<String>,
    /// Model identifier sent with each request
    pub model: String,
    /// Full URL of the chat-completions endpoint
    pub url: String,
    /// Maximum tokens the model may generate
    pub max_tokens: u32,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            url: DEFAULT_COMPLETION_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CompletionConfig {
    /// Read the configuration from `OPENROUTER_*` environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_key = env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            warn!("OPENROUTER_API_KEY is not set; chat replies will report the missing key");
        }

        let model = env::var("OPENROUTER_MODEL").unwrap_or(defaults.model);
        let url = env::var("OPENROUTER_URL").unwrap_or(defaults.url);

        let max_tokens = env::var("OPENROUTER_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.max_tokens);

        let timeout = env::var("OPENROUTER_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        info!("Completion configuration: model={}, max_tokens={}, timeout={:?}", model, max_tokens, timeout);

        Self {
            api_key,
            model,
            url,
            max_tokens,
            timeout,
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the endpoint URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether an API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}
