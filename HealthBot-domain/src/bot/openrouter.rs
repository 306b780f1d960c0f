//! OpenRouter (OpenAI-compatible) chat-completions client.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::config::CompletionConfig;
use super::error::CompletionError;
use super::{CompletionClient, SYSTEM_PROMPT};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// HTTP client for the completion API
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    config: CompletionConfig,
    client: reqwest::Client,
}

impl OpenRouterClient {
    /// Create a client; fails only if the HTTP client cannot be built
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a client from `OPENROUTER_*` environment variables
    pub fn from_env() -> Result<Self, CompletionError> {
        Self::new(CompletionConfig::from_env())
    }
}

/// Pull the reply text out of a completion payload
pub fn extract_reply(data: &Value) -> Result<String, CompletionError> {
    let first_choice = data
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .ok_or_else(|| CompletionError::ApiError(data.to_string()))?;

    first_choice
        .pointer("/message/content")
        .and_then(Value::as_str)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| CompletionError::MalformedResponse("choice has no message content".to_string()))
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    #[instrument(skip(self, message), fields(model = %self.config.model))]
    async fn complete(&self, message: &str) -> Result<String, CompletionError> {
        let api_key = self.config.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;

        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: message },
            ],
            max_tokens: self.config.max_tokens,
        };

        debug!("Posting completion request to {}", self.config.url);

        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let data: Value = serde_json::from_str(&body)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        extract_reply(&data)
    }

    fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::get_bot_reply;
    use axum::{http::{HeaderMap, StatusCode}, routing::post, Json, Router};
    use serde_json::json;
    use std::time::Duration;

    /// Serve `router` on an ephemeral port and return the completion URL
    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api/v1/chat/completions", addr)
    }

    fn client_for(url: String) -> OpenRouterClient {
        let config = CompletionConfig::default()
            .with_api_key("test-key")
            .with_url(url)
            .with_timeout(Duration::from_millis(500));
        OpenRouterClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_sends_system_prompt_and_returns_trimmed_reply() {
        async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
            let auth = headers.get("authorization").and_then(|v| v.to_str().ok()).unwrap_or("");
            let summary = format!(
                "  {}|{}|{}|{}|{}|{}\n",
                auth,
                body["model"].as_str().unwrap_or(""),
                body["messages"][0]["role"].as_str().unwrap_or(""),
                body["messages"][0]["content"].as_str().unwrap_or(""),
                body["messages"][1]["content"].as_str().unwrap_or(""),
                body["max_tokens"],
            );
            Json(json!({ "choices": [{ "message": { "role": "assistant", "content": summary } }] }))
        }

        let url = spawn_server(Router::new().route("/api/v1/chat/completions", post(echo))).await;
        let reply = client_for(url).complete("I have a headache").await.unwrap();

        assert_eq!(
            reply,
            format!("Bearer test-key|openai/gpt-3.5-turbo|system|{}|I have a headache|200", SYSTEM_PROMPT)
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_short_circuits() {
        let client = OpenRouterClient::new(CompletionConfig::default().with_url("http://127.0.0.1:9")).unwrap();

        assert!(!client.is_configured());
        assert_eq!(client.complete("hello").await, Err(CompletionError::MissingApiKey));

        let reply = get_bot_reply(&client, "hello", 1).await;
        assert_eq!(
            reply,
            "⚠ No OpenRouter API key found. Please set OPENROUTER_API_KEY in .env or Render Environment Variables."
        );
    }

    #[tokio::test]
    async fn test_error_status_maps_to_request_failed() {
        let router = Router::new().route(
            "/api/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "bad key") }),
        );
        let url = spawn_server(router).await;

        let err = client_for(url).complete("hello").await.unwrap_err();
        assert!(matches!(err, CompletionError::RequestFailed(_)), "got {:?}", err);
        assert!(err.to_string().starts_with("⚠ API request failed:"));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_slow_api_times_out() {
        let router = Router::new().route(
            "/api/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json(json!({}))
            }),
        );
        let url = spawn_server(router).await;

        let err = client_for(url).complete("hello").await.unwrap_err();
        assert_eq!(err, CompletionError::Timeout);
        assert_eq!(err.to_string(), "⚠ API request timed out. Please try again.");
    }

    #[tokio::test]
    async fn test_payload_without_choices_is_api_error() {
        let router = Router::new().route(
            "/api/v1/chat/completions",
            post(|| async { Json(json!({ "error": { "message": "quota exceeded" } })) }),
        );
        let url = spawn_server(router).await;

        let err = client_for(url).complete("hello").await.unwrap_err();
        assert!(matches!(err, CompletionError::ApiError(_)));
        assert!(err.to_string().starts_with("⚠ API Error:"));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let router = Router::new().route("/api/v1/chat/completions", post(|| async { "not json" }));
        let url = spawn_server(router).await;

        let err = client_for(url).complete("hello").await.unwrap_err();
        assert!(matches!(err, CompletionError::MalformedResponse(_)));
        assert!(err.to_string().starts_with("⚠ Error while fetching reply:"));
    }

    #[test]
    fn test_extract_reply_edge_cases() {
        assert!(matches!(extract_reply(&json!({ "choices": [] })), Err(CompletionError::ApiError(_))));
        assert!(matches!(
            extract_reply(&json!({ "choices": [{ "message": {} }] })),
            Err(CompletionError::MalformedResponse(_))
        ));
        assert_eq!(
            extract_reply(&json!({ "choices": [{ "message": { "content": " Stay hydrated. " } }] })).unwrap(),
            "Stay hydrated."
        );
    }
}
