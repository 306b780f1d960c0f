use thiserror::Error;

/// Failures of a completion request.
///
/// The `Display` text of every variant is the message shown to the user in
/// place of a bot reply.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompletionError {
    /// No API key configured
    #[error("⚠ No OpenRouter API key found. Please set OPENROUTER_API_KEY in .env or Render Environment Variables.")]
    MissingApiKey,

    /// The request exceeded the configured timeout
    #[error("⚠ API request timed out. Please try again.")]
    Timeout,

    /// Transport failure or non-success HTTP status
    #[error("⚠ API request failed: {0}")]
    RequestFailed(String),

    /// The API answered with JSON that carries no choices; holds the payload
    #[error("⚠ API Error: {0}")]
    ApiError(String),

    /// The body could not be read as a completion
    #[error("⚠ Error while fetching reply: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            CompletionError::Timeout
        } else {
            CompletionError::RequestFailed(error.to_string())
        }
    }
}
