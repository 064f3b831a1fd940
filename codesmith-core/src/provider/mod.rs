//! # LLM Provider Interface
//!
//! A trait-based abstraction for communicating with LLM backends.
//! Supports streaming and multiple providers.
//!
//! ## Design
//! - `LlmProvider` trait defines the core interface
//! - Implementations for OpenAI-compatible and Anthropic APIs
//! - Streaming via async iterators
//! - Usage tracking

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAIProvider;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::pin::Pin;

// ============================================================================
// Core Types
// ============================================================================

/// A chat message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Request parameters for a completion
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<usize>,
    pub stream: bool,
    pub stop: Option<Vec<String>>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_max_tokens(mut self, max: usize) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub id: String,
    pub model: String,
    pub content: Option<String>,
    pub finish_reason: FinishReason,
    pub usage: Usage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Unknown,
}

/// Token usage information
#[derive(Debug, Clone, Default)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
    pub total_tokens: usize,
}

/// A streaming chunk from the model
#[derive(Debug, Clone)]
pub enum StreamChunk {
    /// Text content delta
    Text(String),
    /// Stream finished
    Done {
        finish_reason: FinishReason,
        usage: Option<Usage>,
    },
    /// Error occurred
    Error(String),
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Error type for provider operations
#[derive(Debug)]
pub enum ProviderError {
    /// Network/connection error
    Network(String),
    /// API returned an error
    Api { status: u16, message: String },
    /// Failed to parse response
    Parse(String),
    /// Rate limited
    RateLimited { retry_after: Option<u64> },
    /// Invalid request
    InvalidRequest(String),
    /// Authentication failed
    AuthenticationFailed,
    /// Other error
    Other(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(e) => write!(f, "Network error: {}", e),
            Self::Api { status, message } => write!(f, "API error ({}): {}", status, message),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::RateLimited { retry_after } => {
                write!(f, "Rate limited")?;
                if let Some(secs) = retry_after {
                    write!(f, " (retry after {}s)", secs)?;
                }
                Ok(())
            }
            Self::InvalidRequest(e) => write!(f, "Invalid request: {}", e),
            Self::AuthenticationFailed => write!(f, "Authentication failed"),
            Self::Other(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<ProviderError> for codesmith_error::Error {
    fn from(err: ProviderError) -> Self {
        use codesmith_error::{Error, ErrorKind};
        match err {
            ProviderError::Network(e) => {
                Error::new(ErrorKind::NetworkFailed, e).with_operation("provider")
            }
            ProviderError::Api { status, message } => {
                Error::new(ErrorKind::CompletionFailed, message)
                    .with_operation("provider")
                    .with_context("status", status.to_string())
            }
            ProviderError::Parse(e) => {
                Error::new(ErrorKind::ParseFailed, e).with_operation("provider")
            }
            ProviderError::RateLimited { retry_after } => {
                let err = Error::new(ErrorKind::RateLimited, "rate limit exceeded")
                    .with_operation("provider");
                match retry_after {
                    Some(secs) => err.with_context("retry_after_secs", secs.to_string()),
                    None => err,
                }
            }
            ProviderError::InvalidRequest(e) => {
                Error::new(ErrorKind::InvalidArgument, e).with_operation("provider")
            }
            ProviderError::AuthenticationFailed => {
                Error::new(ErrorKind::AuthenticationFailed, "authentication failed")
                    .with_operation("provider")
            }
            ProviderError::Other(e) => {
                Error::new(ErrorKind::CompletionFailed, e).with_operation("provider")
            }
        }
    }
}

/// The main LLM provider trait
#[allow(async_fn_in_trait)]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn name(&self) -> &str;

    /// Get available models
    fn models(&self) -> Vec<String>;

    /// Get the default model
    fn default_model(&self) -> &str;

    /// Send a completion request and get a full response
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError>;

    /// Send a completion request and stream the response
    async fn stream(&self, request: CompletionRequest) -> Result<StreamReceiver, ProviderError>;

    /// Simple prompt -> response helper
    async fn prompt(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = CompletionRequest::new(vec![ChatMessage::user(prompt)]);
        let response = self.complete(request).await?;
        response.content.ok_or_else(|| ProviderError::Other("No content in response".into()))
    }

    /// Chat with message history
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String, ProviderError> {
        let request = CompletionRequest::new(messages);
        let response = self.complete(request).await?;
        response.content.ok_or_else(|| ProviderError::Other("No content in response".into()))
    }
}

/// Receiver for streaming responses
pub struct StreamReceiver {
    inner: Pin<Box<dyn futures_core::Stream<Item = StreamChunk> + Send>>,
}

impl StreamReceiver {
    pub fn new<S>(stream: S) -> Self
    where
        S: futures_core::Stream<Item = StreamChunk> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }

    /// Get the next chunk, or None when the stream is exhausted
    pub async fn next(&mut self) -> Option<StreamChunk> {
        use futures_util::StreamExt;
        self.inner.next().await
    }

    /// Collect all text chunks into a single string
    pub async fn collect_text(mut self) -> Result<String, ProviderError> {
        let mut text = String::new();
        while let Some(chunk) = self.next().await {
            match chunk {
                StreamChunk::Text(t) => text.push_str(&t),
                StreamChunk::Done { .. } => break,
                StreamChunk::Error(e) => return Err(ProviderError::Other(e)),
            }
        }
        Ok(text)
    }
}

// ============================================================================
// Provider Configuration
// ============================================================================

/// Configuration for creating providers
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider_type: ProviderType,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub default_model: Option<String>,
    pub headers: HashMap<String, String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    OpenAI,
    Anthropic,
    Local,
    Custom,
}

impl ProviderConfig {
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            provider_type: ProviderType::OpenAI,
            api_key: Some(api_key.into()),
            base_url: Some("https://api.openai.com/v1".into()),
            default_model: Some("gpt-4o-mini".into()),
            headers: HashMap::new(),
            timeout_secs: Some(120),
        }
    }

    pub fn anthropic(api_key: impl Into<String>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("anthropic-version".into(), "2023-06-01".into());

        Self {
            provider_type: ProviderType::Anthropic,
            api_key: Some(api_key.into()),
            base_url: Some("https://api.anthropic.com/v1".into()),
            default_model: Some("claude-sonnet-4-20250514".into()),
            headers,
            timeout_secs: Some(120),
        }
    }

    /// Connect to an OpenAI-compatible local endpoint (vLLM, Ollama, ...)
    pub fn local(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider_type: ProviderType::Local,
            api_key: None,
            base_url: Some(base_url.into()),
            default_model: Some(model.into()),
            headers: HashMap::new(),
            timeout_secs: Some(300),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

// ============================================================================
// Usage Tracking
// ============================================================================

/// Tracks token usage across multiple calls
#[derive(Debug, Clone, Default)]
pub struct UsageTracker {
    pub total_calls: usize,
    pub total_prompt_tokens: usize,
    pub total_completion_tokens: usize,
    pub by_model: HashMap<String, Usage>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, model: &str, usage: &Usage) {
        self.total_calls += 1;
        self.total_prompt_tokens += usage.prompt_tokens;
        self.total_completion_tokens += usage.completion_tokens;

        let entry = self.by_model.entry(model.to_string()).or_default();
        entry.prompt_tokens += usage.prompt_tokens;
        entry.completion_tokens += usage.completion_tokens;
        entry.total_tokens += usage.total_tokens;
    }

    pub fn total_tokens(&self) -> usize {
        self.total_prompt_tokens + self.total_completion_tokens
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_constructors() {
        let sys = ChatMessage::system("You are a Python programmer");
        assert_eq!(sys.role, Role::System);
        assert_eq!(sys.content, "You are a Python programmer");

        let user = ChatMessage::user("Reverse a string");
        assert_eq!(user.role, Role::User);

        let asst = ChatMessage::assistant("def reverse(s): return s[::-1]");
        assert_eq!(asst.role, Role::Assistant);
    }

    #[test]
    fn test_completion_request_builder() {
        let request = CompletionRequest::new(vec![ChatMessage::user("Hello")])
            .with_model("gpt-4o-mini")
            .with_temperature(0.7)
            .with_max_tokens(1000)
            .with_streaming(true);

        assert_eq!(request.model, Some("gpt-4o-mini".into()));
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(1000));
        assert!(request.stream);
    }

    #[test]
    fn test_provider_config() {
        let config = ProviderConfig::openai("sk-test");
        assert_eq!(config.provider_type, ProviderType::OpenAI);
        assert_eq!(config.default_model, Some("gpt-4o-mini".into()));

        let config = ProviderConfig::anthropic("sk-ant-test");
        assert_eq!(config.provider_type, ProviderType::Anthropic);
        assert!(config.headers.contains_key("anthropic-version"));

        let config = ProviderConfig::local("http://localhost:11434/v1", "llama3");
        assert_eq!(config.provider_type, ProviderType::Local);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_usage_tracker() {
        let mut tracker = UsageTracker::new();

        tracker.track("gpt-4o-mini", &Usage {
            prompt_tokens: 100,
            completion_tokens: 50,
            total_tokens: 150,
        });

        tracker.track("gpt-4o-mini", &Usage {
            prompt_tokens: 200,
            completion_tokens: 100,
            total_tokens: 300,
        });

        assert_eq!(tracker.total_calls, 2);
        assert_eq!(tracker.total_prompt_tokens, 300);
        assert_eq!(tracker.total_completion_tokens, 150);
        assert_eq!(tracker.total_tokens(), 450);
    }

    #[test]
    fn test_provider_error_conversion() {
        use codesmith_error::ErrorKind;

        let err: codesmith_error::Error = ProviderError::AuthenticationFailed.into();
        assert_eq!(err.kind(), ErrorKind::AuthenticationFailed);
        assert!(!err.is_retryable());

        let err: codesmith_error::Error =
            ProviderError::RateLimited { retry_after: Some(30) }.into();
        assert_eq!(err.kind(), ErrorKind::RateLimited);
        assert!(err.is_retryable());

        let err: codesmith_error::Error = ProviderError::Network("refused".into()).into();
        assert_eq!(err.kind(), ErrorKind::NetworkFailed);
    }

    #[tokio::test]
    async fn test_stream_receiver_collect_text() {
        let chunks = vec![
            StreamChunk::Text("def reverse".into()),
            StreamChunk::Text("(s): ...".into()),
            StreamChunk::Done {
                finish_reason: FinishReason::Stop,
                usage: None,
            },
        ];
        let receiver = StreamReceiver::new(futures_util::stream::iter(chunks));
        let text = receiver.collect_text().await.unwrap();
        assert_eq!(text, "def reverse(s): ...");
    }

    #[tokio::test]
    async fn test_stream_receiver_error() {
        let chunks = vec![
            StreamChunk::Text("partial".into()),
            StreamChunk::Error("connection reset".into()),
        ];
        let receiver = StreamReceiver::new(futures_util::stream::iter(chunks));
        assert!(receiver.collect_text().await.is_err());
    }
}
