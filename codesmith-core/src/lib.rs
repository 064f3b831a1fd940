//! # codesmith-core
//!
//! Building blocks for iterative code generation:
//!
//! - **Provider**: trait-based LLM communication (OpenAI-compatible, Anthropic)
//! - **Prompt**: renders reasoning, generation, and evaluation prompts from a task
//! - **Executor**: runs candidate code under an interpreter and captures the result
//! - **Evaluation**: the model's verdict on a candidate and its output

pub mod error;
pub mod evaluation;
pub mod executor;
pub mod extract;
pub mod prompt;
pub mod provider;

pub use error::{Error, ErrorKind, ErrorStatus, Result};
pub use evaluation::{Evaluation, Feedback};
pub use executor::{ExecutionOutcome, Executor, ExecutorConfig};
pub use extract::{extract_code, extract_json};
pub use prompt::PromptBuilder;
pub use provider::{
    AnthropicProvider, ChatMessage, CompletionRequest, CompletionResponse, FinishReason,
    LlmProvider, OpenAIProvider, ProviderConfig, ProviderError, ProviderType, Role, StreamChunk,
    StreamReceiver, Usage, UsageTracker,
};
