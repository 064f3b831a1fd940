//! Core error types
//!
//! Re-exports codesmith-error and provides core-specific conveniences.

// Re-export the core error types
pub use codesmith_error::{Error, ErrorKind, ErrorStatus, Result};

// =============================================================================
// Core-specific error constructors
// =============================================================================

/// Create a TaskEmpty error
pub fn task_empty() -> Error {
    Error::task_empty()
}

/// Create a CompletionFailed error for an empty model response
pub fn empty_completion() -> Error {
    Error::completion_failed("model returned no content")
}

/// Create a CompletionFailed error
pub fn completion_failed(reason: impl Into<String>) -> Error {
    Error::completion_failed(reason)
}

/// Create an ExecutionFailed error
pub fn execution_failed(reason: impl Into<String>) -> Error {
    Error::execution_failed(reason)
}

/// Create an ExecutionTimeout error
pub fn execution_timeout(secs: u64) -> Error {
    Error::execution_timeout(secs)
}

/// Create an InterpreterNotFound error
pub fn interpreter_not_found(interpreter: impl Into<String>) -> Error {
    Error::interpreter_not_found(interpreter)
}

/// Create a ParseFailed error
pub fn parse_error(message: impl Into<String>) -> Error {
    Error::parse_failed(message)
}

/// Create a ConfigInvalid error
pub fn config_invalid(message: impl Into<String>) -> Error {
    Error::config_invalid(message)
}

/// Create an InvalidArgument error
pub fn invalid_argument(message: impl Into<String>) -> Error {
    Error::invalid_argument(message)
}
