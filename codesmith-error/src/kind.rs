//! Error kinds for codesmith operations

use std::fmt;

/// The kind of error that occurred.
///
/// This enum categorizes errors to help users write clear error handling logic.
/// Users can match on ErrorKind to decide how to handle specific error cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// The requested feature or operation is not supported
    Unsupported,

    /// Invalid configuration or parameters
    ConfigInvalid,

    /// Invalid argument passed to function
    InvalidArgument,

    // =========================================================================
    // Task errors
    // =========================================================================
    /// The task description was empty or whitespace-only
    TaskEmpty,

    // =========================================================================
    // Provider/completion errors
    // =========================================================================
    /// The model call failed or returned no usable content
    CompletionFailed,

    /// Provider not available
    ProviderUnavailable,

    /// Rate limit exceeded
    RateLimited,

    /// Authentication with the provider failed
    AuthenticationFailed,

    /// Network error
    NetworkFailed,

    // =========================================================================
    // Execution errors
    // =========================================================================
    /// The candidate process could not be launched
    ExecutionFailed,

    /// The candidate process exceeded its wall-clock timeout
    ExecutionTimeout,

    /// The configured interpreter binary was not found
    InterpreterNotFound,

    // =========================================================================
    // Parse errors
    // =========================================================================
    /// Failed to parse model output
    ParseFailed,

    /// Serialization/deserialization failed
    SerializationFailed,

    // =========================================================================
    // IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            // General
            ErrorKind::Unexpected => "Unexpected",
            ErrorKind::Unsupported => "Unsupported",
            ErrorKind::ConfigInvalid => "ConfigInvalid",
            ErrorKind::InvalidArgument => "InvalidArgument",

            // Task
            ErrorKind::TaskEmpty => "TaskEmpty",

            // Provider
            ErrorKind::CompletionFailed => "CompletionFailed",
            ErrorKind::ProviderUnavailable => "ProviderUnavailable",
            ErrorKind::RateLimited => "RateLimited",
            ErrorKind::AuthenticationFailed => "AuthenticationFailed",
            ErrorKind::NetworkFailed => "NetworkFailed",

            // Execution
            ErrorKind::ExecutionFailed => "ExecutionFailed",
            ErrorKind::ExecutionTimeout => "ExecutionTimeout",
            ErrorKind::InterpreterNotFound => "InterpreterNotFound",

            // Parse
            ErrorKind::ParseFailed => "ParseFailed",
            ErrorKind::SerializationFailed => "SerializationFailed",

            // IO
            ErrorKind::FileNotFound => "FileNotFound",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::IoFailed => "IoFailed",
        }
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::CompletionFailed
                | ErrorKind::NetworkFailed
                | ErrorKind::RateLimited
                | ErrorKind::ExecutionTimeout
                | ErrorKind::ProviderUnavailable
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
