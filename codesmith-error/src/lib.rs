//! # codesmith-error
//!
//! Unified error handling for codesmith - following OpenDAL's error handling practices.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., CompletionFailed, ExecutionTimeout)
//! - **ErrorStatus**: Decide how to handle it (Permanent, Temporary, Persistent)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use codesmith_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::CompletionFailed, "model returned no content")
//!         .with_operation("agent::generate")
//!         .with_context("model", "gpt-4o-mini")
//!         .with_context("attempt", "2"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All functions return `Result<T, codesmith_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - Don't abuse `From<OtherError>` to prevent raw error leakage

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using codesmith Error
pub type Result<T> = std::result::Result<T, Error>;
