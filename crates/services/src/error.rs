//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by completion providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompletionError {
    /// No provider credential is configured. Distinct from a failed call:
    /// callers short-circuit to fallback behavior without any network I/O.
    #[error("completion provider is not configured")]
    Unconfigured,
    #[error("completion provider returned an empty response")]
    EmptyResponse,
    #[error("completion request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors from a single question-generation attempt.
///
/// These never escape the generator: exhausted retries degrade to an empty
/// question list, which the session manager turns into a chat reply.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerateError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("response was not a JSON question array: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("response contained no well-formed questions")]
    NoValidQuestions,
}
