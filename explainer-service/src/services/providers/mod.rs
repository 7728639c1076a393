//! Explanation provider abstractions and implementations.
//!
//! A provider turns an error message into a human-readable explanation.
//! Two real strategies exist (remote Gemini inference and a local keyword
//! rule table) plus a mock for tests.

pub mod gemini;
pub mod mock;
pub mod rules;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("response contained no text content")]
    EmptyResponse,
}

/// Trait for explanation strategies.
///
/// Implementations must be cheap to share (`Arc`) and safe to call from
/// concurrent request handlers; the one slow implementation (Gemini) only
/// awaits network I/O and never blocks the runtime.
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    /// Produce an explanation for a non-empty error message: the root cause
    /// and a couple of remediation steps.
    async fn explain(&self, error_message: &str) -> Result<String, ProviderError>;
}
