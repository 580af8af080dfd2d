//! Verification error types

use crate::gemini::GeminiError;
use thiserror::Error;

/// A verification whose network exchange failed
///
/// Carries no recovery: callers surface it and do not retry.
#[derive(Error, Debug)]
#[error("Verification of {query:?} failed: {source}")]
pub struct VerificationFailure {
    /// The query that was being verified
    pub query: String,
    #[source]
    pub source: GeminiError,
}

/// Why a trend listing fell back to the fixed topics
#[derive(Error, Debug)]
pub enum DegradedTrend {
    #[error("Trend request failed: {0}")]
    Transport(#[from] GeminiError),

    #[error("Trend response carried no text")]
    EmptyResponse,

    #[error("Trend response contained no usable topics")]
    NoTopics,
}
