//! Signal Verification
//!
//! Turns a claim into a structured verdict using a grounded model, and
//! lists trending topics worth checking.
//!
//! - [`SignalVerifier::submit`]: one grounded request, parsed into a
//!   [`VerificationResult`]
//! - [`SignalVerifier::list_trending`]: five short topics, or a fixed
//!   fallback list when anything goes wrong

mod error;
pub mod parser;
mod types;
mod verifier;

pub use error::{DegradedTrend, VerificationFailure};
pub use types::{
    Confidence, GroundingSource, Verdict, VerificationResult, View, WatchStatus, WatchTopic,
    DEFAULT_CATEGORY, DEFAULT_SOURCE_TITLE,
};
pub use verifier::{SignalVerifier, VerifierConfig, TRENDING_FALLBACK};
