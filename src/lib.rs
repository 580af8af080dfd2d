//! # LiveSignal
//!
//! Real-time claim verification backed by a search-grounded Gemini model.
//!
//! ## Features
//!
//! - **Verification**: Turn a claim into a verdict, a confidence score and
//!   the web sources the model grounded its answer on
//! - **Trending signals**: Short list of topics currently in the news, with
//!   a fixed fallback when the model is unavailable
//! - **Watchlist**: Topics the user wants to keep an eye on and re-verify
//! - **Dashboard API**: Local JSON API over the in-memory session
//!
//! ## Modules
//!
//! - [`gemini`]: REST client for grounded `generateContent` calls
//! - [`signal`]: Domain types, reply parsing and the verification client
//! - [`session`]: In-memory history, watchlist and view state
//! - [`api`]: Dashboard API server with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use livesignal::gemini::{GeminiClient, GeminiConfig};
//! use livesignal::signal::{SignalVerifier, VerifierConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = Arc::new(GeminiClient::new(GeminiConfig::default())?);
//!     let verifier = SignalVerifier::new(model, VerifierConfig::default());
//!
//!     let result = verifier.submit("The Eiffel Tower is in Berlin", None).await?;
//!     println!("{} ({})", result.verdict, result.confidence);
//!
//!     for topic in verifier.list_trending().await {
//!         println!("- {}", topic);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod gemini;
pub mod session;
pub mod signal;

// Re-export top-level types for convenience
pub use signal::{
    Confidence, GroundingSource, SignalVerifier, Verdict, VerificationFailure,
    VerificationResult, VerifierConfig, View, WatchStatus, WatchTopic, TRENDING_FALLBACK,
};

pub use session::{Session, Watchlist};

pub use gemini::{GeminiClient, GeminiError, GroundedModel};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{Config, ConfigError};
