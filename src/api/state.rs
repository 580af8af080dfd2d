//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::config::ApiConfig;
use crate::session::Session;
use crate::signal::SignalVerifier;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Verification and trend client
    pub verifier: Arc<SignalVerifier>,
    /// The dashboard session; the only mutable state
    pub session: Arc<RwLock<Session>>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState around an existing session
    pub fn new(verifier: Arc<SignalVerifier>, session: Session, config: ApiConfig) -> Self {
        Self {
            verifier,
            session: Arc::new(RwLock::new(session)),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Fetch trending topics and cache them in the session
    ///
    /// The session lock is not held across the model call.
    pub async fn refresh_trends(&self) -> Vec<String> {
        let topics = self.verifier.list_trending().await;
        self.session.write().await.set_trends(topics.clone());
        topics
    }
}
