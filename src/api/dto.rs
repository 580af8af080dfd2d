//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! Results and topics are serialized as their domain types.

use crate::signal::{VerificationResult, View, WatchTopic};
use serde::{Deserialize, Serialize};

// ============================================
// VERIFY DTOs
// ============================================

/// Verification request
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// Claim, headline or topic to verify
    pub query: String,
    /// Optional category label, defaults to "General"
    #[serde(default)]
    pub category: Option<String>,
}

// ============================================
// DASHBOARD DTOs
// ============================================

/// Dashboard summary
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Currently selected view
    pub view: View,
    /// Most recent results (feed)
    pub recent: Vec<VerificationResult>,
    /// Cached trending topics
    pub trends: Vec<String>,
    /// Total results in history
    pub total_results: usize,
    /// Topics on the watchlist
    pub watching: usize,
    /// Topics with the monitoring badge
    pub monitoring: usize,
}

/// Selected view
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewBody {
    pub view: View,
}

// ============================================
// TRENDING / HISTORY DTOs
// ============================================

/// Trending topics
#[derive(Debug, Serialize, Deserialize)]
pub struct TrendingResponse {
    pub topics: Vec<String>,
}

/// Verification history
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub results: Vec<VerificationResult>,
    pub count: usize,
}

/// Result of clearing the history
#[derive(Debug, Serialize, Deserialize)]
pub struct ClearHistoryResponse {
    pub cleared: usize,
}

// ============================================
// WATCHLIST DTOs
// ============================================

/// Add-topic request
#[derive(Debug, Deserialize)]
pub struct AddTopicRequest {
    pub topic: String,
}

/// Watchlist contents
#[derive(Debug, Serialize, Deserialize)]
pub struct WatchlistResponse {
    pub topics: Vec<WatchTopic>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub version: String,
    pub results: usize,
    pub watching: usize,
}
