//! Trending Routes
//!
//! - GET /api/v1/trending - Cached trending topics
//! - POST /api/v1/trending/refresh - Fetch a fresh list

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::TrendingResponse;
use crate::api::state::AppState;

/// GET /api/v1/trending
pub async fn get_trending(State(state): State<Arc<AppState>>) -> Json<TrendingResponse> {
    Json(TrendingResponse {
        topics: state.session.read().await.trends().to_vec(),
    })
}

/// POST /api/v1/trending/refresh
///
/// Always succeeds; a failed listing yields the fallback topics.
pub async fn refresh_trending(State(state): State<Arc<AppState>>) -> Json<TrendingResponse> {
    Json(TrendingResponse {
        topics: state.refresh_trends().await,
    })
}
