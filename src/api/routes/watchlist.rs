//! Watchlist Routes
//!
//! - GET /api/v1/watchlist - List watched topics
//! - POST /api/v1/watchlist - Add a topic
//! - DELETE /api/v1/watchlist/:id - Remove a topic (no-op if absent)
//! - POST /api/v1/watchlist/:id/verify - Re-verify a topic now

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use super::verify::verify_and_record;
use crate::api::dto::{AddTopicRequest, WatchlistResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::signal::{VerificationResult, WatchTopic};

/// GET /api/v1/watchlist
pub async fn list_topics(State(state): State<Arc<AppState>>) -> Json<WatchlistResponse> {
    Json(WatchlistResponse {
        topics: state.session.read().await.watchlist().topics().to_vec(),
    })
}

/// POST /api/v1/watchlist
pub async fn add_topic(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddTopicRequest>,
) -> ApiResult<(StatusCode, Json<WatchTopic>)> {
    let topic = state
        .session
        .write()
        .await
        .add_topic(&req.topic)
        .ok_or_else(|| ApiError::Validation("topic cannot be empty".to_string()))?;

    tracing::info!(id = %topic.id, topic = %topic.topic, "Topic added to watchlist");
    Ok((StatusCode::CREATED, Json(topic)))
}

/// DELETE /api/v1/watchlist/:id
pub async fn remove_topic(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if let Some(topic) = state.session.write().await.remove_topic(id) {
        tracing::info!(id = %id, topic = %topic.topic, "Topic removed from watchlist");
    }
    StatusCode::NO_CONTENT
}

/// POST /api/v1/watchlist/:id/verify
///
/// Submits the topic text as an ordinary verification. The result holds
/// no reference to the topic, and the topic itself is not modified.
pub async fn verify_topic(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<VerificationResult>)> {
    let topic = state
        .session
        .read()
        .await
        .topic(id)
        .map(|t| t.topic.clone())
        .ok_or_else(|| ApiError::NotFound(format!("watched topic {}", id)))?;

    let result = verify_and_record(&state, &topic, None).await?;
    Ok((StatusCode::CREATED, Json(result)))
}
