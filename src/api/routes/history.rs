//! History Routes
//!
//! - GET /api/v1/history - All results, most recent first
//! - DELETE /api/v1/history - Clear the history

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{ClearHistoryResponse, HistoryResponse};
use crate::api::state::AppState;

/// GET /api/v1/history
pub async fn list_history(State(state): State<Arc<AppState>>) -> Json<HistoryResponse> {
    let session = state.session.read().await;
    let results = session.results().to_vec();

    Json(HistoryResponse {
        count: results.len(),
        results,
    })
}

/// DELETE /api/v1/history
pub async fn clear_history(State(state): State<Arc<AppState>>) -> Json<ClearHistoryResponse> {
    let cleared = state.session.write().await.clear_history();
    tracing::info!(cleared, "History cleared");
    Json(ClearHistoryResponse { cleared })
}
