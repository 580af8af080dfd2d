//! Dashboard Routes
//!
//! - GET /api/v1/dashboard - Feed, trends and watchlist counts
//! - GET /api/v1/view - Currently selected view
//! - PUT /api/v1/view - Select a view

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{DashboardResponse, ViewBody};
use crate::api::state::AppState;
use crate::session::FEED_SIZE;
use crate::signal::WatchStatus;

/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let session = state.session.read().await;

    Json(DashboardResponse {
        view: session.view(),
        recent: session.recent(FEED_SIZE).to_vec(),
        trends: session.trends().to_vec(),
        total_results: session.results().len(),
        watching: session.watchlist().len(),
        monitoring: session
            .watchlist()
            .count_with_status(WatchStatus::Monitoring),
    })
}

/// GET /api/v1/view
pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<ViewBody> {
    Json(ViewBody {
        view: state.session.read().await.view(),
    })
}

/// PUT /api/v1/view
pub async fn select_view(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ViewBody>,
) -> Json<ViewBody> {
    state.session.write().await.select_view(req.view);
    Json(req)
}
