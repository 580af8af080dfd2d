//! Verify Routes
//!
//! - POST /api/v1/verify - Verify a claim against live search

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::VerifyRequest;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::signal::VerificationResult;

/// POST /api/v1/verify
///
/// Blank queries are rejected before any upstream call. A failed exchange
/// is reported as 502 and leaves the history untouched.
pub async fn verify_claim(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> ApiResult<(StatusCode, Json<VerificationResult>)> {
    if req.query.trim().is_empty() {
        return Err(ApiError::Validation("query cannot be empty".to_string()));
    }

    let category = req
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let result = verify_and_record(&state, &req.query, category).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Run one verification and prepend it to the history
///
/// The session lock is taken only after the exchange completes, so
/// concurrent verifications land in completion order.
pub(crate) async fn verify_and_record(
    state: &AppState,
    query: &str,
    category: Option<&str>,
) -> ApiResult<VerificationResult> {
    let result = state.verifier.submit(query, category).await?;
    state.session.write().await.record_result(result.clone());
    Ok(result)
}
