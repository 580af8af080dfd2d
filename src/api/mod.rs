//! LiveSignal Dashboard API
//!
//! Local JSON API over the in-memory session, built with Axum.
//! State lives in process memory and resets on restart.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Feed of recent results, trends, watch counts
//! - `GET /api/v1/view` - Currently selected view
//! - `PUT /api/v1/view` - Select a view
//!
//! ## Verify
//! - `POST /api/v1/verify` - Verify a claim
//!
//! ## Trending
//! - `GET /api/v1/trending` - Cached trending topics
//! - `POST /api/v1/trending/refresh` - Fetch fresh topics
//!
//! ## History
//! - `GET /api/v1/history` - All results
//! - `DELETE /api/v1/history` - Clear results
//!
//! ## Watchlist
//! - `GET /api/v1/watchlist` - List topics
//! - `POST /api/v1/watchlist` - Add a topic
//! - `DELETE /api/v1/watchlist/:id` - Remove a topic
//! - `POST /api/v1/watchlist/:id/verify` - Re-verify a topic
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use livesignal::api::{serve, AppState};
//! use livesignal::config::Config;
//! use livesignal::gemini::GeminiClient;
//! use livesignal::session::Session;
//! use livesignal::signal::SignalVerifier;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let model = Arc::new(GeminiClient::new(config.gemini.client_config())?);
//!     let verifier = Arc::new(SignalVerifier::new(model, config.gemini.verifier_config()));
//!
//!     let state = AppState::new(verifier, Session::new(), config.api.clone());
//!     serve(state).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Dashboard routes
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route(
            "/view",
            get(routes::dashboard::get_view).put(routes::dashboard::select_view),
        )
        // Verify routes
        .route("/verify", post(routes::verify::verify_claim))
        // Trending routes
        .route("/trending", get(routes::trending::get_trending))
        .route("/trending/refresh", post(routes::trending::refresh_trending))
        // History routes
        .route(
            "/history",
            get(routes::history::list_history).delete(routes::history::clear_history),
        )
        // Watchlist routes
        .route(
            "/watchlist",
            get(routes::watchlist::list_topics).post(routes::watchlist::add_topic),
        )
        .route("/watchlist/:id", delete(routes::watchlist::remove_topic))
        .route("/watchlist/:id/verify", post(routes::watchlist::verify_topic));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Start the API server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("LiveSignal API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("LiveSignal API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{
        ClearHistoryResponse, DashboardResponse, HistoryResponse, TrendingResponse, ViewBody,
        WatchlistResponse,
    };
    use crate::config::ApiConfig;
    use crate::gemini::{Citation, GeminiError, GroundedModel, GroundedPrompt, GroundedReply};
    use crate::session::{Session, Watchlist};
    use crate::signal::{
        SignalVerifier, Verdict, VerificationResult, VerifierConfig, View, WatchStatus,
        WatchTopic, TRENDING_FALLBACK,
    };
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use serde::de::DeserializeOwned;
    use tower::util::ServiceExt;

    /// Answers verification prompts with `verify_text` and trend prompts
    /// with `trend_text`; fails everything when `fail` is set.
    struct CannedModel {
        verify_text: &'static str,
        trend_text: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl GroundedModel for CannedModel {
        async fn generate(&self, prompt: &GroundedPrompt) -> Result<GroundedReply, GeminiError> {
            if self.fail {
                return Err(GeminiError::Unavailable);
            }
            if prompt.system_instruction.is_some() {
                Ok(GroundedReply {
                    text: Some(self.verify_text.to_string()),
                    citations: vec![
                        Citation::web("https://news.example/a", "Example News"),
                        Citation::default(),
                    ],
                })
            } else {
                Ok(GroundedReply {
                    text: Some(self.trend_text.to_string()),
                    citations: Vec::new(),
                })
            }
        }
    }

    fn create_state(fail: bool, session: Session) -> AppState {
        let model = Arc::new(CannedModel {
            verify_text: "VERDICT: Misleading\nCONFIDENCE: 64\nSUMMARY: Partly true.",
            trend_text: "- Quantum chip announcement\n- Election results dispute\n",
            fail,
        });
        let verifier = Arc::new(SignalVerifier::new(model, VerifierConfig::default()));
        AppState::new(verifier, session, ApiConfig::default())
    }

    fn create_test_app() -> (Router, AppState) {
        let state = create_state(false, Session::new());
        (build_router(state.clone()), state)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        app.clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn json<T: DeserializeOwned>(response: Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _state) = create_test_app();
        let response = send(&app, "GET", "/health/live", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _state) = create_test_app();
        let response = send(&app, "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_verify_records_result() {
        let (app, state) = create_test_app();

        let response = send(
            &app,
            "POST",
            "/api/v1/verify",
            Some(r#"{"query": "Coffee cures colds", "category": "Health"}"#),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let result: VerificationResult = json(response).await;
        assert_eq!(result.verdict, Verdict::Misleading);
        assert_eq!(result.confidence.value(), 64);
        assert_eq!(result.category, "Health");
        assert_eq!(result.sources.len(), 1);

        let session = state.session.read().await;
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].id, result.id);
        assert_eq!(session.view(), View::Verify);
    }

    #[tokio::test]
    async fn test_verify_blank_query_rejected() {
        let (app, state) = create_test_app();
        let response = send(&app, "POST", "/api/v1/verify", Some(r#"{"query": "   "}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(state.session.read().await.results().is_empty());
    }

    #[tokio::test]
    async fn test_verify_invalid_json() {
        let (app, _state) = create_test_app();
        let response = send(&app, "POST", "/api/v1/verify", Some("not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_verify_failure_is_bad_gateway() {
        let state = create_state(true, Session::new());
        let app = build_router(state.clone());

        let response = send(&app, "POST", "/api/v1/verify", Some(r#"{"query": "claim"}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = json(response).await;
        assert_eq!(body["error"]["code"], "VERIFICATION_FAILED");
        assert!(state.session.read().await.results().is_empty());
    }

    #[tokio::test]
    async fn test_trending_refresh_and_fallback() {
        let (app, _state) = create_test_app();

        let cached: TrendingResponse = json(send(&app, "GET", "/api/v1/trending", None).await).await;
        assert!(cached.topics.is_empty());

        let fresh: TrendingResponse =
            json(send(&app, "POST", "/api/v1/trending/refresh", None).await).await;
        assert_eq!(
            fresh.topics,
            vec!["Quantum chip announcement", "Election results dispute"]
        );

        let failing = build_router(create_state(true, Session::new()));
        let response = send(&failing, "POST", "/api/v1/trending/refresh", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let fallback: TrendingResponse = json(response).await;
        assert_eq!(fallback.topics, TRENDING_FALLBACK);
    }

    #[tokio::test]
    async fn test_history_list_and_clear() {
        let (app, _state) = create_test_app();
        for query in ["first claim", "second claim"] {
            let body = format!(r#"{{"query": "{}"}}"#, query);
            send(&app, "POST", "/api/v1/verify", Some(&body)).await;
        }

        let history: HistoryResponse = json(send(&app, "GET", "/api/v1/history", None).await).await;
        assert_eq!(history.count, 2);
        assert_eq!(history.results[0].query, "second claim");

        let cleared: ClearHistoryResponse =
            json(send(&app, "DELETE", "/api/v1/history", None).await).await;
        assert_eq!(cleared.cleared, 2);

        let history: HistoryResponse = json(send(&app, "GET", "/api/v1/history", None).await).await;
        assert_eq!(history.count, 0);
    }

    #[tokio::test]
    async fn test_watchlist_add_remove() {
        let (app, state) = create_test_app();

        let response = send(&app, "POST", "/api/v1/watchlist", Some(r#"{"topic": ""}"#)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(&app, "POST", "/api/v1/watchlist", Some(r#"{"topic": "Foo"}"#)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let topic: WatchTopic = json(response).await;
        assert_eq!(topic.status, WatchStatus::Monitoring);

        let unknown = format!("/api/v1/watchlist/{}", uuid::Uuid::new_v4());
        let response = send(&app, "DELETE", &unknown, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.session.read().await.watchlist().len(), 1);

        let known = format!("/api/v1/watchlist/{}", topic.id);
        let response = send(&app, "DELETE", &known, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let list: WatchlistResponse = json(send(&app, "GET", "/api/v1/watchlist", None).await).await;
        assert!(list.topics.is_empty());
    }

    #[tokio::test]
    async fn test_watchlist_manual_refresh() {
        let seeded = WatchTopic::new("Sustainable Aviation Fuel breakthroughs", WatchStatus::Idle);
        let session = Session::with_watchlist(Watchlist::seeded(vec![seeded.clone()]));
        let state = create_state(false, session);
        let app = build_router(state.clone());

        let uri = format!("/api/v1/watchlist/{}/verify", seeded.id);
        let response = send(&app, "POST", &uri, None).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let result: VerificationResult = json(response).await;
        assert_eq!(result.query, seeded.topic);
        assert_eq!(result.category, "General");

        let session = state.session.read().await;
        assert_eq!(session.topic(seeded.id), Some(&seeded));
        assert_eq!(session.results().len(), 1);
        drop(session);

        let missing = format!("/api/v1/watchlist/{}/verify", uuid::Uuid::new_v4());
        let response = send(&app, "POST", &missing, None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_and_view() {
        let (app, _state) = create_test_app();
        for i in 0..4 {
            let body = format!(r#"{{"query": "claim number {}"}}"#, i);
            send(&app, "POST", "/api/v1/verify", Some(&body)).await;
        }
        send(&app, "POST", "/api/v1/watchlist", Some(r#"{"topic": "Foo"}"#)).await;

        let dashboard: DashboardResponse =
            json(send(&app, "GET", "/api/v1/dashboard", None).await).await;
        assert_eq!(dashboard.view, View::Verify);
        assert_eq!(dashboard.recent.len(), 3);
        assert_eq!(dashboard.recent[0].query, "claim number 3");
        assert_eq!(dashboard.total_results, 4);
        assert_eq!(dashboard.watching, 1);
        assert_eq!(dashboard.monitoring, 1);

        let response = send(&app, "PUT", "/api/v1/view", Some(r#"{"view": "watchlist"}"#)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let view: ViewBody = json(send(&app, "GET", "/api/v1/view", None).await).await;
        assert_eq!(view.view, View::Watchlist);
    }
}
