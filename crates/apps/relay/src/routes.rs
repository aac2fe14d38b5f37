use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use stats::StatsError;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::config::RelayConfig;
use crate::service::fetch_stats;
use crate::upstream::Upstream;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub upstream: Arc<dyn Upstream>,
}

impl AppState {
    pub fn new(config: RelayConfig, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            config: Arc::new(config),
            upstream,
        }
    }
}

/// First `timestamp` value in the query string, if any.
fn first_timestamp(pairs: Vec<(String, String)>) -> Option<String> {
    pairs
        .into_iter()
        .find(|(key, _)| key == "timestamp")
        .map(|(_, value)| value)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/README.txt", get(get_readme))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn get_readme(State(state): State<AppState>) -> Response {
    let path = &state.config.readme_path;
    match tokio::fs::read(path).await {
        Ok(data) => {
            let mut headers = HeaderMap::new();
            headers.insert(
                http::header::CONTENT_TYPE,
                HeaderValue::from_static("application/text"),
            );
            (StatusCode::OK, headers, Body::from(data)).into_response()
        }
        Err(err) => {
            error!("readme read failed: {path:?} -> {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn get_stats(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let now = chrono::Utc::now().timestamp();
    let timestamp = first_timestamp(pairs);
    let result = fetch_stats(
        state.upstream.as_ref(),
        &state.config,
        timestamp.as_deref(),
        now,
    )
    .await;

    let stats = match result {
        Ok(stats) => stats,
        Err(err) => return stats_error(&err),
    };

    let body = match serde_json::to_string(&stats) {
        Ok(v) => v,
        Err(err) => {
            error!("stats serialization failed: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    (StatusCode::OK, headers, Body::from(body)).into_response()
}

fn error_status(err: &StatsError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    }
}

fn stats_error(err: &StatsError) -> Response {
    let status = error_status(err);
    if err.is_client_error() {
        warn!("stats request rejected: {err}");
        (status, "invalid timestamp").into_response()
    } else {
        error!("stats request failed: {err}");
        (status, "upstream unavailable").into_response()
    }
}
