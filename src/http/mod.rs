use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::state::AppState;

mod extract;
mod faucet;

pub const LIVENESS_MESSAGE: &str = "Faucet directory API is running.";

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_live))
        .route("/health/ready", get(health_ready))
        .merge(faucet::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

async fn health_live(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "live",
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

async fn health_ready(State(state): State<AppState>) -> Result<Json<ReadyResponse>, HttpError> {
    state.store.ping().await.map_err(|err| {
        error!("Readiness check failed: {err}");
        HttpError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Database unavailable".to_string(),
        )
    })?;
    Ok(Json(ReadyResponse { status: "ready" }))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
struct ReadyResponse {
    status: &'static str,
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn new(status: StatusCode, message: String) -> Self {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Error status must be 4xx or 5xx"
        );
        assert!(!message.is_empty(), "Error message cannot be empty");
        Self { status, message }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        info!("HTTP error {}: {}", self.status, self.message);
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}
