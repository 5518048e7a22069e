use axum::{extract::State, http::StatusCode, response::{IntoResponse, Response}, routing::{get, post}, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use summary_core::{Ratio, SummarizeError, Summarizer, Summary};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default = "default_ratio")]
    pub ratio: i64,
}
fn default_ratio() -> i64 { 30 }

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self { status, body: ErrorBody { error, message: message.into() } }
    }
}

impl From<SummarizeError> for ApiError {
    fn from(err: SummarizeError) -> Self {
        let status = match err {
            SummarizeError::EmptyInput | SummarizeError::NoContent { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            SummarizeError::EmptyGraph => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, err.kind(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<Summarizer>,
}

pub fn build_app(summarizer: Summarizer) -> Router {
    let app_state = AppState { summarizer: Arc::new(summarizer) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/config", get(config_handler))
        .route("/summarize", post(summarize_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn summarize_handler(State(state): State<AppState>, Json(req): Json<SummarizeRequest>) -> Result<Json<Summary>, ApiError> {
    let ratio = Ratio::new(req.ratio).map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, "invalid_ratio", e.to_string()))?;

    // Ranking is CPU-bound; keep it off the async workers.
    let summarizer = Arc::clone(&state.summarizer);
    let summary = tokio::task::spawn_blocking(move || summarizer.summarize(&req.text, ratio))
        .await
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", e.to_string()))??;

    Ok(Json(summary))
}

pub async fn config_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::to_value(state.summarizer.config()).unwrap_or(serde_json::Value::Null))
}
