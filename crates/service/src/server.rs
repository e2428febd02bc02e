use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use phishguard_classifier::ModelDescription;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::detector::{Assessment, Detector};
use crate::errors::DetectorError;

const NOT_READY_MESSAGE: &str = "Model or scaler not loaded. Server not ready.";
const MODEL_NOT_LOADED_MESSAGE: &str = "Model not loaded.";

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<Detector>,
    pub start_time: Instant,
    pub req_count: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(detector: Arc<Detector>) -> Self {
        Self {
            detector,
            start_time: Instant::now(),
            req_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn record_request(&self) -> u64 {
        self.req_count.fetch_add(1, Ordering::Relaxed) as u64 + 1
    }

    fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

type SharedState = Arc<AppState>;

/// `url` may be absent or null; both are reported as an empty URL.
#[derive(Debug, Deserialize)]
struct PredictRequest {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct ModelInfoResponse {
    accuracy: Option<f64>,
    model_type: String,
    status: &'static str,
    feature_count: usize,
    model_hash: String,
    scaler_hash: String,
}

impl From<ModelDescription> for ModelInfoResponse {
    fn from(description: ModelDescription) -> Self {
        Self {
            accuracy: description.accuracy,
            model_type: description.model_type,
            status: "ready",
            feature_count: description.feature_count,
            model_hash: description.model_hash,
            scaler_hash: description.scaler_hash,
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_ready: bool,
    uptime_secs: u64,
    requests_total: u64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn service_unavailable<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    fn internal<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<DetectorError> for ApiError {
    fn from(err: DetectorError) -> Self {
        match err {
            DetectorError::NotReady(_) => ApiError::service_unavailable(NOT_READY_MESSAGE),
            DetectorError::EmptyUrl => ApiError::bad_request(err.to_string()),
            DetectorError::FeatureCountMismatch { .. } | DetectorError::Classifier(_) => {
                warn!("Prediction failed: {}", err);
                ApiError::internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, payload).into_response()
    }
}

/// Bind `addr` and serve until Ctrl-C
pub async fn start_server(state: AppState, addr: SocketAddr, cors_enabled: bool) -> Result<()> {
    let app = build_router(state, cors_enabled);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {addr}"))?;
    info!("PhishGuard listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received shutdown signal"),
        Err(err) => warn!("Unable to listen for shutdown signal: {}", err),
    }
}

pub fn build_router(state: AppState, cors_enabled: bool) -> Router {
    let router = Router::new()
        .route("/predict", post(handle_predict))
        .route("/model-info", get(handle_model_info))
        .route("/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state));

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn handle_predict(
    State(state): State<SharedState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Assessment>, ApiError> {
    state.record_request();
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let url = request.url.unwrap_or_default();
    let assessment = state.detector.assess(&url)?;
    Ok(Json(assessment))
}

async fn handle_model_info(
    State(state): State<SharedState>,
) -> Result<Json<ModelInfoResponse>, ApiError> {
    state.record_request();
    state
        .detector
        .describe()
        .map(|description| Json(description.into()))
        .ok_or_else(|| ApiError::service_unavailable(MODEL_NOT_LOADED_MESSAGE))
}

async fn handle_health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let requests_total = state.record_request();
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
        model_ready: state.detector.is_ready(),
        uptime_secs: state.uptime_seconds(),
        requests_total,
    })
}
