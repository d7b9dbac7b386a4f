use crate::check::check_payload;
use crate::infra::AppState;
use agency_leads::error::AppError;
use agency_leads::workflows::intake::{lead_router, Messenger, SubmissionOrchestrator};
use axum::body::Bytes;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_lead_routes<M>(orchestrator: Arc<SubmissionOrchestrator<M>>) -> axum::Router
where
    M: Messenger + 'static,
{
    lead_router(orchestrator)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/leads/check", axum::routing::post(check_endpoint))
}

/// Dry run of the lead rules: reports issues without sending anything.
pub(crate) async fn check_endpoint(body: Bytes) -> Result<Json<serde_json::Value>, AppError> {
    let report = check_payload(&body, None)?;
    Ok(Json(report))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
