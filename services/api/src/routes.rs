use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use buildhub_timeline::error::AppError;
use buildhub_timeline::workflows::batch::BatchReport;
use buildhub_timeline::workflows::timeline::{
    DurationEstimate, IntakeForm, IntakeIssue, PlotCategory, PlotUnit, TimelineEstimator,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum EstimateStatus {
    Estimated,
    InsufficientData,
}

#[derive(Debug, Serialize)]
pub(crate) struct EstimateResponse {
    pub(crate) status: EstimateStatus,
    pub(crate) generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) estimate: Option<DurationEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) duration_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) plot_category: Option<PlotCategory>,
    pub(crate) issues: Vec<IntakeIssue>,
}

impl EstimateResponse {
    pub(crate) fn build(
        estimator: &TimelineEstimator,
        form: &IntakeForm,
        default_unit: PlotUnit,
    ) -> Self {
        let parsed = form.parse(default_unit);
        let estimate = estimator.estimate(&parsed.intake);
        let status = if estimate.is_some() {
            EstimateStatus::Estimated
        } else {
            EstimateStatus::InsufficientData
        };

        Self {
            status,
            generated_at: Utc::now(),
            duration_label: estimate.as_ref().map(DurationEstimate::duration_label),
            plot_category: PlotCategory::classify(parsed.intake.plot_size),
            estimate,
            issues: parsed.issues,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    pub(crate) csv: String,
}

pub(crate) fn timeline_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/timeline/estimate", post(estimate_endpoint))
        .route("/api/v1/timeline/batch", post(batch_endpoint))
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

pub(crate) async fn estimate_endpoint(
    Extension(state): Extension<AppState>,
    Json(form): Json<IntakeForm>,
) -> Json<EstimateResponse> {
    let response = EstimateResponse::build(&state.estimator, &form, state.default_plot_unit);
    debug!(
        status = ?response.status,
        issues = response.issues.len(),
        "timeline estimate served"
    );
    Json(response)
}

pub(crate) async fn batch_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchReport>, AppError> {
    let reader = Cursor::new(payload.csv.into_bytes());
    let report = state.batch_importer().import_reader(reader)?;
    Ok(Json(report))
}
