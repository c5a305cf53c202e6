use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use interest_groups::error::AppError;
use interest_groups::workflows::import::CaseImporter;
use interest_groups::workflows::prioritization::{
    prioritization_router, GroupFormation, InterestGroupView,
};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

/// Inline CSV export ranked without touching the filesystem.
#[derive(Debug, Deserialize)]
pub(crate) struct CsvImportRequest {
    pub(crate) csv: String,
}

pub(crate) fn with_prioritization_routes(groups: Arc<GroupFormation>) -> axum::Router {
    prioritization_router(groups.clone())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/cases/import",
            axum::routing::post(csv_import_endpoint),
        )
        .layer(Extension(groups))
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

pub(crate) async fn csv_import_endpoint(
    Extension(groups): Extension<Arc<GroupFormation>>,
    Json(payload): Json<CsvImportRequest>,
) -> Result<Json<InterestGroupView>, AppError> {
    let cases = CaseImporter::from_csv_reader(Cursor::new(payload.csv.into_bytes()))?;
    let outcome = groups.form(cases)?;
    Ok(Json(InterestGroupView::from(outcome)))
}
