use crate::infra::{deserialize_optional_date, start_of_day, AppState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use laborisk::error::AppError;
use laborisk::workflows::questionnaire::assessments::{
    assessment_router, AssessmentRepository, AssessmentService, BatchId,
};
use laborisk::workflows::roster::RosterImporter;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct ReleaseBatchRequest {
    pub(crate) company: String,
    pub(crate) roster_csv: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) released_on: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReleaseBatchResponse {
    pub(crate) batch_id: BatchId,
    pub(crate) company: String,
    pub(crate) subjects: usize,
    pub(crate) released_at: NaiveDateTime,
}

pub(crate) fn with_assessment_routes<R>(service: Arc<AssessmentService<R>>) -> axum::Router
where
    R: AssessmentRepository + 'static,
{
    assessment_router(service.clone())
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/v1/batches/release",
            post(release_batch_endpoint::<R>).with_state(service),
        )
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

/// Accepts an employer roster CSV and releases one assessment per listed
/// employee as a new batch.
pub(crate) async fn release_batch_endpoint<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Json(payload): Json<ReleaseBatchRequest>,
) -> Result<Json<ReleaseBatchResponse>, AppError>
where
    R: AssessmentRepository + 'static,
{
    let ReleaseBatchRequest {
        company,
        roster_csv,
        released_on,
    } = payload;

    let subjects = RosterImporter::from_reader(Cursor::new(roster_csv.into_bytes()))?;
    let released_at = released_on
        .map(start_of_day)
        .unwrap_or_else(|| Utc::now().naive_utc());

    let subject_count = subjects.len();
    let batch = service.release_batch(&company, subjects, released_at)?;

    Ok(Json(ReleaseBatchResponse {
        batch_id: batch.id,
        company: batch.company,
        subjects: subject_count,
        released_at: batch.released_at,
    }))
}
