use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::super::domain::RespondentRole;
use super::domain::{AssessmentId, BatchId, DimensionSubmission};
use super::progress::ProgressError;
use super::repository::{AssessmentRepository, RepositoryError};
use super::service::{AssessmentService, AssessmentServiceError};

/// Router builder exposing the progression and reporting endpoints.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route("/api/v1/questionnaire", get(questionnaire_handler::<R>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(status_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/start",
            post(start_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/reopen",
            post(reopen_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/back",
            post(back_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/dimensions",
            post(save_dimension_handler::<R>),
        )
        .route(
            "/api/v1/batches/:batch_id/readiness",
            get(batch_readiness_handler::<R>),
        )
        .route(
            "/api/v1/batches/:batch_id/report",
            get(batch_report_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionnaireQuery {
    role: Option<String>,
}

pub(crate) async fn questionnaire_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Query(query): Query<QuestionnaireQuery>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let role = query
        .role
        .as_deref()
        .map(RespondentRole::parse)
        .unwrap_or(RespondentRole::Operational);
    (
        StatusCode::OK,
        axum::Json(service.catalog().view_for(role)),
    )
        .into_response()
}

pub(crate) async fn status_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.status(&id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn start_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.start(&id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reopen_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.reopen(&id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn back_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    match service.navigate_back(&id) {
        Ok(navigation) => (StatusCode::OK, axum::Json(navigation)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn save_dimension_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
    axum::Json(submission): axum::Json<DimensionSubmission>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = AssessmentId(assessment_id);
    let now = Utc::now().naive_utc();
    match service.save_dimension(&id, &submission, now) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn batch_readiness_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(batch_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = BatchId(batch_id);
    match service.batch_readiness(&id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn batch_report_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(batch_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let id = BatchId(batch_id);
    match service.batch_report(&id) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

/// Every core error kind keeps its own external status; the taxonomy is
/// never flattened into a generic failure.
fn error_response(error: AssessmentServiceError) -> Response {
    let (status, kind) = match &error {
        AssessmentServiceError::Progress(ProgressError::Validation(_)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "validation")
        }
        AssessmentServiceError::Progress(ProgressError::Sequence(_)) => {
            (StatusCode::CONFLICT, "sequence")
        }
        AssessmentServiceError::Progress(ProgressError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "not_found")
        }
        AssessmentServiceError::Repository(RepositoryError::NotFound) => {
            (StatusCode::NOT_FOUND, "not_found")
        }
        AssessmentServiceError::Repository(RepositoryError::Conflict) => {
            (StatusCode::CONFLICT, "sequence")
        }
        AssessmentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "internal")
        }
    };

    let payload = json!({
        "kind": kind,
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
