use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::narrative::{ChatTurn, NarrativeError};
use crate::roster::{EvaluationSubmission, RepositoryError, StudentId, StudentRepository, TargetRepository};
use crate::scoring::TargetId;

use super::service::{AdmissionsService, AdmissionsServiceError, NarrativeQuery};
use super::views::{CompareRequest, SimulationRequest};

type SharedService<S, T> = Arc<AdmissionsService<S, T>>;

/// Router builder exposing the dashboard, simulator and analytics endpoints.
pub fn admissions_router<S, T>(service: SharedService<S, T>) -> Router
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    Router::new()
        .route("/api/v1/students", get(list_students_handler::<S, T>))
        .route("/api/v1/students/:student_id", get(student_handler::<S, T>))
        .route(
            "/api/v1/students/:student_id/evaluations",
            post(record_evaluation_handler::<S, T>),
        )
        .route(
            "/api/v1/students/:student_id/gaps",
            get(subject_gaps_handler::<S, T>),
        )
        .route("/api/v1/simulations", post(simulate_handler::<S, T>))
        .route(
            "/api/v1/simulations/compare",
            post(compare_handler::<S, T>),
        )
        .route("/api/v1/targets", get(list_targets_handler::<S, T>))
        .route(
            "/api/v1/targets/:target_id/peers",
            get(peer_analytics_handler::<S, T>),
        )
        .route("/api/v1/dashboard", get(dashboard_handler::<S, T>))
        .route("/api/v1/narratives", post(narrative_handler::<S, T>))
        .route("/api/v1/chat", post(chat_handler::<S, T>))
        .with_state(service)
}

fn respond<V: serde::Serialize>(result: Result<V, AdmissionsServiceError>) -> Response {
    match result {
        Ok(value) => (StatusCode::OK, axum::Json(value)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn error_response(err: AdmissionsServiceError) -> Response {
    let status = match &err {
        AdmissionsServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AdmissionsServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AdmissionsServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AdmissionsServiceError::Scoring(_) | AdmissionsServiceError::InvalidRequest(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AdmissionsServiceError::Narrative(NarrativeError::EmptyPrompt) => StatusCode::BAD_REQUEST,
        AdmissionsServiceError::Narrative(_) => StatusCode::BAD_GATEWAY,
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "admissions request failed");
    }

    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn list_students_handler<S, T>(
    State(service): State<SharedService<S, T>>,
) -> Response
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    respond(service.students())
}

pub(crate) async fn student_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    Path(student_id): Path<String>,
) -> Response
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    respond(service.student(&StudentId(student_id)))
}

pub(crate) async fn record_evaluation_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    Path(student_id): Path<String>,
    axum::Json(submission): axum::Json<EvaluationSubmission>,
) -> Response
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    match service.record_evaluation(&StudentId(student_id), submission) {
        Ok(student) => (StatusCode::CREATED, axum::Json(student)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn subject_gaps_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    Path(student_id): Path<String>,
) -> Response
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    respond(service.subject_gaps(&StudentId(student_id)))
}

pub(crate) async fn simulate_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    axum::Json(request): axum::Json<SimulationRequest>,
) -> Response
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    respond(service.simulate(request))
}

pub(crate) async fn compare_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    axum::Json(request): axum::Json<CompareRequest>,
) -> Response
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    respond(service.compare_targets(request))
}

pub(crate) async fn list_targets_handler<S, T>(
    State(service): State<SharedService<S, T>>,
) -> Response
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    respond(service.targets())
}

pub(crate) async fn peer_analytics_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    Path(target_id): Path<String>,
) -> Response
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    respond(service.peer_analytics(&TargetId(target_id)))
}

pub(crate) async fn dashboard_handler<S, T>(State(service): State<SharedService<S, T>>) -> Response
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    respond(service.dashboard())
}

pub(crate) async fn narrative_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    axum::Json(query): axum::Json<NarrativeQuery>,
) -> Response
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    respond(service.narrate(query))
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatRequest {
    pub(crate) turns: Vec<ChatTurn>,
}

pub(crate) async fn chat_handler<S, T>(
    State(service): State<SharedService<S, T>>,
    axum::Json(request): axum::Json<ChatRequest>,
) -> Response
where
    S: StudentRepository + 'static,
    T: TargetRepository + 'static,
{
    match service.chat(&request.turns) {
        Ok(chunks) => {
            let reply = chunks.join(" ");
            (
                StatusCode::OK,
                axum::Json(json!({ "chunks": chunks, "reply": reply })),
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}
