use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::{debug, error};

use super::domain::LoanApplication;
use super::repository::RecordStore;
use super::service::UnderwritingService;

const INVALID_REQUEST_MESSAGE: &str = "Invalid request, please check your inputs";

/// Router builder exposing the loan request and history endpoints.
pub fn underwriting_router<S>(service: Arc<UnderwritingService<S>>) -> Router
where
    S: RecordStore + ?Sized + 'static,
{
    Router::new()
        .route("/api/request-loan", post(request_loan_handler::<S>))
        .route("/api/loan-history", get(loan_history_handler::<S>))
        .with_state(service)
}

pub(crate) async fn request_loan_handler<S>(
    State(service): State<Arc<UnderwritingService<S>>>,
    payload: Result<Json<LoanApplication>, JsonRejection>,
) -> Response
where
    S: RecordStore + ?Sized + 'static,
{
    let Json(application) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!(error = %rejection, "rejected loan request body");
            return error_response(StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE);
        }
    };

    match service.evaluate(application) {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) if err.is_invalid_input() => {
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(err) => {
            error!(error = %err, "loan evaluation failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

pub(crate) async fn loan_history_handler<S>(
    State(service): State<Arc<UnderwritingService<S>>>,
) -> Response
where
    S: RecordStore + ?Sized + 'static,
{
    match service.history().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => {
            error!(error = %err, "loan history unavailable");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
