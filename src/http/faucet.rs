//! Faucet catalog HTTP handlers.
//!
//! - `GET /api/faucets` lists verified listings, optionally filtered by
//!   `token`, `network` and `status`
//! - `POST /api/faucets/submit` queues a new listing for review

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::error;

use crate::catalog::{self, CatalogQuery};
use crate::models::faucet::{FaucetListResponse, SubmissionResponse};
use crate::state::AppState;
use crate::submission::{self, FaucetSubmission, SubmissionError};

use super::HttpError;
use super::extract::{JsonOrForm, ValidQuery};

const LIST_FAILED: &str = "Failed to retrieve faucets";
const REQUIRED_FIELDS: &str = "Faucet name and URL are required.";
const DUPLICATE_URL: &str = "This faucet URL has already been submitted.";
const SUBMIT_FAILED: &str = "Failed to submit faucet.";
const SUBMIT_ACCEPTED: &str = "Faucet submitted successfully and is pending review.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/faucets", get(list_faucets))
        .route("/api/faucets/submit", post(submit_faucet))
}

async fn list_faucets(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<CatalogQuery>,
) -> Result<Json<FaucetListResponse>, HttpError> {
    let faucets = catalog::list_verified(&state.store, query)
        .await
        .map_err(|err| {
            error!("Failed to query faucets: {err}");
            HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, LIST_FAILED.to_string())
        })?;

    Ok(Json(FaucetListResponse { faucets }))
}

async fn submit_faucet(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<FaucetSubmission>,
) -> Result<(StatusCode, Json<SubmissionResponse>), HttpError> {
    let faucet_id = submission::submit(&state.store, request)
        .await
        .map_err(submission_error)?;

    let response = SubmissionResponse {
        message: SUBMIT_ACCEPTED.to_string(),
        faucet_id,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

fn submission_error(err: SubmissionError) -> HttpError {
    match err {
        SubmissionError::Validation => {
            HttpError::new(StatusCode::BAD_REQUEST, REQUIRED_FIELDS.to_string())
        }
        SubmissionError::Conflict => HttpError::new(StatusCode::CONFLICT, DUPLICATE_URL.to_string()),
        SubmissionError::Storage(err) => {
            error!("Failed to insert faucet: {err}");
            HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, SUBMIT_FAILED.to_string())
        }
    }
}
