//! KYC submission and status polling.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use fantera_core::kyc::flow::{KycError, KycFlow};
use fantera_core::kyc::validation::KycSubmission;
use serde_json::json;
use tracing::error;

use crate::error::{api_success, ApiError, ErrorType};
use crate::routes::authenticate;
use crate::state::SharedState;

pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: String,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let submission: KycSubmission = serde_json::from_str(&body)
        .map_err(|_| ApiError::validation("Request body must be a JSON object"))?;

    let flow = KycFlow::new(&state.privy, &state.db);
    match flow.submit(&caller.subject_id, &submission).await {
        Ok(status) => Ok(api_success(json!({ "kycStatus": status }))),
        Err(err) => Err(map_kyc_error(
            err,
            "KYC_INITIATION_FAILED",
            "Could not start verification",
        )),
    }
}

pub async fn status(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let caller = authenticate(&state, &headers).await?;

    let flow = KycFlow::new(&state.privy, &state.db);
    match flow.check_status(&caller.subject_id).await {
        Ok(status) => Ok(api_success(json!({ "kycStatus": status }))),
        Err(err) => Err(map_kyc_error(
            err,
            "KYC_STATUS_FAILED",
            "Could not check verification status",
        )),
    }
}

fn map_kyc_error(err: KycError, failure_code: &'static str, failure_message: &str) -> ApiError {
    match err {
        KycError::UserNotFound => ApiError::not_found("USER_NOT_FOUND", "User not found"),
        KycError::AlreadyVerified => ApiError::new(
            StatusCode::BAD_REQUEST,
            "KYC_ALREADY_ACTIVE",
            "User is already verified",
            ErrorType::SystemError,
        ),
        KycError::InvalidSubmission { errors } => ApiError::validation(errors.join(", ")),
        KycError::Provider(source) | KycError::Store(source) => {
            error!(error = %source, "KYC operation failed");
            ApiError::system(failure_code, failure_message)
        }
    }
}
