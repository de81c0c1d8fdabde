//! Mapping of tournament errors onto HTTP responses.

use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use tourney::TournamentError;

/// JSON error body: `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Result type for JSON handlers
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// HTTP status for a tournament error
pub fn status_for(err: &TournamentError) -> StatusCode {
    match err {
        TournamentError::InvalidIdentifier(_) | TournamentError::InvalidArgument(_) => {
            StatusCode::BAD_REQUEST
        }
        TournamentError::NotFound(_) => StatusCode::NOT_FOUND,
        TournamentError::StoreUnavailable | TournamentError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Convert a tournament error into a response, logging store failures
pub fn api_error(err: TournamentError) -> ApiError {
    if let TournamentError::Store(store_err) = &err {
        tracing::error!(error = %store_err, "Store operation failed");
    }

    (
        status_for(&err),
        Json(ErrorResponse {
            detail: err.client_message(),
        }),
    )
}
