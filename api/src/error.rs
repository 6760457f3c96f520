use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::account::AuthenticationError;

/// Request-level errors that know which HTTP status they map to.
pub trait ApiRequestError: std::error::Error {
    fn status_code(&self) -> StatusCode;
}

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("a vote must reference exactly one of a post or a comment")]
    InvalidVoteTarget,

    #[error("no active vote found for this target")]
    VoteNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Request(String, StatusCode),

    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    Database(#[from] diesel::result::Error),

    #[error(transparent)]
    Pool(#[from] diesel_async::pooled_connection::deadpool::PoolError),

    #[error("{0}")]
    Unhandled(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    msg: Option<String>,
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidVoteTarget => "INVALID_VOTE_TARGET",
            AppError::VoteNotFound => "VOTE_NOT_FOUND",
            AppError::Validation(_) => "VALIDATION",
            AppError::Request(..) => "ERR",
            AppError::Authentication(_) => "UNAUTHORIZED",
            AppError::Database(diesel::result::Error::NotFound) => "NOT_FOUND",
            AppError::Database(_) | AppError::Pool(_) => "DATABASE_ERR",
            AppError::Unhandled(_) => "ERR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidVoteTarget => StatusCode::BAD_REQUEST,
            AppError::VoteNotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Request(_, status) => *status,
            AppError::Authentication(e) => e.status_code(),
            AppError::Database(diesel::result::Error::NotFound) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let msg = if status.is_server_error() && !cfg!(debug_assertions) {
            // Don't leak database/internal details in release builds
            Some("Internal server error".into())
        } else {
            Some(self.to_string())
        };

        let body = ErrorResponse {
            code: self.code(),
            msg,
        };

        (status, Json(body)).into_response()
    }
}

impl From<(&'static str, StatusCode)> for AppError {
    fn from((msg, status): (&'static str, StatusCode)) -> Self {
        AppError::Request(msg.into(), status)
    }
}

impl From<&'static str> for AppError {
    fn from(msg: &'static str) -> Self {
        AppError::Unhandled(msg.into())
    }
}
