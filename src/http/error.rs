//! Central mapping from failures to HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use super::response::{ErrorBody, ValidationBody};
use crate::domain::{FieldError, INVALID_ID};
use crate::service::ServiceError;

/// Every failure a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(String),

    #[error("route {method} {path} not found")]
    RouteNotFound { method: Method, path: String },

    /// A request the extractors refused for a reason other than its content,
    /// such as an oversized body.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// Details are logged, never sent to the client.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<Vec<FieldError>> for ApiError {
    fn from(details: Vec<FieldError>) -> Self {
        ApiError::Validation(details)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            ServiceError::Storage(e) => ApiError::Internal(e.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::BAD_REQUEST
            | StatusCode::UNPROCESSABLE_ENTITY
            | StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                ApiError::Validation(vec![FieldError::new("body", rejection.body_text())])
            }
            status => ApiError::Rejected {
                status,
                message: rejection.body_text(),
            },
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::Validation(vec![FieldError::new("id", INVALID_ID)])
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(vec![FieldError::new("query", rejection.body_text())])
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationBody {
                    error: "Validation failed",
                    details: &details,
                }),
            )
                .into_response(),
            ApiError::NotFound(message) => not_found(message),
            ApiError::RouteNotFound { method, path } => {
                not_found(format!("Route {method} {path} not found"))
            }
            ApiError::Rejected { status, message } => error_body(status, message),
            ApiError::Internal(err) => {
                error!(error = %format!("{err:#}"), "unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody {
                        error: "Internal Server Error".to_string(),
                        message: Some("An unexpected error occurred"),
                        status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

fn not_found(error: String) -> Response {
    error_body(StatusCode::NOT_FOUND, error)
}

fn error_body(status: StatusCode, error: String) -> Response {
    (
        status,
        Json(ErrorBody {
            error,
            message: None,
            status_code: status.as_u16(),
        }),
    )
        .into_response()
}
