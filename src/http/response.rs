//! JSON bodies returned by the HTTP API.

use serde::Serialize;

use crate::domain::{FieldError, Pagination};

/// Success envelope: `{message, data}` plus `pagination` for lists.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub message: &'static str,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> Envelope<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        Self {
            message,
            data,
            pagination: None,
        }
    }

    pub fn paginated(message: &'static str, data: T, pagination: Pagination) -> Self {
        Self {
            message,
            data,
            pagination: Some(pagination),
        }
    }
}

/// `{error: "Validation failed", details: [...]}`
#[derive(Debug, Serialize)]
pub struct ValidationBody<'a> {
    pub error: &'static str,
    pub details: &'a [FieldError],
}

/// `{error, message?, statusCode}` for not-found and internal errors.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub status_code: u16,
}
