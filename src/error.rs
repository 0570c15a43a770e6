//! Error taxonomy for the API.
//!
//! Lookup misses are [`Error::NotFound`], bad client input is
//! [`Error::Validation`], uniqueness violations are [`Error::Conflict`].
//! Anything else is a store fault: logged server-side, sanitized for the
//! client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Entity lookup miss. 404.
    #[error("{0}")]
    NotFound(&'static str),

    /// Missing/empty field, malformed body, or referential violation. 400.
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation. Reported as 400: the API contract folds all
    /// client faults other than lookup misses into 400.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Db(#[from] rusqlite::Error),

    #[error("{0}")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal(err)
    }
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) | Error::Conflict(_) => StatusCode::BAD_REQUEST,
            Error::Db(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", self);
            return (status, Json(json!({ "error": "internal server error" }))).into_response();
        }

        tracing::warn!("Request error: {}", self);
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
