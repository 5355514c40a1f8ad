//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::transaction::ValidationErrors;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The ID in the request path is not a well-formed transaction ID.
    ///
    /// This is distinct from [Error::NotFound]: a malformed ID can never refer
    /// to a transaction, so the client made a mistake.
    #[error("invalid ID \"{0}\"")]
    InvalidIdentifier(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the transaction has not been deleted.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("transaction not found")]
    NotFound,

    /// One or more fields of a transaction violated their constraints.
    #[error("validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    /// The request body could not be read as transaction fields, e.g. it was
    /// not JSON or a field had the wrong JSON type.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The database could not be reached or failed unexpectedly.
    ///
    /// The message is the underlying error and is passed on to the client.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl Error {
    /// The HTTP status code used when this error is sent to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidIdentifier(_) | Error::ValidationFailed(_) | Error::MalformedBody(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::StoreUnavailable(error.to_string())
            }
        }
    }
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Error::ValidationFailed(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Error::ValidationFailed(errors) => json!({
                "error": self.to_string(),
                "details": errors,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
