use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

use crate::runtime::handle::RuntimeError;

/// Request failures, rendered as `{"error": "..."}` JSON.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// A form field was absent or empty.
    #[error("Missing required fields")]
    MissingFields,
    /// The request body was not a usable form.
    #[error("Error parsing form: {0}")]
    Form(String),
    /// The path id is not an integer.
    #[error("Error parsing ID: {0}")]
    BadId(#[from] std::num::ParseIntError),
    /// The path id is zero or negative.
    #[error("Invalid ID")]
    InvalidId,
    /// No contact carries the requested id.
    #[error("Contact not found")]
    NotFound,
    /// Any other failure from the contact book.
    #[error("{context}: {source}")]
    Book {
        /// What the handler was doing.
        context: &'static str,
        /// Underlying runtime error.
        #[source]
        source: RuntimeError,
    },
}

impl WebError {
    /// Wraps a runtime error; `NotFound` keeps its own status.
    pub fn book(context: &'static str, source: RuntimeError) -> Self {
        match source {
            RuntimeError::NotFound(_) => Self::NotFound,
            source => Self::Book { context, source },
        }
    }

    /// HTTP status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields | Self::Form(_) | Self::BadId(_) | Self::InvalidId => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Book { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, %status, "request rejected");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
