use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mervolt_contact::{MailError, SubmissionError};
use serde_json::json;
use thiserror::Error;

/// Failures of the relay endpoint, each mapped to a JSON `{ "error": .. }` body.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Failed to render email: {0}")]
    Render(#[from] askama::Error),

    #[error("Mail dispatch failed: {0}")]
    Dispatch(#[from] MailError),
}

impl From<SubmissionError> for RelayError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Malformed(e) => RelayError::InvalidBody(e.to_string()),
            SubmissionError::Invalid { fields } => RelayError::MissingFields(fields),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status_code, message) = match &self {
            RelayError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
            }
            RelayError::InvalidBody(e) => {
                tracing::debug!("Rejected malformed submission: {}", e);
                (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
            }
            RelayError::MissingFields(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            RelayError::Render(e) => {
                tracing::error!("Failed to render contact email: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to send email".to_string(),
                )
            }
            // provider detail stays in the logs
            RelayError::Dispatch(e) => {
                tracing::error!("Error sending email: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to send email".to_string(),
                )
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
