use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use mervolt_contact::{ContactSubmission, MailError, render_contact_email};
use serde_json::json;

use crate::{error::RelayError, routes::AppState};

/// Relay endpoint: turns one contact submission into one email.
///
/// `OPTIONS` answers the CORS preflight, `POST` dispatches, anything else is 405.
#[tracing::instrument(skip_all, fields(method = %method))]
pub async fn send_email(
    method: Method,
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<Response, RelayError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }

    if method != Method::POST {
        return Err(RelayError::MethodNotAllowed);
    }

    let submission = ContactSubmission::parse(&body)?;

    // content is never logged, only its shape
    tracing::info!(
        name_len = submission.name.chars().count(),
        phone_len = submission.phone.chars().count(),
        message_len = submission.message.chars().count(),
        "Relaying contact submission"
    );

    let email_config = &app_state.config.email;
    let email = render_contact_email(
        &submission,
        &email_config.from_address,
        &email_config.contact_address,
    )?;

    tokio::time::timeout(email_config.timeout(), app_state.mailer.send(&email))
        .await
        .map_err(|_| MailError::Timeout)??;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Email sent successfully" })),
    )
        .into_response())
}
