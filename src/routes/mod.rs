use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn,
    response::IntoResponse,
    routing::{any, get},
};
use mervolt_contact::MailSender;

use crate::{
    assets::AssetsService,
    middleware::cors_middleware,
    template::{NotFoundTemplate, render_with_status},
};

pub mod contact;
pub mod health;
pub mod index;

pub const RELAY_PATH: &str = "/api/send-email";

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Created once at startup and shared by every relay invocation.
    pub mailer: Arc<dyn MailSender>,
}

pub async fn fallback() -> impl IntoResponse {
    render_with_status(axum::http::StatusCode::NOT_FOUND, NotFoundTemplate)
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route(
            RELAY_PATH,
            any(contact::send_email).layer(from_fn(cors_middleware)),
        )
        .nest_service("/static", AssetsService::new())
        .fallback(fallback)
        .with_state(app_state)
}
