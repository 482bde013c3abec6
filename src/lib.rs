pub mod assets;
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;
pub mod template;

pub use config::Config;
pub use routes::{AppState, RELAY_PATH, router};

/// Router with the full middleware stack used by `serve`.
pub fn app(state: AppState) -> axum::Router {
    use tower_http::{compression::CompressionLayer, trace::TraceLayer};

    router(state)
        .layer(axum::middleware::from_fn(
            middleware::cache_control_middleware,
        ))
        .layer(axum::middleware::map_response(
            middleware::minify_html_middleware,
        ))
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http())
}
