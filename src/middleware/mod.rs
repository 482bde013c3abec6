pub mod cache;
pub mod cors;
pub mod minify;

pub use cache::cache_control_middleware;
pub use cors::cors_middleware;
pub use minify::minify_html_middleware;
