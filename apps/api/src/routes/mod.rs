pub mod health;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::analysis::handlers::handle_analyze;
use crate::extraction::handlers::handle_extract_resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Uploads are buffered whole with no size cap
        .route(
            "/extract-resume",
            post(handle_extract_resume).layer(DefaultBodyLimit::disable()),
        )
        .route("/analyze", post(handle_analyze))
        .with_state(state)
}

/// CORS for a single frontend origin with credentials. The allow-origin header
/// is only sent back to that origin. Any method and header
/// is accepted from that origin; with credentials enabled the wildcard is not
/// allowed, so the preflight's requested method/headers are mirrored back.
pub fn cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("FRONTEND_ORIGIN '{origin}' is not a valid header value"))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}
