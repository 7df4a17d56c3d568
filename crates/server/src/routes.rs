use axum::{
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::dashboard;
use crate::openapi::ApiDoc;
use crate::services;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: static dashboard bundle, health,
/// and the catalog API, with CORS and request tracing layered on top.
pub fn build_router(state: ServerState, frontend_dir: &str, cors: CorsLayer) -> Router {
    let static_dir = ServeDir::new(frontend_dir)
        .fallback(ServeFile::new(format!("{frontend_dir}/index.html")));

    // Public routes; the static dashboard bundle serves every path the
    // API does not claim, with an index.html fallback for client routing.
    let public = Router::new()
        .route("/health", get(health))
        .fallback_service(static_dir);

    // Catalog API. `/api/services/meta` must be a literal route; axum
    // matches it before the `:id` capture.
    let api = Router::new()
        .route("/api/services", get(services::list).post(services::create))
        .route("/api/services/meta", get(services::meta))
        .route(
            "/api/services/:id",
            get(services::get).put(services::update).delete(services::delete),
        )
        .route("/api/services/:id/status", put(services::update_status))
        .route("/api/dashboard", get(dashboard::summary));

    // Compose
    public
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
