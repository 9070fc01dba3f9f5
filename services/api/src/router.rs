//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the OpenAPI documentation.

use crate::{
    handlers,
    models::{ChatReply, ErrorResponse},
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::chat,
        handlers::index,
        handlers::health,
        handlers::process,
    ),
    components(
        schemas(ChatReply, ErrorResponse)
    ),
    tags(
        (name = "WebEye API", description = "Gemini-backed cloud architect assistant")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/", get(handlers::index))
        .route("/chat", get(handlers::chat))
        .route("/health", get(handlers::health))
        .route("/process", post(handlers::process))
        .with_state(app_state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
