//! Axum Handlers
//!
//! The chat route forwards to the assistant; the other routes are the small
//! utility endpoints of the service. `utoipa` annotations feed the OpenAPI
//! document.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Json, Response},
};
use bytes::Bytes;
use minijinja::context;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};
use webeye_core::{AssistantError, Persona};

use crate::{
    models::{ChatQuery, ChatReply, DEFAULT_PROMPT, ErrorResponse},
    state::AppState,
};

/// How much of the user's input is written to the log.
const LOGGED_INPUT_CHARS: usize = 80;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    GatewayTimeout(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::GatewayTimeout(message) => {
                warn!("{}", message);
                (StatusCode::GATEWAY_TIMEOUT, message)
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err))
            }
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::InvalidPersona(_) => Self::BadRequest(err.to_string()),
            AssistantError::Backend(e) => Self::InternalServerError(e),
        }
    }
}

/// Ask the assistant a question under one of its personas.
#[utoipa::path(
    get,
    path = "/chat",
    params(ChatQuery),
    responses(
        (status = 200, description = "Generated reply", body = ChatReply),
        (status = 400, description = "Empty prompt or unknown role", body = ErrorResponse),
        (status = 500, description = "The model backend failed", body = ErrorResponse),
        (status = 504, description = "The model backend did not answer in time", body = ErrorResponse)
    )
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChatQuery>,
) -> Result<Json<ChatReply>, ApiError> {
    let prompt = query.q.unwrap_or_else(|| DEFAULT_PROMPT.to_string());
    if prompt.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Query parameter 'q' must not be empty".to_string(),
        ));
    }
    let persona: Persona = match query.role.as_deref() {
        Some(role) => role.parse()?,
        None => Persona::default(),
    };

    let preview: String = prompt.chars().take(LOGGED_INPUT_CHARS).collect();
    info!(role = %persona, input = %preview, "Chat request");

    let reply = match state.config.chat_timeout {
        Some(limit) => tokio::time::timeout(limit, state.assistant.generate(&prompt, persona))
            .await
            .map_err(|_| {
                ApiError::GatewayTimeout(format!("The model did not answer within {:?}", limit))
            })??,
        None => state.assistant.generate(&prompt, persona).await?,
    };

    Ok(Json(ChatReply { reply }))
}

/// Render the landing page.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "HTML landing page", body = String, content_type = "text/html")
    )
)]
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let env_test = std::env::var("ENV_TEST").unwrap_or_else(|_| "Not Set".to_string());
    let env_date = std::env::var("ENV_DATE").unwrap_or_else(|_| "Not Set".to_string());

    let page = state
        .templates
        .get_template("index.html")
        .and_then(|tmpl| tmpl.render(context! { env_test, env_date }))
        .map_err(|e| ApiError::InternalServerError(e.into()))?;

    Ok(Html(page))
}

/// Liveness check.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = String, content_type = "text/plain")
    )
)]
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Echo a JSON body back unchanged.
#[utoipa::path(
    post,
    path = "/process",
    responses(
        (status = 200, description = "The request body, unchanged"),
        (status = 400, description = "Body is not JSON or has the wrong content type", body = ErrorResponse)
    )
)]
pub async fn process(headers: HeaderMap, body: Bytes) -> Result<Json<Value>, ApiError> {
    let invalid = || ApiError::BadRequest("Invalid JSON or Content-Type".to_string());

    if !is_json_content_type(&headers) {
        return Err(invalid());
    }
    let data: Value = serde_json::from_slice(&body).map_err(|_| invalid())?;
    if data.is_null() {
        return Err(invalid());
    }
    Ok(Json(data))
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
