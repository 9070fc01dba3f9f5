//! API Models
//!
//! Request and response bodies for the HTTP routes, annotated for the
//! OpenAPI document generated with `utoipa`.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Prompt used by `/chat` when the request carries no `q` parameter.
pub const DEFAULT_PROMPT: &str = "自我介绍一下";

/// Query parameters of `GET /chat`.
#[derive(Deserialize, IntoParams, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct ChatQuery {
    /// The user's message. Defaults to a self-introduction request.
    #[param(example = "Cloud Run 和 GKE 怎么选？")]
    pub q: Option<String>,
    /// The persona to answer as: `default` or `classifier` (case-insensitive).
    #[param(example = "default")]
    pub role: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub error: String,
}
