//! Vertex AI Gemini backend.
//!
//! Implements the backend seam on top of the `PredictionService` client from
//! `google-cloud-aiplatform-v1`. Credentials are resolved through Application
//! Default Credentials (environment, gcloud user credentials or the metadata
//! server) and refreshed by the client; nothing is fetched until the first
//! request.

use crate::backend::{ModelFactory, ModelHandle, ModelSettings};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use google_cloud_aiplatform_v1 as vertexai;
use std::sync::Arc;
use tracing::{debug, warn};
use vertexai::model::{Content, GenerateContentResponse, Part};

/// Builds [`VertexModel`] handles, one `PredictionService` client each.
#[derive(Default)]
pub struct VertexModelFactory;

impl VertexModelFactory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ModelFactory for VertexModelFactory {
    async fn create_model(&self, settings: ModelSettings) -> Result<Arc<dyn ModelHandle>> {
        let endpoint = settings.config.service_endpoint();
        let model = settings.config.model_path();
        debug!(%endpoint, %model, "Creating Vertex AI model handle");

        let client = vertexai::client::PredictionService::builder()
            .with_endpoint(endpoint)
            .build()
            .await
            .context("Failed to build Vertex AI prediction client")?;

        Ok(Arc::new(VertexModel {
            client,
            model,
            system_instruction: settings.system_instruction,
        }))
    }
}

/// A Gemini model on Vertex AI bound to one system instruction.
pub struct VertexModel {
    client: vertexai::client::PredictionService,
    model: String,
    system_instruction: String,
}

#[async_trait]
impl ModelHandle for VertexModel {
    async fn generate_content(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .generate_content()
            .set_model(&self.model)
            .set_system_instruction(
                Content::new().set_parts([Part::new().set_text(self.system_instruction.as_str())]),
            )
            .set_contents([Content::new()
                .set_role("user")
                .set_parts([Part::new().set_text(prompt)])])
            .send()
            .await
            .context("Vertex AI generateContent request failed")?;

        response_text(response)
    }
}

/// Concatenates the text parts of the first candidate.
fn response_text(response: GenerateContentResponse) -> Result<String> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(anyhow!(
            "Vertex AI returned no candidates (prompt feedback: {:?})",
            response.prompt_feedback
        ));
    };

    let texts: Vec<String> = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .iter()
        .filter_map(|p| p.text().cloned())
        .collect();

    if texts.is_empty() {
        warn!(finish_reason = ?candidate.finish_reason, "Candidate carried no text");
        return Err(anyhow!(
            "Vertex AI candidate has no text (finish reason: {:?})",
            candidate.finish_reason
        ));
    }

    Ok(texts.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use serial_test::serial;
    use vertexai::model::Candidate;

    #[tokio::test]
    #[serial]
    async fn test_handle_builds_without_gcloud_cli() {
        let saved_path = std::env::var_os("PATH");
        unsafe {
            std::env::set_var("PATH", "/nonexistent");
            std::env::remove_var("GOOGLE_APPLICATION_CREDENTIALS");
        }

        let settings = ModelSettings {
            config: BackendConfig {
                project_id: "guyue-001".to_string(),
                location: "us-central1".to_string(),
                ..Default::default()
            },
            system_instruction: "Be terse.".to_string(),
        };
        let result = VertexModelFactory::new().create_model(settings).await;

        unsafe {
            match saved_path {
                Some(path) => std::env::set_var("PATH", path),
                None => std::env::remove_var("PATH"),
            }
        }
        if let Err(e) = result {
            panic!("handle construction failed: {:#}", e);
        }
    }

    fn candidate_with(parts: Vec<Part>) -> Candidate {
        Candidate::new().set_content(Content::new().set_role("model").set_parts(parts))
    }

    #[test]
    fn test_text_parts_of_first_candidate_are_joined_unchanged() {
        let response = GenerateContentResponse::new().set_candidates([
            candidate_with(vec![
                Part::new().set_text("  别看了，"),
                Part::new().set_text("快去改 Bug！\n"),
            ]),
            candidate_with(vec![Part::new().set_text("second candidate")]),
        ]);

        assert_eq!(response_text(response).unwrap(), "  别看了，快去改 Bug！\n");
    }

    #[test]
    fn test_no_candidates_is_an_error() {
        let err = response_text(GenerateContentResponse::new())
            .unwrap_err()
            .to_string();
        assert!(err.contains("no candidates"), "unexpected error: {}", err);
    }

    #[test]
    fn test_candidate_without_text_is_an_error() {
        let response = GenerateContentResponse::new().set_candidates([Candidate::new()]);
        let err = response_text(response).unwrap_err().to_string();
        assert!(err.contains("no text"), "unexpected error: {}", err);
    }
}
