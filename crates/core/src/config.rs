//! Backend Configuration
//!
//! Project, location and model name for the Vertex AI backend, resolved from
//! the process environment. Missing values fall back to defaults rather than
//! failing; a bad project or location surfaces later as a backend error.

use std::env;

pub const DEFAULT_PROJECT_ID: &str = "Not Set";
pub const DEFAULT_LOCATION: &str = "Not Set";
pub const DEFAULT_MODEL_NAME: &str = "gemini-2.0-flash";

/// Connection parameters shared by every model handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub project_id: String,
    pub location: String,
    pub model_name: String,
    /// Replaces the computed regional Vertex AI endpoint.
    pub api_endpoint: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            api_endpoint: None,
        }
    }
}

impl BackendConfig {
    /// Reads `PROJECT_ID`, `LOCATION`, `MODEL_NAME` and `VERTEX_API_ENDPOINT`.
    pub fn from_env() -> Self {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let project_id = env::var("PROJECT_ID").unwrap_or_else(|_| DEFAULT_PROJECT_ID.to_string());
        let location = env::var("LOCATION").unwrap_or_else(|_| DEFAULT_LOCATION.to_string());
        let model_name = env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL_NAME.to_string());
        let api_endpoint = env::var("VERTEX_API_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Self {
            project_id,
            location,
            model_name,
            api_endpoint,
        }
    }

    /// Base URL of the Vertex AI API for the configured location.
    pub fn service_endpoint(&self) -> String {
        match &self.api_endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None if self.location == "global" => "https://aiplatform.googleapis.com".to_string(),
            None => format!("https://{}-aiplatform.googleapis.com", self.location),
        }
    }

    /// Resource name of the publisher model.
    pub fn model_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/publishers/google/models/{}",
            self.project_id, self.location, self.model_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env_vars() {
        unsafe {
            env::remove_var("PROJECT_ID");
            env::remove_var("LOCATION");
            env::remove_var("MODEL_NAME");
            env::remove_var("VERTEX_API_ENDPOINT");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_uses_defaults_when_unset() {
        clear_env_vars();

        let config = BackendConfig::from_env();

        assert_eq!(config.project_id, "Not Set");
        assert_eq!(config.location, "Not Set");
        assert_eq!(config.model_name, "gemini-2.0-flash");
        assert_eq!(config.api_endpoint, None);
        assert_eq!(config, BackendConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        clear_env_vars();
        unsafe {
            env::set_var("PROJECT_ID", "guyue-001");
            env::set_var("LOCATION", "us-central1");
            env::set_var("MODEL_NAME", "gemini-1.5-flash");
            env::set_var("VERTEX_API_ENDPOINT", "http://127.0.0.1:9000/");
        }

        let config = BackendConfig::from_env();
        clear_env_vars();

        assert_eq!(config.project_id, "guyue-001");
        assert_eq!(config.location, "us-central1");
        assert_eq!(config.model_name, "gemini-1.5-flash");
        assert_eq!(config.api_endpoint.as_deref(), Some("http://127.0.0.1:9000/"));
    }

    #[test]
    #[serial]
    fn test_blank_endpoint_is_ignored() {
        clear_env_vars();
        unsafe {
            env::set_var("VERTEX_API_ENDPOINT", "  ");
        }

        let config = BackendConfig::from_env();
        clear_env_vars();

        assert_eq!(config.api_endpoint, None);
    }

    #[test]
    fn test_regional_endpoint_and_model_path() {
        let config = BackendConfig {
            project_id: "guyue-001".to_string(),
            location: "us-central1".to_string(),
            ..Default::default()
        };
        assert_eq!(config.service_endpoint(), "https://us-central1-aiplatform.googleapis.com");
        assert_eq!(
            config.model_path(),
            "projects/guyue-001/locations/us-central1/publishers/google/models/gemini-2.0-flash"
        );
    }

    #[test]
    fn test_global_endpoint() {
        let config = BackendConfig {
            location: "global".to_string(),
            ..Default::default()
        };
        assert_eq!(config.service_endpoint(), "https://aiplatform.googleapis.com");
    }

    #[test]
    fn test_endpoint_override() {
        let config = BackendConfig {
            location: "us-central1".to_string(),
            api_endpoint: Some("http://127.0.0.1:9000/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.service_endpoint(), "http://127.0.0.1:9000");
    }
}
