use crate::config::BackendConfig;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Everything a model handle is parameterized by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelSettings {
    pub config: BackendConfig,
    pub system_instruction: String,
}

/// A configured connection to the remote generation backend, bound to one
/// system instruction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelHandle: Send + Sync {
    /// Makes a single-turn generation call and returns the generated text.
    async fn generate_content(&self, prompt: &str) -> Result<String>;
}

/// Builds model handles. Construction must not perform network I/O; credential
/// problems surface on the first `generate_content` call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelFactory: Send + Sync {
    async fn create_model(&self, settings: ModelSettings) -> Result<Arc<dyn ModelHandle>>;
}
