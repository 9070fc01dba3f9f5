//! Assistant Client
//!
//! Turns a (prompt, persona) pair into generated text. Model handles are
//! created lazily, once per persona, and cached for the life of the
//! `Assistant`.
//!
//! # Concurrency
//!
//! Each persona owns an initialize-once cell. When several requests hit a
//! persona for the first time concurrently, exactly one of them builds the
//! handle and the others wait for it. A failed build leaves the cell empty, so
//! the next request tries again. Once populated, a cell is never reset.
//!
//! The generation call itself has no timeout; callers that need bounded
//! latency wrap `generate` in their own.

use crate::{
    backend::{ModelFactory, ModelHandle, ModelSettings},
    config::BackendConfig,
    error::AssistantError,
    persona::Persona,
};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::OnceCell;

/// Produces the backend configuration when a persona's handle is first built.
pub type ConfigLoader = Arc<dyn Fn() -> BackendConfig + Send + Sync>;

/// Forwards prompts to the backend under one of the fixed personas.
pub struct Assistant {
    factory: Arc<dyn ModelFactory>,
    load_config: ConfigLoader,
    handles: HashMap<Persona, OnceCell<Arc<dyn ModelHandle>>>,
}

impl Assistant {
    /// Creates an assistant that reads its backend configuration from the
    /// environment the first time each persona is used.
    pub fn new(factory: Arc<dyn ModelFactory>) -> Self {
        Self::with_config_loader(factory, Arc::new(BackendConfig::from_env))
    }

    pub fn with_config_loader(factory: Arc<dyn ModelFactory>, load_config: ConfigLoader) -> Self {
        let handles = Persona::ALL
            .into_iter()
            .map(|persona| (persona, OnceCell::new()))
            .collect();
        Self {
            factory,
            load_config,
            handles,
        }
    }

    /// Generates a reply to `prompt` as `persona`.
    ///
    /// The backend's text is returned exactly as received. Backend failures are
    /// returned as [`AssistantError::Backend`] without retrying.
    pub async fn generate(&self, prompt: &str, persona: Persona) -> Result<String, AssistantError> {
        let model = self.model_for(persona).await?;
        model
            .generate_content(prompt)
            .await
            .map_err(AssistantError::Backend)
    }

    /// Like [`Assistant::generate`], with the persona given as role text.
    ///
    /// Unknown roles fail with [`AssistantError::InvalidPersona`] before any
    /// backend activity.
    pub async fn generate_for_role(&self, prompt: &str, role: &str) -> Result<String, AssistantError> {
        let persona: Persona = role.parse()?;
        self.generate(prompt, persona).await
    }

    /// Whether a handle for `persona` has been built.
    pub fn is_initialized(&self, persona: Persona) -> bool {
        self.handles
            .get(&persona)
            .is_some_and(|cell| cell.initialized())
    }

    async fn model_for(&self, persona: Persona) -> Result<Arc<dyn ModelHandle>, AssistantError> {
        let cell = self
            .handles
            .get(&persona)
            .ok_or_else(|| AssistantError::InvalidPersona(persona.to_string()))?;

        let model = cell
            .get_or_try_init(|| async {
                let settings = ModelSettings {
                    config: (self.load_config)(),
                    system_instruction: persona.system_instruction().to_string(),
                };
                self.factory.create_model(settings).await
            })
            .await
            .map_err(AssistantError::Backend)?;

        Ok(model.clone())
    }
}
