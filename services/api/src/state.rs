//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the assistant client,
//! the page templates and the service configuration.

use crate::config::Config;
use minijinja::Environment;
use std::sync::Arc;
use webeye_core::Assistant;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// The shared application state, created once at startup and passed to all handlers.
/// All fields are public to be accessible from other modules.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub templates: Arc<Environment<'static>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(assistant: Arc<Assistant>, config: Config) -> anyhow::Result<Self> {
        Ok(Self {
            assistant,
            templates: Arc::new(load_templates()?),
            config: Arc::new(config),
        })
    }
}

/// Builds the template environment for the HTML pages.
pub fn load_templates() -> anyhow::Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template("index.html", INDEX_TEMPLATE)?;
    Ok(env)
}
