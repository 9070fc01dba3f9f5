//! WebEye assistant core.
//!
//! Forwards user prompts to a Gemini model on Vertex AI under one of a fixed
//! set of system personas. Model handles are built lazily and cached per
//! persona; see [`assistant::Assistant`].

pub mod assistant;
pub mod backend;
pub mod config;
pub mod error;
pub mod persona;
pub mod vertex;

pub use assistant::Assistant;
pub use error::AssistantError;
pub use persona::Persona;
