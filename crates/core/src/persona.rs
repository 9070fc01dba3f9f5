//! System Personas
//!
//! A persona is a fixed system instruction that a model handle is bound to
//! when it is constructed. The set is closed; role text coming from callers is
//! parsed into a `Persona` at the boundary.

use crate::error::AssistantError;
use std::fmt;
use std::str::FromStr;

const ARCHITECT_PROMPT: &str = include_str!("../prompts/architect.md");
const CLASSIFIER_PROMPT: &str = include_str!("../prompts/classifier.md");

/// The personas a caller can ask the assistant to answer as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Persona {
    /// The sharp-tongued cloud architect assistant.
    #[default]
    Default,
    /// A sentiment classifier that answers with a single label.
    Classifier,
}

impl Persona {
    /// Every persona, in declaration order.
    pub const ALL: [Persona; 2] = [Persona::Default, Persona::Classifier];

    /// The tag used for this persona in request parameters and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Default => "default",
            Persona::Classifier => "classifier",
        }
    }

    /// The system instruction a model handle for this persona is bound to.
    pub fn system_instruction(&self) -> &'static str {
        match self {
            Persona::Default => ARCHITECT_PROMPT,
            Persona::Classifier => CLASSIFIER_PROMPT,
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Persona::Default),
            "classifier" => Ok(Persona::Classifier),
            _ => Err(AssistantError::InvalidPersona(s.to_string())),
        }
    }
}
