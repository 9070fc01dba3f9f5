/// Errors returned by [`crate::assistant::Assistant`].
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// The caller asked for a role outside the known persona set.
    #[error("Invalid persona: '{0}'")]
    InvalidPersona(String),
    /// The remote backend could not produce a reply.
    #[error(transparent)]
    Backend(anyhow::Error),
}
