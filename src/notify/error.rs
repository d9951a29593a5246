use thiserror::Error;

/// Failure while delivering a contact notification.
///
/// The display string is what the HTTP boundary reports to the caller.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Named environment variable is unset or blank.
    #[error("{0} is not configured")]
    MissingApiKey(String),
    #[error("invalid request body: {0}")]
    InvalidPayload(String),
    #[error("failed to reach email provider: {0}")]
    Transport(String),
    #[cfg(feature = "api")]
    #[error("failed to render email: {0}")]
    Render(#[from] askama::Error),
    /// Non-success provider response, carrying the provider's message.
    #[error("{0}")]
    Provider(String),
}
