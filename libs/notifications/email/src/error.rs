//! Error types for the notification dispatcher.

use std::fmt;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors that can occur while dispatching notifications.
///
/// Malformed records never surface here: they are skipped and logged.
/// Everything that does reach this type aborts the batch.
#[derive(Debug)]
pub enum NotificationError {
    /// Serialization/deserialization error
    SerializationError(String),
    /// Invalid input (e.g. a record without a recipient)
    InvalidInput(String),
    /// Template registration or rendering error
    TemplateError(String),
    /// Provider error (SES, mock, ...)
    ProviderError(String),
}

impl NotificationError {
    /// Whether this error came from the send step of a record.
    pub fn is_send_failure(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::ProviderError(_))
    }
}

impl fmt::Display for NotificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::TemplateError(msg) => write!(f, "Template error: {}", msg),
            Self::ProviderError(msg) => write!(f, "Provider error: {}", msg),
        }
    }
}

impl std::error::Error for NotificationError {}

impl From<serde_json::Error> for NotificationError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<eyre::Report> for NotificationError {
    fn from(err: eyre::Report) -> Self {
        Self::ProviderError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_failure_classification() {
        assert!(NotificationError::ProviderError("boom".into()).is_send_failure());
        assert!(NotificationError::InvalidInput("no recipient".into()).is_send_failure());
        assert!(!NotificationError::TemplateError("bad".into()).is_send_failure());
    }

    #[test]
    fn test_display_prefixes() {
        let err = NotificationError::ProviderError("MessageRejected".into());
        assert_eq!(err.to_string(), "Provider error: MessageRejected");
    }
}
