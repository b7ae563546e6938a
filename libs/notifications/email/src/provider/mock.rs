//! Mock email provider for testing

use super::{EmailProvider, SendResult};
use crate::models::Email;
use async_trait::async_trait;
use eyre::Result;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
enum FailureMode {
    Never,
    Always(String),
    Recipient(String),
}

/// Mock email provider that captures sent emails
#[derive(Clone)]
pub struct MockProvider {
    sent_emails: Arc<Mutex<Vec<Email>>>,
    failure: FailureMode,
}

impl MockProvider {
    /// Create a new mock provider
    pub fn new() -> Self {
        Self {
            sent_emails: Arc::new(Mutex::new(Vec::new())),
            failure: FailureMode::Never,
        }
    }

    /// Create a mock provider that always fails
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: FailureMode::Always(message.into()),
            ..Self::new()
        }
    }

    /// Create a mock provider that rejects one recipient and accepts the rest
    pub fn rejecting(recipient: impl Into<String>) -> Self {
        Self {
            failure: FailureMode::Recipient(recipient.into()),
            ..Self::new()
        }
    }

    /// Get all sent emails, in send order
    pub async fn sent_emails(&self) -> Vec<Email> {
        self.sent_emails.lock().await.clone()
    }

    /// Get the count of sent emails
    pub async fn sent_count(&self) -> usize {
        self.sent_emails.lock().await.len()
    }

    /// Check if an email was sent to a specific address
    pub async fn was_sent_to(&self, email: &str) -> bool {
        self.sent_emails
            .lock()
            .await
            .iter()
            .any(|e| e.to == email)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailProvider for MockProvider {
    async fn send(&self, email: &Email) -> Result<SendResult> {
        match &self.failure {
            FailureMode::Always(message) => return Err(eyre::eyre!("{}", message)),
            FailureMode::Recipient(rejected) if *rejected == email.to => {
                return Err(eyre::eyre!("MessageRejected: {}", email.to));
            }
            _ => {}
        }

        self.sent_emails.lock().await.push(email.clone());

        Ok(SendResult {
            message_id: format!("mock-{}", email.id),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(to: &str) -> Email {
        Email::new(to, "Loan Request Decision", "<p>body</p>")
    }

    #[tokio::test]
    async fn test_mock_provider_sends_email() {
        let provider = MockProvider::new();

        let result = provider.send(&email("test@example.com")).await.unwrap();
        assert!(result.message_id.starts_with("mock-"));

        let sent = provider.sent_emails().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "test@example.com");
    }

    #[tokio::test]
    async fn test_mock_provider_fails() {
        let provider = MockProvider::failing("Simulated failure");

        let result = provider.send(&email("test@example.com")).await;
        assert!(result.unwrap_err().to_string().contains("Simulated failure"));
        assert_eq!(provider.sent_count().await, 0);
    }

    #[tokio::test]
    async fn test_mock_provider_rejects_one_recipient() {
        let provider = MockProvider::rejecting("bad@example.com");

        assert!(provider.send(&email("good@example.com")).await.is_ok());
        assert!(provider.send(&email("bad@example.com")).await.is_err());

        assert!(provider.was_sent_to("good@example.com").await);
        assert!(!provider.was_sent_to("bad@example.com").await);
    }

    #[tokio::test]
    async fn test_clones_share_captured_emails() {
        let provider = MockProvider::new();
        let handle = provider.clone();

        provider.send(&email("a@example.com")).await.unwrap();
        assert_eq!(handle.sent_count().await, 1);
    }
}
