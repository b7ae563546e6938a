//! NotificationDispatcher - processes one queue batch
//!
//! Records are handled one at a time, in input order. Two gates apply:
//! - batch level: no records at all yields the 400 response, nothing is sent;
//! - record level: a missing/empty body or a body that is not a JSON object
//!   is logged and skipped.
//!
//! A send failure (including a record without a recipient) is returned as
//! an error and stops the batch: records after it are never processed.

use crate::batch::{BatchResponse, QueueBatch, QueueRecord};
use crate::error::{NotificationError, NotificationResult};
use crate::models::{Email, NotificationRequest};
use crate::provider::{EmailProvider, SendResult};
use crate::templates::TemplateEngine;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Dispatches loan decision emails for queue batches
pub struct NotificationDispatcher<P: EmailProvider> {
    provider: Arc<P>,
    templates: Arc<TemplateEngine>,
}

impl<P: EmailProvider> NotificationDispatcher<P> {
    /// Create a new dispatcher.
    ///
    /// The provider is acquired once here and reused for every record of
    /// every batch handled by this dispatcher.
    pub fn new(provider: P, templates: TemplateEngine) -> Self {
        Self {
            provider: Arc::new(provider),
            templates: Arc::new(templates),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Process one batch.
    ///
    /// Returns the 400 response for an empty batch, otherwise the 200
    /// response once every record has been sent or skipped.
    #[instrument(skip_all, fields(records = batch.len(), provider = self.provider.name()))]
    pub async fn handle(&self, batch: &QueueBatch) -> NotificationResult<BatchResponse> {
        if batch.is_empty() {
            warn!("No records found in the event");
            return Ok(BatchResponse::no_records());
        }

        let requests = batch.records.iter().filter_map(Self::decode_record);

        let mut sent = 0usize;
        for request in requests {
            self.dispatch(&request).await?;
            sent += 1;
        }

        info!(sent, skipped = batch.len() - sent, "Batch processed");

        Ok(BatchResponse::email_sent())
    }

    /// Decode one record, or `None` if it must be skipped
    pub fn decode_record(record: &QueueRecord) -> Option<NotificationRequest> {
        let message_id = record.message_id.as_deref().unwrap_or("-");

        let Some(body) = record.body() else {
            warn!(message_id, "No body found in record, skipping");
            return None;
        };

        match NotificationRequest::from_json(body) {
            Ok(request) => Some(request),
            Err(e) => {
                warn!(
                    message_id,
                    error = %e,
                    body,
                    "Body is not a valid notification payload, skipping"
                );
                None
            }
        }
    }

    /// Render and send the email for one decoded request
    pub async fn dispatch(&self, request: &NotificationRequest) -> NotificationResult<SendResult> {
        let status_color = request.status_color();

        let rendered = self
            .templates
            .render_loan_decision(request, status_color)
            .map_err(|e| NotificationError::TemplateError(e.to_string()))?;

        let to = request
            .email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| {
                NotificationError::InvalidInput("notification has no recipient email".to_string())
            })?;

        let email = Email::new(to, rendered.subject, rendered.body_html);

        debug!(
            email_id = %email.id,
            to = %email.to,
            status = %request.application_status,
            status_color = %status_color,
            "Sending loan decision email"
        );

        let result = self.provider.send(&email).await?;

        info!(
            email_id = %email.id,
            message_id = %result.message_id,
            to = %email.to,
            "Email sent successfully"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;

    fn dispatcher(provider: MockProvider) -> NotificationDispatcher<MockProvider> {
        NotificationDispatcher::new(provider, TemplateEngine::new().unwrap())
    }

    #[test]
    fn test_decode_record_skips_missing_body() {
        let record = QueueRecord {
            message_id: Some("m-1".into()),
            body: None,
        };
        assert!(NotificationDispatcher::<MockProvider>::decode_record(&record).is_none());
    }

    #[test]
    fn test_decode_record_skips_invalid_json() {
        let record = QueueRecord {
            message_id: None,
            body: Some("not-json".into()),
        };
        assert!(NotificationDispatcher::<MockProvider>::decode_record(&record).is_none());
    }

    #[test]
    fn test_decode_record_accepts_object() {
        let record = QueueRecord {
            message_id: None,
            body: Some(r#"{"email":"ana@example.com","applicationStatus":"Approved"}"#.into()),
        };
        let request = NotificationDispatcher::<MockProvider>::decode_record(&record).unwrap();
        assert_eq!(request.application_status, "Approved");
    }

    #[tokio::test]
    async fn test_dispatch_requires_recipient() {
        let dispatcher = dispatcher(MockProvider::new());
        let request = NotificationRequest::from_json(r#"{"email": "  "}"#).unwrap();

        let err = dispatcher.dispatch(&request).await.unwrap_err();
        assert!(matches!(err, NotificationError::InvalidInput(_)));
        assert_eq!(dispatcher.provider().sent_count().await, 0);
    }

    #[tokio::test]
    async fn test_dispatch_maps_provider_errors() {
        let dispatcher = dispatcher(MockProvider::failing("Throttling"));
        let request = NotificationRequest::from_json(r#"{"email":"ana@example.com"}"#).unwrap();

        let err = dispatcher.dispatch(&request).await.unwrap_err();
        assert!(matches!(err, NotificationError::ProviderError(ref m) if m.contains("Throttling")));
    }

    #[tokio::test]
    async fn test_dispatch_builds_email() {
        let dispatcher = dispatcher(MockProvider::new());
        let request =
            NotificationRequest::from_json(r#"{"email":"ana@example.com","applicantName":"Ana"}"#)
                .unwrap();

        dispatcher.dispatch(&request).await.unwrap();

        let sent = dispatcher.provider().sent_emails().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "ana@example.com");
        assert_eq!(sent[0].subject, "Loan Request Decision");
        assert!(sent[0].body_html.contains("Hello Ana,"));
    }
}
