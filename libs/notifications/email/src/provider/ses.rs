//! AWS SES (Simple Email Service) provider
//!
//! Sends emails via the AWS SES v2 API.
//!
//! ## Configuration
//!
//! Credentials come from the standard AWS SDK chain (Lambda execution role,
//! environment variables, shared credentials file). Sender and region come
//! from [`SesConfig`]:
//! - `SES_FROM_EMAIL` - verified sender address (required)
//! - `AWS_SES_REGION` - SES region (default `us-east-1`)

use crate::models::Email;
use crate::provider::{EmailProvider, SendResult};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sesv2::error::DisplayErrorContext;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client;
use core_config::SesConfig;
use eyre::{eyre, Result, WrapErr};
use tracing::{debug, error};

const CHARSET: &str = "UTF-8";

/// AWS SES email provider
///
/// Holds one SDK client; build it once and reuse it for every record.
pub struct SesProvider {
    client: Client,
    from_email: String,
}

impl SesProvider {
    /// Create a new SesProvider with an existing AWS SES client
    pub fn new(client: Client, from_email: impl Into<String>) -> Self {
        Self {
            client,
            from_email: from_email.into(),
        }
    }

    /// Create from [`SesConfig`] and the default AWS credential chain
    pub async fn from_config(config: &SesConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        Self::new(Client::new(&sdk_config), config.from_email.clone())
    }

    pub fn from_email(&self) -> &str {
        &self.from_email
    }

    fn content(data: &str) -> Result<Content> {
        Content::builder()
            .data(data)
            .charset(CHARSET)
            .build()
            .wrap_err("Failed to build SES content")
    }
}

#[async_trait]
impl EmailProvider for SesProvider {
    async fn send(&self, email: &Email) -> Result<SendResult> {
        let destination = Destination::builder().to_addresses(&email.to).build();

        let message = Message::builder()
            .subject(Self::content(&email.subject)?)
            .body(Body::builder().html(Self::content(&email.body_html)?).build())
            .build();

        let content = EmailContent::builder().simple(message).build();

        debug!(
            email_id = %email.id,
            to = %email.to,
            subject = %email.subject,
            from = %self.from_email,
            "Sending email via AWS SES"
        );

        let response = self
            .client
            .send_email()
            .from_email_address(&self.from_email)
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(|e| {
                let details = DisplayErrorContext(&e);
                error!(email_id = %email.id, error = %details, "AWS SES send failed");
                eyre!("SES error: {}", details)
            })?;

        let message_id = response.message_id().unwrap_or(&email.id).to_string();

        debug!(
            email_id = %email.id,
            message_id = %message_id,
            "Email accepted by AWS SES"
        );

        Ok(SendResult { message_id })
    }

    fn name(&self) -> &'static str {
        "aws-ses"
    }
}
