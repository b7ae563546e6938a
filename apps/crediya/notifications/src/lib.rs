//! Loan Notifications Function
//!
//! A Lambda function that turns loan decision events from an SQS queue into
//! emails.
//!
//! ## Architecture
//!
//! ```text
//! SQS queue (loan decisions)
//!   ↓ (Records[].body, JSON payload)
//! function_handler
//!   ↓
//! NotificationDispatcher
//!   ↓ (renders loan_decision)
//! TemplateEngine (Handlebars)
//!   ↓ (sends emails)
//! SesProvider (AWS SES v2)
//! ```
//!
//! The SES client and template engine are built once per execution
//! environment (cold start) and shared by every invocation.

use core_config::{Environment, FromEnv, SesConfig};
use email::{
    BatchResponse, EmailProvider, NotificationDispatcher, QueueBatch, SesProvider, TemplateEngine,
};
use eyre::{Result, WrapErr, eyre};
use lambda_runtime::{LambdaEvent, service_fn};
use std::sync::Arc;
use tracing::{error, info};

/// Run the notification function
///
/// 1. Sets up structured logging (JSON for production, pretty for development)
/// 2. Loads the SES sender configuration
/// 3. Builds the SES provider and template engine once
/// 4. Hands control to the Lambda runtime loop
///
/// # Errors
///
/// Returns an error if:
/// - `SES_FROM_EMAIL` is missing or invalid
/// - The template engine cannot be initialized
/// - The Lambda runtime loop fails
pub async fn run() -> Result<()> {
    let environment = Environment::from_env();
    core_config::tracing::init_tracing(&environment);

    info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "Starting loan notification function"
    );

    let ses_config = SesConfig::from_env().wrap_err("Failed to load SES configuration")?;
    info!(
        region = %ses_config.region,
        from = %ses_config.from_email,
        "SES configuration loaded"
    );

    let provider = SesProvider::from_config(&ses_config).await;
    let templates = TemplateEngine::new().wrap_err("Failed to initialize template engine")?;
    let dispatcher = Arc::new(NotificationDispatcher::new(provider, templates));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<QueueBatch>| {
        let dispatcher = Arc::clone(&dispatcher);
        async move { function_handler(event, dispatcher.as_ref()).await }
    }))
    .await
    .map_err(|e| eyre!("Lambda runtime failed: {}", e))?;

    info!("Loan notification function stopped");
    Ok(())
}

/// Handle one invocation.
///
/// A send failure is returned as an error so the platform marks the
/// invocation as failed.
pub async fn function_handler<P: EmailProvider>(
    event: LambdaEvent<QueueBatch>,
    dispatcher: &NotificationDispatcher<P>,
) -> Result<BatchResponse, lambda_runtime::Error> {
    let (batch, context) = event.into_parts();

    info!(
        request_id = %context.request_id,
        records = batch.len(),
        "Processing notification batch"
    );

    match dispatcher.handle(&batch).await {
        Ok(response) => {
            info!(
                request_id = %context.request_id,
                status_code = response.status_code,
                "Notification batch finished"
            );
            Ok(response)
        }
        Err(e) => {
            error!(
                request_id = %context.request_id,
                error = %e,
                "Notification batch aborted"
            );
            Err(e.into())
        }
    }
}
