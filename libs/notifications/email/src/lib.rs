//! Loan decision email notifications
//!
//! Consumes queue batches whose records carry a JSON notification payload,
//! renders the loan decision email for each one and sends it through an
//! [`EmailProvider`].
//!
//! ## Components
//!
//! - **Batch**: `QueueBatch`, `QueueRecord`, `BatchResponse` (invocation shapes)
//! - **Models**: `NotificationRequest` (decoded, defaulted fields), `StatusColor`, `Email`
//! - **Templates**: Handlebars-based `TemplateEngine` with the `loan_decision` layout
//! - **Providers**: AWS SES and Mock
//! - **Dispatcher**: `NotificationDispatcher`, the per-batch processing loop
//!
//! ## Usage
//!
//! ```ignore
//! use email::{NotificationDispatcher, SesProvider, TemplateEngine};
//!
//! let provider = SesProvider::from_config(&ses_config).await;
//! let dispatcher = NotificationDispatcher::new(provider, TemplateEngine::new()?);
//! let response = dispatcher.handle(&batch).await?;
//! ```

pub mod batch;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod provider;
pub mod templates;

pub use batch::{BatchResponse, QueueBatch, QueueRecord};
pub use dispatcher::NotificationDispatcher;
pub use error::{NotificationError, NotificationResult};
pub use models::{Email, NotificationPayload, NotificationRequest, StatusColor};
pub use provider::{EmailProvider, MockProvider, SendResult, SesProvider};
pub use templates::{RenderedTemplate, TemplateEngine};
