//! Invocation payload and response shapes.
//!
//! Only the parts of an SQS event the dispatcher reads are modelled; other
//! record attributes are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Message returned when an invocation carries no records
pub const NO_RECORDS_MESSAGE: &str = "No Records found in the event";
/// Message returned once every record has been processed
pub const EMAIL_SENT_MESSAGE: &str = "Email sent";

/// One invocation batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueBatch {
    /// A missing or `null` `Records` key is an empty batch
    #[serde(rename = "Records", default, deserialize_with = "null_as_empty")]
    pub records: Vec<QueueRecord>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<QueueRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<QueueRecord>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl QueueBatch {
    /// Build a batch from raw record bodies (local tooling and tests)
    pub fn from_bodies<I, S>(bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            records: bodies
                .into_iter()
                .map(|body| QueueRecord {
                    message_id: None,
                    body: Some(body.into()),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// One queue message
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Raw JSON-encoded notification payload
    #[serde(default)]
    pub body: Option<String>,
}

impl QueueRecord {
    /// Body text, or `None` when absent or empty
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}

/// Response returned to the invoking platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    pub status_code: u16,
    /// JSON-encoded message string
    pub body: String,
}

impl BatchResponse {
    /// Build a response whose body is `message` encoded as a JSON string
    pub fn with_message(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: serde_json::Value::String(message.to_string()).to_string(),
        }
    }

    /// 400: the invocation carried no records
    pub fn no_records() -> Self {
        Self::with_message(400, NO_RECORDS_MESSAGE)
    }

    /// 200: every record was processed
    pub fn email_sent() -> Self {
        Self::with_message(200, EMAIL_SENT_MESSAGE)
    }
}
