use crate::error::{NotificationError, NotificationResult};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Subject line of every loan decision email
pub const LOAN_DECISION_SUBJECT: &str = "Loan Request Decision";

/// Values used when a payload omits a field (or sends `null`)
pub mod defaults {
    pub const APPLICANT_NAME: &str = "Client";
    pub const APPLICATION_STATUS: &str = "Pending";
    pub const AMOUNT: &str = "$0";
    pub const TERM: &str = "N/A";
    pub const LOAN_TYPE: &str = "N/A";
}

/// Raw payload carried in a record body, before defaults are applied
///
/// Every field is optional. Scalars are kept as display text: strings
/// verbatim, numbers and booleans as their JSON text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    #[serde(default, deserialize_with = "display_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub applicant_name: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub application_id: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub application_status: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    pub loan_type: Option<String>,
}

fn display_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }))
}

/// Decoded, defaulted field set used to render one email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    /// Recipient; not validated here, the send step rejects it if unusable
    pub email: Option<String>,
    pub applicant_name: String,
    /// Rendered as-is; no default
    pub application_id: Option<String>,
    pub application_status: String,
    pub amount: String,
    /// Loan term in months (`deadline` in the payload)
    pub term: String,
    pub loan_type: String,
}

impl NotificationRequest {
    /// Decode a record body.
    ///
    /// The body must be a JSON object; anything else is a
    /// [`NotificationError::SerializationError`].
    pub fn from_json(body: &str) -> NotificationResult<Self> {
        let value: Value = serde_json::from_str(body)?;
        if !value.is_object() {
            return Err(NotificationError::SerializationError(format!(
                "expected a JSON object, found {}",
                json_kind(&value)
            )));
        }

        let payload: NotificationPayload = serde_json::from_value(value)?;
        Ok(payload.into())
    }

    pub fn status_color(&self) -> StatusColor {
        StatusColor::for_status(&self.application_status)
    }
}

impl From<NotificationPayload> for NotificationRequest {
    fn from(payload: NotificationPayload) -> Self {
        Self {
            email: payload.email,
            applicant_name: payload
                .applicant_name
                .unwrap_or_else(|| defaults::APPLICANT_NAME.to_string()),
            application_id: payload.application_id,
            application_status: payload
                .application_status
                .unwrap_or_else(|| defaults::APPLICATION_STATUS.to_string()),
            amount: payload
                .amount
                .unwrap_or_else(|| defaults::AMOUNT.to_string()),
            term: payload
                .deadline
                .unwrap_or_else(|| defaults::TERM.to_string()),
            loan_type: payload
                .loan_type
                .unwrap_or_else(|| defaults::LOAN_TYPE.to_string()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Color of the status indicator bar in the rendered email
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Red,
}

impl StatusColor {
    /// Green only for an approved application (case-insensitive)
    pub fn for_status(status: &str) -> Self {
        if status.to_lowercase() == "approved" {
            StatusColor::Green
        } else {
            StatusColor::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusColor::Green => "green",
            StatusColor::Red => "red",
        }
    }
}

impl fmt::Display for StatusColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Email message to be sent
#[derive(Debug, Clone)]
pub struct Email {
    /// Unique identifier, used to correlate logs
    pub id: String,
    /// Recipient email address
    pub to: String,
    pub subject: String,
    pub body_html: String,
}

impl Email {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body_html: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            to: to.into(),
            subject: subject.into(),
            body_html: body_html.into(),
        }
    }
}
