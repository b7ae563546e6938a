use crate::{env_or_default, env_required, ConfigError, FromEnv};

/// Region the notification sender has always used
pub const DEFAULT_SES_REGION: &str = "us-east-1";

/// AWS SES sender configuration
#[derive(Clone, Debug)]
pub struct SesConfig {
    /// Region of the SES endpoint
    pub region: String,
    /// Verified sender address used for every notification
    pub from_email: String,
}

impl FromEnv for SesConfig {
    /// Reads:
    /// - SES_FROM_EMAIL: required
    /// - AWS_SES_REGION: defaults to us-east-1
    fn from_env() -> Result<Self, ConfigError> {
        let from_email = env_required("SES_FROM_EMAIL")?;
        if !from_email.contains('@') {
            return Err(ConfigError::InvalidValue {
                key: "SES_FROM_EMAIL".to_string(),
                details: format!("'{}' is not an email address", from_email),
            });
        }

        Ok(Self {
            region: env_or_default("AWS_SES_REGION", DEFAULT_SES_REGION),
            from_email,
        })
    }
}
