use crate::adapters::resend::{ResendMailer, RESEND_ENDPOINT};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{validate_email, validate_non_empty_string, validate_url, Validate};
use std::env;

pub const DEFAULT_FROM: &str = "Contact Form <onboarding@resend.dev>";

/// Settings of the contact relay function, read from its environment.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub resend_api_key: String,
    pub resend_endpoint: String,
    pub from: String,
    pub to: String,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| SiteError::ConfigError {
                message: format!("{} environment variable is required", name),
            })
        };

        Ok(Self {
            resend_api_key: required("RESEND_API_KEY")?,
            to: required("CONTACT_TO")?,
            resend_endpoint: lookup("RESEND_ENDPOINT").unwrap_or_else(|| RESEND_ENDPOINT.to_string()),
            from: lookup("CONTACT_FROM").unwrap_or_else(|| DEFAULT_FROM.to_string()),
        })
    }

    pub fn mailer(&self) -> ResendMailer {
        ResendMailer::new(&self.resend_endpoint, &self.resend_api_key, &self.from, &self.to)
    }
}

impl Validate for RelayConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("RESEND_API_KEY", &self.resend_api_key)?;
        validate_url("RESEND_ENDPOINT", &self.resend_endpoint)?;
        validate_email("CONTACT_TO", &self.to)?;
        validate_non_empty_string("CONTACT_FROM", &self.from)?;

        tracing::info!("✅ Relay configuration validation passed");
        Ok(())
    }
}
