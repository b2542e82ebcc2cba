use crate::domain::model::ContactMessage;
use crate::domain::ports::MailRelay;
use crate::utils::error::SubmissionError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_CONTACT_TIMEOUT: Duration = Duration::from_secs(15);

/// Posts contact messages to the deployed email function.
#[derive(Debug, Clone)]
pub struct HttpMailRelay {
    client: Client,
    relay_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl HttpMailRelay {
    pub fn new(relay_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            relay_url: relay_url.into(),
            api_key: None,
            timeout: Some(DEFAULT_CONTACT_TIMEOUT),
        }
    }

    /// Edge functions behind Supabase want the anon key as a bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Wait as long as the relay takes.
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }
}

#[async_trait]
impl MailRelay for HttpMailRelay {
    async fn submit(&self, message: &ContactMessage) -> Result<serde_json::Value, SubmissionError> {
        tracing::debug!("Submitting contact message to {}", self.relay_url);

        let mut request = self.client.post(&self.relay_url).json(message);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| match self.timeout {
            Some(limit) if e.is_timeout() => SubmissionError::Timeout(limit),
            _ => SubmissionError::Request(e),
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // the relay echoes the provider's JSON; anything else is kept as text
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }
}
