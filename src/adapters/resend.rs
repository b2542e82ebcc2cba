use crate::domain::model::ContactMessage;
use crate::domain::ports::MailRelay;
use crate::utils::error::SubmissionError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Body of a Resend `POST /emails` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Turns contact messages into emails sent through the Resend API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: Client,
    endpoint: String,
    api_key: String,
    from: String,
    to: String,
}

impl ResendMailer {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn compose(&self, message: &ContactMessage) -> OutgoingEmail {
        OutgoingEmail {
            from: self.from.clone(),
            to: vec![self.to.clone()],
            subject: format!("New Message from {}", message.name.trim()),
            html: format!(
                "<p><strong>Email:</strong> {}</p><p><strong>Message:</strong> {}</p>",
                escape_html(message.email.trim()),
                escape_html(&message.message)
            ),
        }
    }
}

#[async_trait]
impl MailRelay for ResendMailer {
    async fn submit(&self, message: &ContactMessage) -> Result<serde_json::Value, SubmissionError> {
        let email = self.compose(message);
        tracing::info!("📧 Sending contact email: {}", email.subject);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!("❌ Email provider answered {}: {}", status, body);
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
