use crate::domain::model::ContactMessage;
use crate::utils::error::{Result, SiteError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};

/// The part of a Function URL / API Gateway (payload 2.0) request the relay
/// reads. Everything else in the envelope is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HttpEnvelope {
    body: Option<String>,
    #[serde(default)]
    is_base64_encoded: bool,
}

/// How the relay function was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Invoked through the SDK with the form as the whole payload.
    Direct,
    /// Reached over HTTPS; the form is the JSON request body.
    Http,
}

impl Transport {
    pub fn of(payload: &Value) -> Self {
        if payload.get("requestContext").is_some() || payload.get("body").is_some() {
            Transport::Http
        } else {
            Transport::Direct
        }
    }

    pub fn decode(self, payload: Value) -> Result<ContactMessage> {
        match self {
            Transport::Direct => Ok(serde_json::from_value(payload)?),
            Transport::Http => {
                let envelope: HttpEnvelope = serde_json::from_value(payload)?;
                let body = envelope.body.ok_or_else(|| SiteError::ValidationError {
                    message: "request has no body".to_string(),
                })?;

                let raw = if envelope.is_base64_encoded {
                    STANDARD
                        .decode(body.as_bytes())
                        .map_err(|e| SiteError::ValidationError {
                            message: format!("request body is not valid base64: {}", e),
                        })?
                } else {
                    body.into_bytes()
                };

                Ok(serde_json::from_slice(&raw)?)
            }
        }
    }

    /// Wrap `body` the way the caller expects it back.
    pub fn respond(self, status: u16, body: Value) -> Value {
        match self {
            Transport::Direct => body,
            Transport::Http => json!({
                "statusCode": status,
                "headers": { "Content-Type": "application/json" },
                "body": body.to_string(),
            }),
        }
    }

    /// HTTP status for a failed relay attempt.
    pub fn status_for(error: &SiteError) -> u16 {
        match error {
            SiteError::ValidationError { .. } | SiteError::SerializationError(_) => 400,
            _ => 502,
        }
    }
}
