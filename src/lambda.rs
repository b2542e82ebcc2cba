#[cfg(feature = "lambda")]
use folio::adapters::http_event::Transport;
#[cfg(feature = "lambda")]
use folio::config::lambda::RelayConfig;
#[cfg(feature = "lambda")]
use folio::core::{ContactMessage, MailRelay};
#[cfg(feature = "lambda")]
use folio::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use folio::{ResendMailer, SiteError};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
async fn relay(mailer: &ResendMailer, message: ContactMessage) -> Result<serde_json::Value, SiteError> {
    tracing::info!("Relaying contact message from {}", message.name);

    // validate before spending an API call on an obviously bad payload
    if message.name.trim().is_empty() || message.message.trim().is_empty() {
        return Err(SiteError::ValidationError {
            message: "name and message are required".to_string(),
        });
    }
    folio::utils::validation::validate_email("email", &message.email)?;

    let receipt = mailer.submit(&message).await?;
    tracing::info!("Contact message relayed");
    Ok(receipt)
}

/// Serves both a direct invoke (the form is the payload) and a Function URL
/// request (the form is the JSON body of an HTTP envelope).
#[cfg(feature = "lambda")]
async fn function_handler(
    mailer: &ResendMailer,
    event: LambdaEvent<serde_json::Value>,
) -> Result<serde_json::Value, Error> {
    let transport = Transport::of(&event.payload);
    let outcome = match transport.decode(event.payload) {
        Ok(message) => relay(mailer, message).await,
        Err(e) => Err(e),
    };

    match (outcome, transport) {
        (Ok(receipt), _) => Ok(transport.respond(200, receipt)),
        (Err(e), Transport::Http) => {
            tracing::error!("❌ Contact relay failed: {}", e);
            let body = serde_json::json!({ "error": e.user_friendly_message() });
            Ok(transport.respond(Transport::status_for(&e), body))
        }
        (Err(e), Transport::Direct) => Err(e.into()),
    }
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = RelayConfig::from_env().map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let mailer = config.mailer();
    let mailer = &mailer;
    run(service_fn(move |event| function_handler(mailer, event))).await
}
