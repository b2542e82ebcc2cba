use crate::domain::model::{ContactMessage, Project};
use crate::utils::error::{LoadError, Result, SubmissionError};
use async_trait::async_trait;

/// Where the project rows come from.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch_all(&self) -> std::result::Result<Vec<Project>, LoadError>;
}

/// Forwards a contact message to whatever sends the email.
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn submit(&self, message: &ContactMessage) -> std::result::Result<serde_json::Value, SubmissionError>;
}

/// Small string key-value store that outlives the process.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}
