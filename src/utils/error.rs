use std::time::Duration;
use thiserror::Error;

/// Failure of the one-time project collection load.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("project request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("project source returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode project rows: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("project load timed out after {0:?}")]
    Timeout(Duration),

    #[error("projects were already loaded")]
    AlreadyLoaded,
}

impl LoadError {
    /// Transport failures and 5xx answers are worth another attempt; a 4xx or
    /// an undecodable table is not going to change on its own.
    pub fn is_transient(&self) -> bool {
        match self {
            LoadError::Request(_) | LoadError::Timeout(_) => true,
            LoadError::Status { status, .. } => *status >= 500,
            LoadError::Decode(_) | LoadError::AlreadyLoaded => false,
        }
    }
}

/// Failure to hand a contact message to the mail relay.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("contact relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("contact relay rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("contact relay timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Storage,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::Load(_) | SiteError::Submission(_) => ErrorCategory::Network,
            SiteError::IoError(_) | SiteError::SerializationError(_) => ErrorCategory::Storage,
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            SiteError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SiteError::ValidationError { .. } => ErrorSeverity::Low,
            SiteError::Load(e) if e.is_transient() => ErrorSeverity::Medium,
            SiteError::Submission(_) => ErrorSeverity::Medium,
            SiteError::Load(_) => ErrorSeverity::High,
            SiteError::IoError(_) | SiteError::SerializationError(_) => ErrorSeverity::High,
            SiteError::ConfigError { .. }
            | SiteError::ConfigValidationError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::Load(_) => "Projects could not be loaded right now.".to_string(),
            SiteError::Submission(_) => "Your message could not be sent.".to_string(),
            SiteError::IoError(e) => format!("A file could not be read or written: {}", e),
            SiteError::SerializationError(_) => "Stored data is corrupted.".to_string(),
            SiteError::ConfigError { message } => format!("Configuration problem: {}", message),
            SiteError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            SiteError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            SiteError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            SiteError::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the network connection and the remote endpoints in the config file",
            ErrorCategory::Configuration => "Fix the config file (see folio.example.toml) and restart",
            ErrorCategory::Storage => "Check permissions on the preferences file or delete it to start fresh",
            ErrorCategory::Input => "Fill in every field and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
