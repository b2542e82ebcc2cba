pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::{RelayConfig, SiteConfig};

pub use adapters::{FilePreferenceStore, HttpMailRelay, ResendMailer, SupabaseSource};
pub use crate::core::{
    carousel::CarouselController,
    engine::{Action, SiteEngine, SiteEvent},
    project_store::{LoadPolicy, ProjectStore},
    site::SiteState,
};
pub use utils::error::{LoadError, Result, SiteError, SubmissionError};
