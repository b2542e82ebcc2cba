pub mod carousel;
pub mod engine;
pub mod project_store;
pub mod site;
pub mod theme;
pub mod view;

pub use crate::domain::model::{ContactMessage, Project, ProjectCollection, ProjectId, Theme};
pub use crate::domain::ports::{MailRelay, PreferenceStore, ProjectSource};
pub use crate::utils::error::Result;
