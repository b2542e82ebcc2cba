#[cfg(feature = "cli")]
pub mod cli;
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliArgs;
pub use lambda::RelayConfig;
pub use toml_config::SiteConfig;
