use crate::domain::model::Theme;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "folio")]
#[command(about = "Personal portfolio site in the terminal")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "folio.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Use this theme for this run without saving it
    #[arg(long)]
    pub theme: Option<Theme>,
}
