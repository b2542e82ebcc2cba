use anyhow::Context;
use clap::Parser;
use folio::core::view::{render_carousel, CarouselView, ProjectCard};
use folio::utils::{logger, validation::Validate};
use folio::{ProjectStore, SiteConfig, SupabaseSource};

#[derive(Parser)]
#[command(name = "render-projects")]
#[command(about = "Load the projects table once and print every card")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Print the raw rows as JSON instead of cards
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let config = SiteConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let source = SupabaseSource::new(
        &config.projects.base_url,
        &config.projects.api_key,
        config.projects_table(),
    );
    let store = ProjectStore::new(source, config.load_policy());

    if let Err(e) = store.load().await {
        eprintln!("❌ Projects could not be loaded: {}", e);
        std::process::exit(2);
    }

    let collection = store.current();
    if args.json {
        let rows: Vec<_> = collection.iter().collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if collection.is_empty() {
        print!("{}", render_carousel(&CarouselView::Loading, Default::default()));
        return Ok(());
    }

    for (position, project) in collection.iter().enumerate() {
        let card = ProjectCard::new(project, position, collection.len());
        println!("{}", render_carousel(&CarouselView::Showing(card), Default::default()));
    }

    if let Some(at) = store.loaded_at() {
        tracing::info!("📁 {} projects loaded at {}", collection.len(), at.to_rfc3339());
    }

    Ok(())
}
