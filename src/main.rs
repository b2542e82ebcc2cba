use clap::Parser;
use folio::core::site::ContactField;
use folio::core::theme::system_theme;
use folio::core::view::render_carousel;
use folio::utils::error::ErrorSeverity;
use folio::utils::{logger, validation::Validate};
use folio::{
    Action, CliArgs, FilePreferenceStore, HttpMailRelay, ProjectStore, SiteConfig, SiteEngine,
    SiteEvent, SupabaseSource,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

type Engine = SiteEngine<SupabaseSource, HttpMailRelay, FilePreferenceStore>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    let config = match SiteConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(e.severity()));
    }

    let source = SupabaseSource::new(
        &config.projects.base_url,
        &config.projects.api_key,
        config.projects_table(),
    );
    let store = Arc::new(ProjectStore::new(source, config.load_policy()));

    let relay = HttpMailRelay::new(&config.contact.relay_url).with_api_key(&config.projects.api_key);
    let relay = match config.contact_timeout() {
        Some(timeout) => relay.with_timeout(timeout),
        None => relay.without_timeout(),
    };

    let preferences = FilePreferenceStore::new(config.preferences_path());
    let system = config.system_theme_override().unwrap_or_else(system_theme);

    let mut engine = SiteEngine::start(store, relay, preferences, system).await;
    if let Some(theme) = args.theme {
        engine.preview_theme(theme);
    }

    // the page renders right away; the carousel fills in once the load lands
    let _load = engine.spawn_load();

    print_page(&config, &engine);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = engine.settle() => match event {
                SiteEvent::ProjectsPublished => show_carousel(&engine),
                SiteEvent::SubmissionSent | SiteEvent::SubmissionFailed => {
                    if let Some(notice) = engine.state().notice() {
                        println!("{}", notice);
                    }
                    if engine.state().contact_open() {
                        prompt_next_field(&engine);
                    }
                }
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match handle_line(&mut engine, line.trim()).await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => {
                        tracing::debug!("Rejected input: {}", e);
                        println!("⚠️  {}", e.user_friendly_message());
                    }
                }
            }
        }
    }

    if engine.submissions_in_flight() > 0 {
        tracing::warn!("Leaving with {} contact message(s) still unanswered", engine.submissions_in_flight());
    }

    Ok(())
}

/// Returns `Ok(false)` when the visitor leaves.
async fn handle_line(engine: &mut Engine, line: &str) -> folio::Result<bool> {
    if engine.state().contact_open() {
        return fill_contact(engine, line).await.map(|_| true);
    }

    let mut parts = line.split_whitespace();
    match parts.next().unwrap_or("") {
        "" => {}
        "n" | "next" => {
            engine.apply(Action::NextProject).await?;
            show_carousel(engine);
        }
        "p" | "prev" | "previous" => {
            engine.apply(Action::PreviousProject).await?;
            show_carousel(engine);
        }
        "t" | "theme" => {
            engine.apply(Action::ToggleTheme).await?;
            println!("Theme: {}", engine.state().theme());
        }
        "s" | "scroll" => {
            let offset = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0);
            engine.apply(Action::Scroll(offset)).await?;
            println!("Navigation: {}", if engine.state().scrolled() { "compact" } else { "full" });
        }
        "c" | "contact" => {
            engine.apply(Action::OpenContact).await?;
            println!("Let's talk! I'm currently open to new opportunities. (:cancel to close)");
            prompt_next_field(engine);
        }
        "show" => show_carousel(engine),
        "h" | "help" => print_help(),
        "q" | "quit" | "exit" => return Ok(false),
        other => println!("Unknown command '{}', try 'help'", other),
    }
    Ok(true)
}

async fn fill_contact(engine: &mut Engine, line: &str) -> folio::Result<()> {
    if line == ":cancel" {
        return engine.apply(Action::CloseContact).await;
    }

    if let Some(field) = engine.state().form().next_blank() {
        engine.apply(Action::Edit(field, line.to_string())).await?;
    }

    if engine.state().form().next_blank().is_some() {
        prompt_next_field(engine);
        return Ok(());
    }

    // the relay answers later through `settle`, so this is the email check
    if let Err(e) = engine.apply(Action::Submit).await {
        println!("⚠️  {}", e.user_friendly_message());
        engine.apply(Action::Edit(ContactField::Email, String::new())).await?;
        prompt_next_field(engine);
        return Ok(());
    }
    println!("Sending...");
    Ok(())
}

fn prompt_next_field(engine: &Engine) {
    match engine.state().form().next_blank() {
        Some(field) => println!("{}:", field.label()),
        None => println!("Press enter to send it my way, or :cancel"),
    }
}

fn show_carousel(engine: &Engine) {
    print!("{}", render_carousel(&engine.carousel_view(), engine.state().theme()));
}

fn print_page(config: &SiteConfig, engine: &Engine) {
    println!("== {} ==  [{}]", config.site.owner, engine.state().theme());
    if let Some(tagline) = &config.site.tagline {
        println!("{}", tagline);
    }
    for link in config.social_links() {
        println!("  {}: {}", link.label, link.href);
    }

    if let Some(skills) = &config.site.skills {
        println!("\nWhat I Do");
        for skill in skills {
            println!("  * {}: {}", skill.title, skill.description);
        }
    }

    println!("\nFeatured Work");
    show_carousel(engine);
}

fn print_help() {
    println!("Commands: next | prev | theme | scroll <px> | contact | show | quit");
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
