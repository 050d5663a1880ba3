//! Agentation - UI annotation engine
//!
//! Records point-and-click feedback on a live page and renders it as
//! agent-ready markdown reports.

use agentation::app::cli::{Cli, CollectorAction, Commands, ConfigAction};
use agentation::app::config::Config;
use agentation::clipboard::{copy_with_fallback, MemoryClipboard};
use agentation::collector::client::CollectorClient;
use agentation::engine::overlay::OverlayEngine;
use agentation::host::fixture::FixturePage;
use agentation::report::generator::{Environment, ReportGenerator};
use agentation::session::marker::RecordingSession;
use agentation::session::settings::Settings;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    match cli.command {
        Commands::Demo { detail, output } => {
            run_demo(detail, output, &config)?;
        }
        Commands::Report {
            input,
            detail,
            output,
        } => {
            run_report(&input, detail, output, &config)?;
        }
        Commands::Collector { url, action } => {
            run_collector(&url, action)?;
        }
        Commands::Config { action } => {
            run_config(action, cli.config, &config)?;
        }
    }

    Ok(())
}

fn resolve_settings(config: &Config, detail: Option<String>) -> anyhow::Result<Settings> {
    let mut settings = config.settings()?;
    if let Some(detail) = detail {
        settings.output_detail = detail
            .parse()
            .map_err(agentation::Error::Config)?;
    }
    Ok(settings)
}

/// Scripted annotation session against the built-in fixture page,
/// exercising the full resolve → mark → report pipeline.
fn run_demo(
    detail: Option<String>,
    output: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    let settings = resolve_settings(config, detail)?;
    let page = FixturePage::sample();
    let mut engine = OverlayEngine::with_settings(settings.clone());

    engine.start_recording(page.introspection())?;
    info!("annotating the sample product page");

    // Product card: hover, lock, confirm, then reopen to attach intent.
    engine.pointer_moved(&page, page.introspection(), 45.0, 85.0);
    engine.clicked(&page, page.introspection(), 45.0, 85.0);
    engine.clicked(&page, page.introspection(), 45.0, 85.0);
    engine.clicked(&page, page.introspection(), 45.0, 85.0);
    engine.editor_save(1, "Card spacing feels cramped on narrow viewports");

    // Login button.
    engine.pointer_moved(&page, page.introspection(), 60.0, 220.0);
    engine.clicked(&page, page.introspection(), 60.0, 220.0);
    engine.clicked(&page, page.introspection(), 60.0, 220.0);
    engine.clicked(&page, page.introspection(), 60.0, 220.0);
    engine.editor_save(2, "Button label should say 'Sign in'");

    engine.stop_recording();

    let env = Environment::from_page(&page);
    let mut generator = ReportGenerator::new();
    let report = generator.generate(engine.session().markers(), &settings, &env, &page);
    println!("{report}");

    let mut primary = MemoryClipboard::new();
    let mut fallback = MemoryClipboard::new();
    match copy_with_fallback(&mut primary, &mut fallback, &report) {
        Ok(outcome) => {
            info!(?outcome, "report copied");
            engine.report_copied();
        }
        Err(err) => warn!(error = %err, "report copy failed"),
    }

    if let Some(path) = output {
        engine.session().save(&path)?;
        info!(path = %path.display(), "session saved");
    }

    Ok(())
}

/// Render a report from a saved session file.
fn run_report(
    input: &Path,
    detail: Option<String>,
    output: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    let settings = resolve_settings(config, detail)?;
    let session = RecordingSession::load(input)?;
    info!(
        session_id = %session.id,
        markers = session.len(),
        "rendering stored session"
    );

    // A stored session carries its node snapshots; page-level lookups
    // fall back to empty values.
    let page = FixturePage::empty();
    let env = Environment::default();
    let mut generator = ReportGenerator::new();
    let report = generator.generate(session.markers(), &settings, &env, &page);

    match output {
        Some(path) => {
            std::fs::write(&path, &report)?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{report}"),
    }

    Ok(())
}

fn run_collector(url: &str, action: CollectorAction) -> anyhow::Result<()> {
    let mut client = CollectorClient::new(url);
    match action {
        CollectorAction::Status => {
            if client.check_status() {
                println!("collector at {url}: connected");
            } else {
                let reason = client
                    .status()
                    .last_error
                    .clone()
                    .unwrap_or_else(|| "unknown error".to_string());
                println!("collector at {url}: unreachable ({reason})");
            }
        }
        CollectorAction::Annotations { session } => {
            client.connect(Some(session))?;
            let annotations = client.fetch_annotations()?;
            if annotations.is_empty() {
                println!("no annotations");
            }
            for annotation in annotations {
                println!(
                    "[{:?}] {} — {}",
                    annotation.status, annotation.target, annotation.intent
                );
            }
        }
    }
    Ok(())
}

fn run_config(
    action: ConfigAction,
    path: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(Config::default_path);
    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "config already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save(&path)?;
            info!(path = %path.display(), "config written");
        }
        ConfigAction::Show => {
            println!("{}", config.to_json()?);
        }
        ConfigAction::Validate => {
            config.validate()?;
            println!("config is valid");
        }
    }
    Ok(())
}
