//! demoreel - scripted, narrated product demos.
//!
//! Main entry point for the demoreel CLI.

mod cli;
mod cmd_narrate;
mod cmd_play;

use std::error::Error;
use std::future::Future;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use demoreel_runtime::config::expand_path;
use demoreel_runtime::{PlayOptions, PlayerConfig, PlayerError};
use demoreel_script::{ScriptLoader, Variables};

use crate::cli::{Cli, Commands};

/// Exit code when the operator cancels from a pause step.
const EXIT_CANCELLED: i32 = 130;

/// Get demoreel home directory (~/.demoreel).
fn demoreel_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".demoreel"))
        .unwrap_or_else(|| PathBuf::from(".demoreel"))
}

/// Initialize tracing with console and file output.
///
/// Log files are written to `log_dir` (default ~/.demoreel/logs) with daily rotation.
fn init_tracing(log_dir: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let log_dir = log_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| demoreel_dir().join("logs"));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("demoreel")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the file writer flushing until exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load variables from `path`, or from `env` next to it when `path` is absent.
///
/// Variables already set in the process environment win.
fn load_env_file(path: &Path) {
    let fallback = path
        .parent()
        .map(|dir| dir.join("env"))
        .unwrap_or_else(|| PathBuf::from("env"));

    for candidate in [path.to_path_buf(), fallback] {
        if !candidate.is_file() {
            continue;
        }
        match dotenvy::from_path(&candidate) {
            Ok(()) => info!("Loaded environment from {}", candidate.display()),
            Err(e) => warn!("Failed to load {}: {}", candidate.display(), e),
        }
        return;
    }
    debug!("No environment file at {}", path.display());
}

fn load_player_config(cli: &Cli) -> Result<PlayerConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = PlayerConfig::load(path)?;
            info!("Loaded player settings from {}", path.display());
            config
        }
        None => PlayerConfig::default(),
    };
    if let Some(node) = &cli.node_path {
        config.bridge.node_path = Some(expand_path(node));
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    load_env_file(&cli.env_file);
    let config = load_player_config(&cli)?;
    let loader = ScriptLoader::new(Variables::from_env());

    match cli.command {
        Commands::Play {
            script,
            headless,
            slow_mo,
            no_screenshot_on_error,
        } => {
            let options = PlayOptions {
                headless: headless.then_some(true),
                slow_mo,
                screenshot_on_error: !no_screenshot_on_error,
            };
            cmd_play::play(config, &loader, &script, options).await?;
        }
        Commands::Validate { script } => {
            cmd_play::validate(&loader, &script)?;
        }
        Commands::Narrate { script } => {
            let api_key = std::env::var("ANTHROPIC_API_KEY").ok();
            cmd_narrate::narrate(&loader, &script, api_key).await?;
        }
    }
    Ok(())
}

/// Result of a run raced against an operator interrupt.
enum Outcome {
    Finished(Result<(), Box<dyn Error>>),
    Interrupted,
}

/// Drive `run` until it finishes or `interrupt` fires, whichever comes first.
///
/// Dropping an interrupted run drops its browser session, which kills the
/// bridge process.
async fn until_interrupted<R, I>(run: R, interrupt: I) -> Outcome
where
    R: Future<Output = Result<(), Box<dyn Error>>>,
    I: Future<Output = ()>,
{
    tokio::select! {
        biased;
        result = run => Outcome::Finished(result),
        () = interrupt => Outcome::Interrupted,
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Ctrl-C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
}

fn exit_code(err: &(dyn Error + 'static)) -> i32 {
    match err.downcast_ref::<PlayerError>() {
        Some(e) if e.is_cancelled() => EXIT_CANCELLED,
        _ => 1,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_dir.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = match until_interrupted(run(cli), ctrl_c()).await {
        Outcome::Finished(result) => result,
        Outcome::Interrupted => {
            warn!("Interrupted");
            eprintln!("\n⏹  Demo interrupted");
            std::process::exit(EXIT_CANCELLED);
        }
    };

    if let Err(e) = result {
        let code = exit_code(e.as_ref());
        if code == EXIT_CANCELLED {
            warn!("{}", e);
            eprintln!("\n⏹  Demo cancelled");
        } else {
            error!("{}", e);
            eprintln!("\n❌ Error: {}", e);
        }
        // The pause prompt may still hold a blocking stdin read.
        std::process::exit(code);
    }
}
