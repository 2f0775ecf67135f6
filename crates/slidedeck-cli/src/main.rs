use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use slidedeck_core::config::NavigationPreset;
use slidedeck_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "slidedeck")]
#[command(author, version, about = "A scroll-driven slide presenter for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file (defaults to ~/.config/slidedeck/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Deck file to present instead of the configured or bundled deck
    #[arg(short = 'd', long, global = true)]
    deck: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the presenter
    Run {
        /// Translate vertical swipes (mouse drags) into slide moves
        #[arg(long)]
        touch: bool,
    },
    /// Validate the deck and list its slides
    Slides,
    /// Score a password with the strength meter
    Password {
        text: String,
        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(deck) = cli.deck {
        config.general.deck = Some(deck);
    }

    let presenting = matches!(cli.command, Some(Commands::Run { .. }) | None);
    init_logging(&config, presenting)?;

    match cli.command {
        Some(Commands::Run { touch }) => {
            if touch {
                config.navigation.apply_preset(NavigationPreset::Touch);
            }
            commands::run::run(Arc::new(config)).await
        }
        None => commands::run::run(Arc::new(config)).await,
        Some(Commands::Slides) => commands::slides::run(&config),
        Some(Commands::Password { text, json }) => commands::password::run(&config, &text, json),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}

/// Log to stderr, or to the log file while the terminal UI owns the screen
fn init_logging(config: &AppConfig, presenting: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if presenting {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("opening log file {}", log_path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}
