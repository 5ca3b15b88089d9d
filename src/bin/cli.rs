//! Shaneglish CLI
//!
//! Local front end for the scraper core: refresh the shared list, read it,
//! and check configuration.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use shaneglish::{
    error::Result,
    models::Config,
    pipeline::EntryManager,
    services::EntryParser,
    storage::{LocalStorage, slot_key},
};
use tokio_util::sync::CancellationToken;

/// Shaneglish - Urban Dictionary word of the day
#[derive(Parser, Debug)]
#[command(name = "shaneglish", version, about = "Urban Dictionary word of the day")]
struct Cli {
    /// Path to storage directory containing config and shared entries
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the front page and merge new entries (Ctrl-C cancels)
    Refresh,

    /// Print the stored entries, most recent first
    List {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the definition link under each entry
        #[arg(long)]
        share: bool,
    },

    /// Print the entry at the head of the list
    Today {
        /// Refresh first, reporting the outcome like the today widget
        #[arg(long)]
        refresh: bool,
    },

    /// Parse a saved copy of the front page without touching storage
    Parse {
        /// HTML file to parse
        file: PathBuf,
    },

    /// Validate configuration file
    Validate,

    /// Show storage info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    log::debug!("Loaded configuration from {}", config_path.display());

    let storage = Arc::new(LocalStorage::new(&cli.storage_dir));

    match cli.command {
        Command::Refresh => {
            let manager = EntryManager::from_config(&config, storage).await?;

            let cancel = CancellationToken::new();
            let trigger = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    trigger.cancel();
                }
            });

            log::info!("Fetching {}", config.source.url);
            let changed = manager.refresh_with_cancel(&cancel).await?;
            if changed {
                log::info!("✓ New entries stored ({} total)", manager.store().len());
            } else {
                log::info!("No new entries");
            }
        }

        Command::List { limit, share } => {
            let manager = EntryManager::from_config(&config, storage).await?;
            let entries = manager.current_entries();
            if entries.is_empty() {
                log::info!("No entries stored yet. Run 'refresh' first.");
            }

            for entry in entries.iter().take(limit.unwrap_or(usize::MAX)) {
                println!("{}", entry.format(&config.output.template));
                if share {
                    println!("    {}", manager.share_url(entry));
                }
                println!();
            }
        }

        Command::Today { refresh } => {
            let manager = EntryManager::from_config(&config, storage).await?;
            if refresh {
                let update = manager.update_widget().await;
                log::info!("Widget update: {:?}", update);
            }

            match manager.latest_entry() {
                Some(entry) => {
                    println!("{}", entry.format(&config.output.template));
                    println!("    {}", manager.share_url(&entry));
                }
                None => log::info!("No entries stored yet."),
            }
        }

        Command::Parse { file } => {
            let html = std::fs::read(&file)?;
            let parser = EntryParser::new(&config.selectors)?;
            let entries = parser.parse(&html);
            log::info!("Parsed {} entries from {}", entries.len(), file.display());

            for entry in &entries {
                println!("{}", entry.format(&config.output.template));
                println!();
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK (source, selectors and storage)");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!(
                "Config: {}",
                if config_path.exists() {
                    "exists"
                } else {
                    "not found, using defaults"
                }
            );

            let slot_path = cli.storage_dir.join(slot_key(&config.storage));
            if !slot_path.exists() {
                log::info!("No entries stored yet.");
                return Ok(());
            }

            let manager = EntryManager::from_config(&config, storage).await?;
            log::info!("Entry list: {}", manager.store().location());
            log::info!("Stored entries: {}", manager.store().len());
            if let Some(entry) = manager.latest_entry() {
                log::info!("Latest: {} ({})", entry.word, entry.date);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_args() {
        let cli = Cli::parse_from([
            "shaneglish", "-s", "/tmp/x", "list", "--limit", "3", "--share",
        ]);
        assert_eq!(cli.storage_dir, PathBuf::from("/tmp/x"));
        assert!(matches!(
            cli.command,
            Command::List {
                limit: Some(3),
                share: true
            }
        ));
    }
}
