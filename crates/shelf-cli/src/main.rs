//! SHELF CLI
//!
//! Command-line interface for SHELF - browse a book catalog by title,
//! author and genre.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use shelf_core::{Catalog, Config, FilterCriteria, Selection, Theme};

mod commands;
mod output;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "SHELF - Browse a book catalog from the terminal")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Catalog file to browse instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Config file to use instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Theme to start with (day or night)
    #[arg(long, global = true)]
    theme: Option<Theme>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// List books matching a title, author and genre
    #[command(alias = "ls")]
    List {
        /// Case-insensitive title substring
        #[arg(short, long, default_value = "")]
        title: String,
        /// Author id, or "any"
        #[arg(short, long, default_value = "any")]
        author: Selection,
        /// Genre id, or "any"
        #[arg(short, long, default_value = "any")]
        genre: Selection,
        /// Number of pages to reveal
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Search titles and author names
    Search {
        /// Search query
        query: String,
        /// Number of pages to reveal
        #[arg(short, long, default_value_t = 1)]
        pages: usize,
    },
    /// Show book details
    Show {
        /// Book id
        id: String,
    },
    /// List all authors
    Authors,
    /// List all genres
    Genres,
    /// Check the catalog for dangling author and genre references
    Check,
    /// Show theme color tokens
    Theme {
        /// Theme to show (defaults to the configured one)
        #[arg(value_name = "THEME")]
        name: Option<Theme>,
        /// Show the opposite theme
        #[arg(long)]
        toggle: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, catalog_path, page_size, theme, log_file)
        key: String,
        /// Configuration value ("none" clears optional keys)
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let is_tui = matches!(&cli.command, Some(Commands::Tui) | None);

    // TUI logs to a file; everything else logs to stderr
    if !is_tui {
        init_cli_logging();
    }

    // Commands that don't need the catalog
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let mut config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    if let Some(Commands::Theme { name, toggle }) = &cli.command {
        return commands::theme::show(config.theme, *name, *toggle, &output);
    }

    let tui_log_level = if is_tui {
        std::env::var("SHELF_LOG").ok()
    } else {
        None
    };
    let catalog = open_catalog(&config, tui_log_level.as_deref())?;

    match cli.command {
        None | Some(Commands::Tui) => tui::run(&config, &catalog),
        Some(Commands::List {
            title,
            author,
            genre,
            pages,
        }) => {
            let criteria = FilterCriteria::any()
                .with_title(title)
                .with_author(author)
                .with_genre(genre);
            commands::book::list(&catalog, criteria, pages, &output)
        }
        Some(Commands::Search { query, pages }) => {
            commands::book::search(&catalog, query, pages, &output)
        }
        Some(Commands::Show { id }) => commands::book::show(&catalog, id, &output),
        Some(Commands::Authors) => commands::catalog::authors(&catalog, &output),
        Some(Commands::Genres) => commands::catalog::genres(&catalog, &output),
        Some(Commands::Check) => commands::catalog::check(&catalog, &output),
        Some(Commands::Theme { .. }) | Some(Commands::Config { .. }) => Ok(()), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// Open the configured catalog
///
/// With a TUI log level, file logging starts first so warnings raised while
/// loading end up in the log file.
fn open_catalog(config: &Config, tui_log_level: Option<&str>) -> Result<Catalog> {
    if let Some(level) = tui_log_level {
        tui::init_logging(config, level);
    }
    let catalog = config.open_catalog()?;
    debug!("Opened catalog {} ({} books)", config.catalog_source(), catalog.len());
    Ok(catalog)
}

/// Initialize stderr logging for one-shot commands
///
/// Only initializes if SHELF_LOG environment variable is set.
fn init_cli_logging() {
    let Ok(log_level) = std::env::var("SHELF_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!("shelf_core={},shelf_cli={}", log_level, log_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
