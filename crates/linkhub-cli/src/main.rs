//! LinkHub CLI
//!
//! Runs the HTTP server and gives local access to the link store.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use linkhub_core::{Config, LinkQuery, NewLink, Store};

mod commands;
mod output;
mod server;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "linkhub")]
#[command(about = "LinkHub - a small searchable link directory")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to config file
    #[arg(long = "config", global = true)]
    config_path: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Manage links
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// List all categories
    Categories,
    /// Show configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum LinkCommands {
    /// Add a new link
    #[command(alias = "create")]
    Add {
        /// Display title
        title: String,
        /// URL (https:// is added when no scheme is given)
        url: String,
        /// Category
        #[arg(short, long, default_value = "")]
        category: String,
        /// Notes
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// List links
    #[command(alias = "ls")]
    List {
        /// Search title, notes and URL
        #[arg(short = 'Q', long, default_value = "")]
        query: String,
        /// Filter by category
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// Show link details
    Show {
        /// Link ID
        id: u64,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID
        id: u64,
    },
    /// Search links
    Search {
        /// Search query
        query: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config display doesn't need the store
    if let Commands::Config { command } = &cli.command {
        return match command {
            Some(ConfigCommands::Show) | None => {
                commands::config::show(cli.config_path.as_ref(), &output)
            }
        };
    }

    let mut config = Config::load_with_cli_override(cli.config_path.as_ref())
        .context("Failed to load configuration")?;

    if let Commands::Serve { bind } = cli.command {
        if let Some(bind) = bind {
            config.bind = bind;
        }
        init_logging(&config, "linkhub_core=info,linkhub_cli=info,tower_http=info");
        return server::serve(config).await;
    }

    init_logging(&config, "warn");
    let store = Store::open_with_config(config);

    match cli.command {
        Commands::Link { command } => handle_link_command(command, &store, &output),
        Commands::Categories => commands::category::list(&store, &output),
        Commands::Serve { .. } | Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_link_command(command: LinkCommands, store: &Store, output: &Output) -> Result<()> {
    match command {
        LinkCommands::Add {
            title,
            url,
            category,
            notes,
        } => {
            let new = NewLink::new(title, url).category(category).notes(notes);
            commands::link::add(store, new, output)
        }
        LinkCommands::List { query, category } => {
            let query = LinkQuery::new().text(query).category(category);
            commands::link::list(store, query, output)
        }
        LinkCommands::Show { id } => commands::link::show(store, id, output),
        LinkCommands::Delete { id } => commands::link::delete(store, id, output),
        LinkCommands::Search { query } => commands::link::search(store, query, output),
    }
}

/// Initialize logging
///
/// The filter comes from LINKHUB_LOG, falling back to `default_filter`.
/// Logs go to `config.log_file` when set, otherwise stderr.
fn init_logging(config: &Config, default_filter: &str) {
    let env_filter = EnvFilter::try_from_env("LINKHUB_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    if let Some(log_path) = &config.log_file {
        match File::create(log_path) {
            Ok(file) => {
                // Ignore error if already initialized
                let _ = tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .try_init();
                return;
            }
            Err(e) => {
                eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            }
        }
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
