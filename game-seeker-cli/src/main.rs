//! game-seeker CLI
//!
//! Command-line interface for searching the IGDB game database, fetching
//! random games, and exporting collected results to a spreadsheet file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod connect;

#[derive(Parser)]
#[command(name = "game-seeker")]
#[command(about = "Search the IGDB game database and export results", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search games by title, optionally narrowed to genres
    Search {
        /// Game title to search for
        #[arg(short, long)]
        title: Option<String>,

        /// Genre names to narrow the results (e.g., Adventure,Shooter)
        #[arg(short, long, value_delimiter = ',')]
        genres: Option<Vec<String>>,

        /// Write the collected results to this CSV file after searching
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Run an interactive session: repeated searches share one
        /// deduplication ledger and can be saved or reset at any point
        #[arg(short, long)]
        interactive: bool,
    },

    /// Fetch and display one uniformly random game
    Random,

    /// List all genres known to IGDB
    Genres,

    /// List all platforms known to IGDB
    Platforms,

    /// Manage IGDB credentials configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current credentials and their sources
    Show,

    /// Interactively set up credentials
    Setup,

    /// Print the config file path
    Path,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_show(),
            ConfigAction::Setup => commands::config::run_setup(),
            ConfigAction::Path => commands::config::run_path(),
        },
        command => run_online(command),
    }
}

/// Commands that talk to IGDB: build the runtime, connect once, dispatch.
fn run_online(command: Commands) {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");

    rt.block_on(async {
        let Some((client, tables)) = connect::connect().await else {
            std::process::exit(1);
        };

        match command {
            Commands::Search {
                title,
                genres,
                out,
                interactive,
            } => {
                if interactive {
                    commands::search::run_interactive(&client, &tables).await;
                } else {
                    commands::search::run_once(&client, &tables, title, genres, out).await;
                }
            }
            Commands::Random => commands::random::run(&client, &tables).await,
            Commands::Genres => commands::tables::run_genres(&tables),
            Commands::Platforms => commands::tables::run_platforms(&tables),
            Commands::Config { .. } => unreachable!("handled before connecting"),
        }
    });
}
