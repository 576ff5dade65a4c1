//! bannerkb CLI
//!
//! Command-line interface for the banner ad performance knowledge base:
//! importing spreadsheet exports, searching past performance, and managing
//! records, images, and AI tags.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

mod commands;
mod config;
mod error;
mod progress;

use commands::record::RegisterArgs;
use commands::search::FilterArgs;
use config::AppConfig;

#[derive(Parser)]
#[command(name = "bannerkb")]
#[command(about = "Banner ad performance knowledge base", long_about = None)]
struct Cli {
    /// Database file (defaults to the platform data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or refresh the reference dictionaries
    Seed,

    /// Import a CSV file, upserting by reference number
    Import {
        /// CSV file to import
        path: PathBuf,
    },

    /// Replace all records with the configured spreadsheet's contents
    Sync {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Search banners, best CTR first
    Search {
        #[command(flatten)]
        filter: FilterArgs,

        /// Emit results as JSON
        #[arg(long)]
        json: bool,

        /// Emit results as CSV
        #[arg(long)]
        csv: bool,
    },

    /// Show one banner in full
    Show {
        /// Knowledge ID or reference number
        id: String,
    },

    /// Register a banner by hand, with a local image file
    Register(RegisterArgs),

    /// Delete a banner and its appeal links
    Delete {
        /// Knowledge ID or reference number
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Point a banner at a different image URL
    SetImageUrl {
        /// Knowledge ID or reference number
        id: String,
        url: String,
    },

    /// Download Drive/Dropbox-hosted images into local media storage
    MigrateImages,

    /// Suggest classification tags for a banner's image
    Tags {
        /// Knowledge ID or reference number
        id: String,

        /// Store the suggested tags
        #[arg(long)]
        apply: bool,
    },

    /// Summarize success trends across the top CTR hits for a search
    Analyze {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List reference dictionaries or one dictionary's entries
    Dicts {
        /// Dictionary name (e.g. areas, main-appeals)
        name: Option<String>,
    },

    /// Show knowledge base counts
    Stats,

    /// Show recent import runs
    Logs {
        /// Maximum entries to show
        #[arg(short, long)]
        limit: Option<u32>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.db) {
        Ok(config) => config,
        Err(e) => return fail(e),
    };

    let result = match cli.command {
        Commands::Seed => commands::seed::run_seed(&config),
        Commands::Import { path } => commands::import::run_import(&config, path),
        Commands::Sync { yes } => commands::import::run_sync(&config, yes),
        Commands::Search { filter, json, csv } => {
            commands::search::run_search(&config, filter, json, csv)
        }
        Commands::Show { id } => commands::record::run_show(&config, id),
        Commands::Register(args) => commands::record::run_register(&config, args),
        Commands::Delete { id, yes } => commands::record::run_delete(&config, id, yes),
        Commands::SetImageUrl { id, url } => {
            commands::record::run_set_image_url(&config, id, url)
        }
        Commands::MigrateImages => commands::migrate::run_migrate_images(&config),
        Commands::Tags { id, apply } => commands::tags::run_tags(&config, id, apply),
        Commands::Analyze { filter } => commands::analyze::run_analyze(&config, filter),
        Commands::Dicts { name } => commands::dicts::run_dicts(&config, name),
        Commands::Stats => commands::stats::run_stats(&config),
        Commands::Logs { limit } => commands::stats::run_logs(&config, limit),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

fn fail(e: error::CliError) -> ExitCode {
    eprintln!(
        "{} {}",
        "error:".if_supports_color(Stderr, |t| t.red()),
        e,
    );
    ExitCode::FAILURE
}
