//! Marketplace CLI - browse, search and shop in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{account, catalog, demo, doctor, import, logs, shop, status};

/// Marketplace - browse, search and shop in your terminal
#[derive(Parser)]
#[command(name = "mkt", version, about, long_about = None)]
struct Cli {
    /// Defaults to the interactive shop when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive Login, Register and Marketplace screens
    Shop,

    /// Register a new user
    Register {
        /// Username (prompted if omitted)
        #[arg(long, short)]
        username: Option<String>,
        /// Password (prompted if omitted)
        #[arg(long, short)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a username and password
    Login {
        /// Username (prompted if omitted)
        #[arg(long, short)]
        username: Option<String>,
        /// Password (prompted if omitted)
        #[arg(long, short)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List product categories
    Categories {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List products, optionally for one category
    Products {
        /// Only show products in this category
        #[arg(long, short)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search products by name
    Search {
        /// Case-insensitive part of the product name
        keyword: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage products
    Product {
        #[command(subcommand)]
        command: catalog::ProductCommands,
    },

    /// Import products from a JSON, NDJSON or CSV file
    Import {
        /// Path to the file
        file: PathBuf,
        /// Preview without importing
        #[arg(long)]
        preview: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add the demo catalog and demo account to the current database
    Seed {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show catalog status and summary
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run database health checks
    Doctor {
        /// Show verbose output
        #[arg(long, short)]
        verbose: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Shop) {
        Commands::Shop => shop::run(),
        Commands::Register { username, password, json } => account::register(username, password, json),
        Commands::Login { username, password, json } => account::login(username, password, json),
        Commands::Categories { json } => catalog::categories(json),
        Commands::Products { category, json } => catalog::products(category.as_deref(), json),
        Commands::Search { keyword, json } => catalog::search(&keyword, json),
        Commands::Product { command } => catalog::run(command),
        Commands::Import { file, preview, json } => import::run(&file, preview, json),
        Commands::Seed { json } => demo::seed(json),
        Commands::Status { json } => status::run(json),
        Commands::Doctor { verbose, json } => doctor::run(verbose, json),
        Commands::Demo { command } => demo::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
