#![cfg_attr(not(test), forbid(unsafe_code))]

//! Main entry point for the Gaun Roots CLI.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use shared::config::client::ClientConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod context;
mod session_store;

use commands::{
    account::{CreditsCommand, FriendsCommand},
    alerts::AlertsCommand,
    products::ProductsCommand,
};
use context::AppContext;

/// Gaun Roots CLI
#[derive(Parser)]
#[command(name = "gaunroots")]
#[command(about = "Command-line client for the Gaun Roots marketplace and alert service", long_about = None)]
struct Cli {
    /// Path to a configuration file (YAML or JSON)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Backend API base URL, e.g. http://localhost:8000/api
    #[arg(long, short, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the Gaun Roots CLI
#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in as it
    Register {
        #[arg(long, short)]
        name: String,
        /// Account type: buyer or seller
        #[arg(long = "type", short = 't', default_value = "buyer")]
        kind: shared::UserKind,
    },
    /// Log in to an existing account
    Login {
        #[arg(long, short)]
        name: String,
        /// Account type: buyer or seller
        #[arg(long = "type", short = 't', default_value = "buyer")]
        kind: shared::UserKind,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session
    Whoami,
    /// Fetch a user record (defaults to the logged-in user)
    User {
        id: Option<String>,
    },
    /// Manage credits of the logged-in user
    #[command(subcommand)]
    Credits(CreditsCommand),
    /// Manage friends of the logged-in user
    #[command(subcommand)]
    Friends(FriendsCommand),
    /// Browse and manage marketplace listings
    #[command(subcommand)]
    Products(ProductsCommand),
    /// Disease alert subscriptions and reports
    #[command(subcommand)]
    Alerts(AlertsCommand),
    /// Run the plant disease detector on an image
    Scan {
        /// Path to a PNG, JPEG, WebP or GIF image
        image: PathBuf,
    },
    /// Generate shell completion scripts for the CLI
    Completion {
        /// The shell to generate the completion script for
        #[arg(long, short = 'S', value_enum)]
        shell: Shell,
    },
    /// Generate a configuration file
    Config {
        /// Format of the configuration file to generate (yaml or json). Defaults to yaml.
        #[arg(long, short)]
        format: Option<String>,
        /// Where to write the file; `config.<format>` in the working directory by default
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // Neither needs a loadable configuration.
    match cli.command {
        Commands::Completion { shell } => {
            commands::completion::generate_completion(shell);
            return Ok(());
        }
        Commands::Config { format, output } => {
            let format = format.unwrap_or_else(|| "yaml".to_string());
            return commands::config::generate_config(&format, output);
        }
        _ => {}
    }

    let config = ClientConfig::load_config(cli.config, cli.server)?;
    init_tracing(&config.log_level);
    let ctx = AppContext::new(&config)?;

    match cli.command {
        Commands::Register { name, kind } => commands::account::register(&ctx, name, kind).await,
        Commands::Login { name, kind } => commands::account::login(&ctx, name, kind).await,
        Commands::Logout => commands::account::logout(&ctx),
        Commands::Whoami => commands::account::whoami(&ctx),
        Commands::User { id } => commands::account::user(&ctx, id).await,
        Commands::Credits(command) => commands::account::credits(&ctx, command).await,
        Commands::Friends(command) => commands::account::friends(&ctx, command).await,
        Commands::Products(command) => commands::products::run(&ctx, command).await,
        Commands::Alerts(command) => commands::alerts::run(&ctx, command).await,
        Commands::Scan { image } => commands::scan::scan(&ctx, &image).await,
        Commands::Completion { .. } | Commands::Config { .. } => Ok(()),
    }
}

/// Logs to stderr so command output on stdout stays machine readable.
fn init_tracing(level: &str) {
    let _ = fmt::fmt()
        .with_env_filter(build_env_filter(level))
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_env_filter(level: &str) -> EnvFilter {
    let default_level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);

    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy()
    })
}
