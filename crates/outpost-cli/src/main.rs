mod fetch;
mod render;
mod scan;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::fetch::TargetArgs;

#[derive(Debug, Parser)]
#[command(name = "outpost")]
#[command(about = "Table-ordering client: scan a table QR code and load its menu")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a table QR URL and remember its identifiers
    Scan {
        /// Full URL encoded in the QR code
        url: String,
    },
    /// Show the menu for the scanned table
    Menu(TargetArgs),
    /// Show the scanned location
    Location(TargetArgs),
    /// Show the scanned merchant
    Merchant(TargetArgs),
    /// Load merchant and location together, as the welcome screen does
    Welcome(TargetArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = outpost_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scan { url } => scan::run_scan(&config, &url),
        Commands::Menu(target) => fetch::run_menu(&config, &target).await,
        Commands::Location(target) => fetch::run_location(&config, &target).await,
        Commands::Merchant(target) => fetch::run_merchant(&config, &target).await,
        Commands::Welcome(target) => fetch::run_welcome(&config, &target).await,
    }
}
