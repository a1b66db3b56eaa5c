//! Rate Diff CLI
//!
//! Command-line interface for the Rate Diff API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use ratediff_client::RateDiffClient;

#[derive(Parser)]
#[command(name = "ratediff")]
#[command(author, version, about = "Rate Diff API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Rate Diff API
    #[arg(
        long,
        env = "RATEDIFF_API_URL",
        default_value = "http://localhost:8000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the first provider's rates
    First,
    /// Show the second provider's rates
    Second,
    /// Compare both providers and record the result
    Diff,
    /// Show the last recorded diffs
    History,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = RateDiffClient::new(&cli.api_url);

    let output = match cli.command {
        Commands::First => serde_json::to_string_pretty(&client.first().await?)?,
        Commands::Second => serde_json::to_string_pretty(&client.second().await?)?,
        Commands::Diff => serde_json::to_string_pretty(&client.diff().await?)?,
        Commands::History => serde_json::to_string_pretty(&client.history().await?)?,
    };
    println!("{}", output);

    Ok(())
}
