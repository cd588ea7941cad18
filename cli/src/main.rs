mod seed;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "potluck")]
#[command(about = "Potluck CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a running server with sample recipes and reviews
    Seed {
        /// Server URL (default: http://localhost:5005)
        #[arg(long, default_value = "http://localhost:5005")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Seed { server } => {
            seed::seed(&server).await?;
        }
    }

    Ok(())
}
