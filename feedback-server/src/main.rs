//! Binary for the feedback service. Config from env and optional CLI args.

use anyhow::Result;
use clap::{Parser, Subcommand};
use feedback_core::init_tracing;
use feedback_server::{start_server, ServerConfig};

#[derive(Parser)]
#[command(name = "feedback-server")]
#[command(about = "Feedback submission service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (config from env; port can override FEEDBACK_PORT).
    Run {
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { port } => {
            let config = ServerConfig::load(port)?;
            init_tracing(config.log_file.as_deref())?;
            start_server(config).await
        }
    }
}
