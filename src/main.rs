use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mervolt::Config;

mod cli;

/// mervolt - Mervolt Elektrik website and contact relay
#[derive(Parser)]
#[command(name = "mervolt")]
#[command(about = "Mervolt Elektrik website and contact form relay", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Send a contact form submission to a relay endpoint
    Submit {
        /// Relay endpoint URL
        #[arg(long, default_value = "http://127.0.0.1:3000/api/send-email")]
        endpoint: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        #[arg(long)]
        message: String,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;
    config.validate().map_err(anyhow::Error::msg)?;

    mervolt::observability::init_observability(&config.observability)?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Submit {
            endpoint,
            name,
            phone,
            message,
            timeout,
        } => cli::submit::submit(endpoint, name, phone, message, Duration::from_secs(timeout)).await,
    }
}
