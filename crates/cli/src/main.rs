//! Aras Kargo CLI - Manual tracking, status, and label tools.
//!
//! # Usage
//!
//! ```bash
//! # Resolve the carrier tracking number for an integration code
//! aras-cli track ORD104212345
//!
//! # Query delivery status for a tracking number
//! aras-cli status 8700123456789
//!
//! # Fetch the shipping label and write the decoded bytes to a file
//! aras-cli label ORD104212345 --out label.zip
//! ```
//!
//! # Commands
//!
//! - `track` - Run the tracking query cascade
//! - `status` - Query and classify the delivery status
//! - `label` - Fetch the printable label
//!
//! Credentials come from `ARAS_*` environment variables (a `.env` file is
//! honored). Exit code is 1 when the carrier operation did not succeed.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "aras-cli")]
#[command(author, version, about = "Aras Kargo integration tools")]
struct Cli {
    /// Override the carrier request timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tracking query cascade for an integration code
    Track {
        /// Integration code the shipment was submitted under
        code: String,
    },
    /// Query and classify the delivery status
    Status {
        /// Carrier tracking number
        tracking_number: String,
    },
    /// Fetch the printable label
    Label {
        /// Integration code the shipment was submitted under
        code: String,

        /// Write the decoded label bytes to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

/// Returns whether the carrier operation reported success.
async fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let timeout_secs = cli.timeout_secs;
    match cli.command {
        Commands::Track { code } => Ok(commands::track::run(&code, timeout_secs).await?),
        Commands::Status { tracking_number } => {
            Ok(commands::status::run(&tracking_number, timeout_secs).await)
        }
        Commands::Label { code, out } => {
            Ok(commands::label::run(&code, out.as_deref(), timeout_secs).await?)
        }
    }
}
