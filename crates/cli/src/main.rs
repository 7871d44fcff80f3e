//! OfferDesk CLI - operational tools for the offer document store.
//!
//! # Usage
//!
//! ```bash
//! # List purchase lines of one document
//! od-cli lines list --side purchase --document "ZO/2024/0001"
//!
//! # Recompute derived fields and resync blocks/parameters for one line
//! od-cli lines recalc --side purchase --id 42
//!
//! # Re-push a line's parameter set, deleting stale stored codes
//! od-cli params sync --side sales --id 17 --remove-missing
//! ```
//!
//! # Environment Variables
//!
//! - `OFFERDESK_API_BASE_URL` - Base URL of the document store
//! - `OFFERDESK_API_TOKEN` - Optional bearer token
//! - `OFFERDESK_MAX_BLOCK_QUANTITY` - Optional block size override

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};

use offerdesk_backoffice::models::OfferSide;

mod commands;

#[derive(Parser)]
#[command(name = "od-cli")]
#[command(author, version, about = "OfferDesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and maintain offer lines
    Lines {
        #[command(subcommand)]
        action: LinesAction,
    },
    /// Maintain per-line parameters
    Params {
        #[command(subcommand)]
        action: ParamsAction,
    },
}

/// Offer family, selecting the endpoint set.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    Purchase,
    Sales,
}

impl From<Side> for OfferSide {
    fn from(side: Side) -> Self {
        match side {
            Side::Purchase => Self::Purchase,
            Side::Sales => Self::Sales,
        }
    }
}

#[derive(Subcommand)]
enum LinesAction {
    /// List lines, optionally restricted to one document
    List {
        /// Offer family
        #[arg(short, long, value_enum)]
        side: Side,

        /// Restrict to one offer document
        #[arg(short, long)]
        document: Option<String>,

        /// Free-text search
        #[arg(short, long)]
        query: Option<String>,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Rows per page
        #[arg(long, default_value_t = 20)]
        page_size: u32,
    },
    /// Recompute a line server-side and resync its derived state
    Recalc {
        /// Offer family
        #[arg(short, long, value_enum)]
        side: Side,

        /// Store id of the line
        #[arg(short, long)]
        id: i64,
    },
}

#[derive(Subcommand)]
enum ParamsAction {
    /// Re-push a line's parameter slots to the parameter store
    Sync {
        /// Offer family
        #[arg(short, long, value_enum)]
        side: Side,

        /// Store id of the line
        #[arg(short, long)]
        id: i64,

        /// Delete stored codes absent from the line's slots
        #[arg(long)]
        remove_missing: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // .env is optional; real deployments configure the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Lines { action } => match action {
            LinesAction::List {
                side,
                document,
                query,
                page,
                page_size,
            } => {
                commands::lines::list(side.into(), document, query, page, page_size).await?;
            }
            LinesAction::Recalc { side, id } => {
                commands::lines::recalc(side.into(), id).await?;
            }
        },
        Commands::Params { action } => match action {
            ParamsAction::Sync {
                side,
                id,
                remove_missing,
            } => {
                commands::params::sync(side.into(), id, remove_missing).await?;
            }
        },
    }
    Ok(())
}
