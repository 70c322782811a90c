//! Plate Cost CLI - recipe costing, pricing and period reports.
//!
//! # Usage
//!
//! ```bash
//! # Average ingredient prices from a purchase log
//! pc-cli aggregate purchases.yaml
//!
//! # Cost a recipe, pricing missing ingredients from the purchase log
//! pc-cli cost flan.yaml --purchases purchases.yaml
//!
//! # Price needed for a 30% margin on a 48.85 serving
//! pc-cli price --cost 48.85 --margin 30 --yield 10
//!
//! # Profit and loss from exported records
//! pc-cli report march.yaml
//!
//! # Work against the backend
//! pc-cli fetch purchases --period 4
//! pc-cli fetch report --period 4
//! pc-cli fetch recipe --id 12 --period 4
//! pc-cli push recipe flan.yaml --period 4
//! ```
//!
//! # Commands
//!
//! - `aggregate` - Average unit price per ingredient
//! - `cost` - Recipe economics and margin health
//! - `price` - Solve price from margin or margin from price
//! - `report` - Financial report from a local file
//! - `fetch` - Read purchases, reports and recipes from the backend
//! - `push` - Save a recipe to the backend

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use plate_cost_core::{InventoryPeriodId, RecipeId};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod render;

use config::CostingSettings;
use error::CliError;

#[derive(Parser)]
#[command(name = "pc-cli")]
#[command(author, version, about = "Plate Cost CLI tools")]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Average unit price per ingredient from a purchase log
    Aggregate {
        /// YAML or JSON list of purchases
        file: PathBuf,

        /// Treat names differing only in case or spacing as one ingredient
        #[arg(long)]
        normalize_names: bool,
    },
    /// Cost a recipe file
    Cost {
        /// Recipe YAML file
        file: PathBuf,

        /// Purchase log used to price ingredients without a unit cost
        #[arg(short, long)]
        purchases: Option<PathBuf>,
    },
    /// Solve for price or margin on one serving
    Price {
        /// Cost per serving
        #[arg(short, long)]
        cost: Decimal,

        /// Target margin percent
        #[arg(short, long, conflicts_with = "price", required_unless_present = "price")]
        margin: Option<Decimal>,

        /// Selling price per serving
        #[arg(short, long)]
        price: Option<Decimal>,

        /// Servings per batch
        #[arg(short, long = "yield", default_value_t = 1)]
        yield_count: i64,
    },
    /// Financial report from exported sales, expenses and purchases
    Report {
        /// Report YAML file
        file: PathBuf,
    },
    /// Read data from the backend
    Fetch {
        #[command(subcommand)]
        target: FetchTarget,
    },
    /// Save data to the backend
    Push {
        #[command(subcommand)]
        target: PushTarget,
    },
}

#[derive(Subcommand)]
enum FetchTarget {
    /// Average ingredient prices for a period
    Purchases {
        #[arg(long)]
        period: InventoryPeriodId,

        #[arg(long)]
        normalize_names: bool,
    },
    /// Financial report for a period
    Report {
        #[arg(long)]
        period: InventoryPeriodId,
    },
    /// Cost a stored recipe against a period's purchases
    Recipe {
        #[arg(long)]
        id: RecipeId,

        #[arg(long)]
        period: InventoryPeriodId,
    },
}

#[derive(Subcommand)]
enum PushTarget {
    /// Create a recipe, or replace one with --id
    Recipe {
        /// Recipe YAML file
        file: PathBuf,

        /// Existing recipe to replace
        #[arg(long)]
        id: Option<RecipeId>,

        /// Period whose purchases price ingredients without a unit cost
        #[arg(long)]
        period: Option<InventoryPeriodId>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = CostingSettings::from_env()?;

    match cli.command {
        Commands::Aggregate {
            file,
            normalize_names,
        } => commands::aggregate::run(&file, normalize_names, &settings).await?,
        Commands::Cost { file, purchases } => {
            commands::cost::run(&file, purchases.as_deref(), &settings).await?;
        }
        Commands::Price {
            cost,
            margin,
            price,
            yield_count,
        } => commands::price::run(cost, margin, price, yield_count, &settings)?,
        Commands::Report { file } => commands::report::run(&file, &settings).await?,
        Commands::Fetch { target } => match target {
            FetchTarget::Purchases {
                period,
                normalize_names,
            } => commands::fetch::purchases(period, normalize_names, &settings).await?,
            FetchTarget::Report { period } => commands::fetch::report(period, &settings).await?,
            FetchTarget::Recipe { id, period } => {
                commands::fetch::recipe(id, period, &settings).await?;
            }
        },
        Commands::Push { target } => match target {
            PushTarget::Recipe { file, id, period } => {
                commands::fetch::push_recipe(&file, id, period, &settings).await?;
            }
        },
    }
    Ok(())
}
