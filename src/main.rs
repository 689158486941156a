//! RocketShoes command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # List products with the amount of each already in the cart
//! rocketshoes list
//!
//! # Cart operations
//! rocketshoes add 1
//! rocketshoes remove 1
//! rocketshoes update 3 2
//! rocketshoes cart
//!
//! # Use the built-in sample catalog instead of the HTTP API
//! rocketshoes --offline list
//! ```
//!
//! Configuration comes from `ROCKETSHOES_*` environment variables (see
//! [`StoreConfig`]); a failed cart operation prints its notice and exits 1.

use clap::{Parser, Subcommand};
use rocketshoes::cart_actor::{CartError, CartOperation, LineChange, Notice};
use rocketshoes::catalog::StaticCatalog;
use rocketshoes::lifecycle::{setup_tracing, StoreConfig, StoreSystem};
use rocketshoes::model::{format_price, ProductId};
use rocketshoes::storage::FileStorage;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "rocketshoes")]
#[command(author, version, about = "RocketShoes storefront and cart")]
struct Cli {
    /// Serve the sample catalog from memory instead of calling the API
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog with cart quantities
    List,
    /// Add one unit of a product to the cart
    Add { id: u32 },
    /// Remove one unit of a product from the cart
    Remove { id: u32 },
    /// Set the amount of a product already in the cart
    Update {
        id: u32,
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
    /// Show the cart
    Cart,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, String> {
    let config = StoreConfig::from_env().map_err(|e| e.to_string())?;

    let system = if cli.offline {
        info!("Using the sample catalog");
        StoreSystem::start(
            Arc::new(StaticCatalog::sample()),
            Arc::new(FileStorage::new(&config.storage_dir)),
            config.mailbox_size,
        )
        .await
    } else {
        StoreSystem::from_config(&config).await
    }
    .map_err(|e| e.to_string())?;

    finish(system, cli.command).await
}

/// Runs `command`, then shuts the store down whether or not it succeeded.
async fn finish(system: StoreSystem, command: Commands) -> Result<ExitCode, String> {
    let outcome = execute(&system, command).await;
    system.shutdown().await.map_err(|e| e.to_string())?;
    outcome
}

async fn execute(system: &StoreSystem, command: Commands) -> Result<ExitCode, String> {
    let code = match command {
        Commands::List => {
            let mut listing = system.listing();
            listing.load().await.map_err(|e| e.to_string())?;
            print!("{}", listing.render());
            ExitCode::SUCCESS
        }
        Commands::Add { id } => report(
            CartOperation::Add,
            system.cart_client.add_product(ProductId(id)).await,
        ),
        Commands::Remove { id } => report(
            CartOperation::Remove,
            system.cart_client.remove_product(ProductId(id)).await,
        ),
        Commands::Update { id, amount } => report(
            CartOperation::Update,
            system
                .cart_client
                .update_product_amount(ProductId(id), amount)
                .await,
        ),
        Commands::Cart => {
            let cart = system.cart_client.cart().await.map_err(|e| e.to_string())?;
            for item in cart.items() {
                println!(
                    "[{:>3}] {:<56} {:>3} x {:>12} = {:>14}",
                    item.id.0,
                    item.title,
                    item.amount,
                    format_price(item.price),
                    format_price(item.subtotal())
                );
            }
            println!("Total: {}", format_price(cart.total()));
            ExitCode::SUCCESS
        }
    };
    Ok(code)
}

fn report(operation: CartOperation, result: Result<LineChange, CartError>) -> ExitCode {
    match result {
        Ok(change) => {
            println!("{}: {} in cart", change.product_id, change.amount);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", Notice::for_failure(operation, &e));
            ExitCode::FAILURE
        }
    }
}
