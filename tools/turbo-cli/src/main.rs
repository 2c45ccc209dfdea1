//! Turbo CLI - Command line storefront client for TurboCommerce.
//!
//! Commands:
//! - `turbo cart` - Show and change the signed-in user's cart
//! - `turbo checkout` - Place an order for the current cart
//! - `turbo order` - Show placed orders

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{CartArgs, CheckoutArgs, OrderArgs};

/// Turbo CLI - Shop from the command line
#[derive(Parser)]
#[command(name = "turbo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Bearer token of the signed-in user
    #[arg(long, global = true, env = "TURBO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change the cart
    Cart(CartArgs),

    /// Place an order for the current cart
    Checkout(CheckoutArgs),

    /// Show placed orders
    Order(OrderArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), cli.token.as_deref(), output.clone()).await {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        if !ctx.session.is_signed_in().await && ctx.had_token {
            ctx.output.warn("Your session has expired. Sign in again and pass a new --token.");
        }
        std::process::exit(1);
    }

    Ok(())
}
