//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod order;

use clap::{Args, Subcommand};

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub action: Option<CartAction>,
}

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart (default)
    Show,

    /// Add a product
    Add {
        /// Product id.
        product: String,

        /// Quantity to add.
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },

    /// Set a line's quantity
    Set {
        product: String,
        quantity: i64,
    },

    /// Raise a line's quantity by one
    Inc { product: String },

    /// Lower a line's quantity by one
    Dec { product: String },

    /// Remove a line
    Remove { product: String },

    /// Remove every line
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient name.
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub street: String,

    #[arg(long)]
    pub city: String,

    #[arg(long, default_value = turbo_commerce::checkout::DEFAULT_COUNTRY)]
    pub country: String,

    #[arg(long)]
    pub zip: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Payment method: credit_card, paypal or cash_on_delivery.
    #[arg(long, default_value = "credit_card")]
    pub payment: String,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub action: OrderAction,
}

#[derive(Subcommand)]
pub enum OrderAction {
    /// Show an order; without an id, the confirmation fallback order
    Show { id: Option<String> },

    /// List your orders
    List,
}
