//! GoMarket CLI - inspect and mutate a cart on local device storage.
//!
//! Commands:
//! - `gomarket add` - Add a product to the cart
//! - `gomarket increment` - Increase a line item quantity
//! - `gomarket decrement` - Decrease a line item quantity (removes at 1)
//! - `gomarket list` - Show the cart contents
//! - `gomarket clear` - Empty the cart

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;

use gomarket_cart::prelude::*;
use gomarket_storage::DeviceStore;

/// GoMarket CLI - local cart storage tool
#[derive(Parser)]
#[command(name = "gomarket")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the storage file
    #[arg(long, global = true, default_value = "gomarket-data")]
    data_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart (increments quantity if already present)
    Add {
        /// Product id
        id: String,

        /// Product title
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long, default_value = "")]
        image_url: String,

        /// Unit price
        #[arg(long)]
        price: f64,
    },

    /// Increase a line item quantity by one
    Increment {
        /// Product id
        id: String,
    },

    /// Decrease a line item quantity by one, removing the item at one
    Decrement {
        /// Product id
        id: String,
    },

    /// Show the cart contents
    List,

    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let storage_file = cli.data_dir.join("storage.json");
    let storage = DeviceStore::open(&storage_file)
        .await
        .with_context(|| format!("opening storage at {}", storage_file.display()))?;
    let store = CartStore::load(storage, StoreConfig::default())
        .await
        .context("restoring cart from storage")?;

    match cli.command {
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => {
            store
                .add_to_cart(Product::new(id, title, image_url, price))
                .await?;
        }
        Commands::Increment { id } => {
            store.increment(&ProductId::new(id)).await?;
        }
        Commands::Decrement { id } => {
            store.decrement(&ProductId::new(id)).await?;
        }
        Commands::List => {}
        Commands::Clear => {
            store.clear().await?;
        }
    }

    print_cart(&store);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_cart(store: &CartStore) {
    let items = store.products();
    if items.is_empty() {
        println!("{}", style("cart is empty").dim());
        return;
    }

    for item in &items {
        println!(
            "{:>3} x {}  ${:.2}  {}",
            item.quantity,
            style(&item.title).bold(),
            item.price,
            style(item.id.as_str()).dim(),
        );
    }

    let unit_count: u32 = items.iter().map(|i| i.quantity).sum();
    let subtotal: f64 = items.iter().map(CartItem::line_total).sum();
    println!(
        "{}",
        style(format!("{unit_count} units, subtotal ${subtotal:.2}")).cyan()
    );
}
