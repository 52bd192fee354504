//! Checkout CLI
//!
//! Scans a list of SKUs through the store's pricing rules and prints the total.
//!
//! Use `-c` to load a store configuration file instead of the standard store
//! Use `--no-rules` to price everything at catalog prices
//! Use `-r` to print a receipt table

use std::{io, path::PathBuf};

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use checkout::{catalog::Catalog, checkout::Checkout, config::CheckoutConfig, pipeline::Pipeline};

const DEMO_SKUS: [&str; 3] = ["ipd", "mbp", "vga"];

#[derive(Debug, Parser)]
#[command(name = "checkout", about = "Checkout pricing CLI", long_about = None)]
struct Cli {
    /// Store configuration file (products and pricing rules)
    #[arg(short, long, env = "CHECKOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Price everything at catalog prices
    #[arg(long)]
    no_rules: bool,

    /// Print a receipt table
    #[arg(short, long)]
    receipt: bool,

    /// Log level used when `RUST_LOG` is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// SKUs to scan, in order
    skus: Vec<String>,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level)?;

    let mut checkout = build_checkout(&cli)?;

    let skus: Vec<&str> = if cli.skus.is_empty() {
        DEMO_SKUS.to_vec()
    } else {
        cli.skus.iter().map(String::as_str).collect()
    };

    for sku in skus {
        match checkout.catalog().lookup(sku) {
            Some(product) => println!("Scanning {}", product.name),
            None => println!("Skipping unknown SKU {sku}"),
        }

        checkout.scan(sku);
    }

    println!(
        "SKUs scanned: {}",
        checkout.skus().collect::<Vec<_>>().join(", ")
    );

    if cli.receipt {
        checkout.receipt()?.write_to(io::stdout().lock())?;
    } else {
        println!("Total price of scanned items: {}", checkout.total()?);
    }

    Ok(())
}

fn build_checkout(cli: &Cli) -> Result<Checkout<'static>> {
    let (catalog, pipeline) = match cli.config.as_deref() {
        Some(path) => {
            let config = CheckoutConfig::load(path)?;
            let catalog = config.catalog()?;
            let pipeline = config.pipeline(&catalog)?;

            (catalog, pipeline)
        }
        None => {
            let catalog = Catalog::standard();
            let pipeline = Pipeline::standard(&catalog)?;

            (catalog, pipeline)
        }
    };

    let pipeline = if cli.no_rules {
        Pipeline::new()
    } else {
        pipeline
    };

    Ok(Checkout::with_catalog(catalog, pipeline))
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
}
