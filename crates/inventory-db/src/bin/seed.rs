//! # Seed Data Generator
//!
//! Populates the inventory database with test products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 250 products (default) into INVENTORY_DB_PATH or ./inventory.db
//! cargo run -p inventory-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p inventory-db --bin seed -- --count 10000
//!
//! # Specify database path
//! cargo run -p inventory-db --bin seed -- --db ./data/inventory.db
//! ```
//!
//! ## Generated Products
//! Every base name in `LINES` is crossed with every entry in `SIZES` until
//! `--count` products exist (at most 250 with the built-in tables).
//!
//! Each product has:
//! - SKU: `{LINE}-{NAME}-{INDEX}`
//! - 12-digit UPC derived from the index
//! - Manufacturer picked from the line
//! - Price: $1.99 - $9.99 plus a size addon
//! - Stock: 0 - 100 units

use std::env;
use std::time::Instant;

use inventory_core::{Money, Product, ProductFilter};
use inventory_db::{Database, DbConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_COUNT: usize = 250;

/// A product line: SKU prefix, the manufacturers that make it, and base names.
struct Line {
    code: &'static str,
    manufacturers: &'static [&'static str],
    names: &'static [&'static str],
}

const LINES: &[Line] = &[
    Line {
        code: "BEV",
        manufacturers: &["Coca-Cola Company", "PepsiCo", "Keurig Dr Pepper"],
        names: &["Cola", "Lemon Soda", "Sparkling Water", "Iced Tea", "Orange Juice", "Cold Brew"],
    },
    Line {
        code: "SNK",
        manufacturers: &["Frito-Lay", "Mars", "Mondelez"],
        names: &["Salted Chips", "Tortilla Chips", "Pretzels", "Chocolate Bar", "Sandwich Cookies"],
    },
    Line {
        code: "DRY",
        manufacturers: &["Land O Lakes", "Danone", "Organic Valley"],
        names: &["Whole Milk", "Oat Milk", "Cheddar", "Greek Yogurt", "Butter"],
    },
    Line {
        code: "FRZ",
        manufacturers: &["Unilever", "Conagra", "Kellogg"],
        names: &["Vanilla Ice Cream", "Frozen Pizza", "Waffles", "Mixed Vegetables"],
    },
    Line {
        code: "GRO",
        manufacturers: &["General Mills", "Barilla", "Campbell"],
        names: &["Penne", "Long Grain Rice", "Tomato Soup", "Oat Cereal", "Peanut Butter"],
    },
];

/// Size variants for products, with the price addon in cents
const SIZES: &[(&str, i64)] = &[
    ("Small", 0),
    ("Medium", 100),
    ("Large", 200),
    ("XL", 350),
    ("12oz", 0),
    ("16oz", 50),
    ("20oz", 100),
    ("2L", 150),
    ("6-Pack", 300),
    ("12-Pack", 500),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut config = DbConfig::from_env()?;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Inventory Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: $INVENTORY_DB_PATH or ./inventory.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(
        path = %config.database_path.display(),
        count,
        "Seeding inventory database"
    );

    let db = Database::new(config).await?;
    let repo = db.products();

    let existing = repo.count().await?;
    if existing > 0 {
        warn!(
            existing,
            "Database already has products; skipping seed to avoid duplicates"
        );
        return Ok(());
    }

    let mut generated = 0;
    let start = Instant::now();

    'outer: for (line_idx, line) in LINES.iter().enumerate() {
        for (product_idx, product_name) in line.names.iter().enumerate() {
            for (size_idx, (size_name, price_addon)) in SIZES.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let product = generate_product(
                    line,
                    product_name,
                    size_name,
                    *price_addon,
                    line_idx * 1000 + product_idx * 20 + size_idx,
                );

                if let Err(e) = repo.insert(&product).await {
                    warn!(sku = %product.sku, error = %e, "Failed to insert product");
                    continue;
                }

                generated += 1;
                if generated % 500 == 0 {
                    info!(generated, "Seeding in progress");
                }
            }
        }
    }

    let elapsed = start.elapsed();
    info!(
        generated,
        elapsed_ms = elapsed.as_millis() as u64,
        rate = %format!("{:.0}/s", generated as f64 / elapsed.as_secs_f64().max(f64::EPSILON)),
        "Generated products"
    );

    // Verify reads
    let hits = repo.search(&ProductFilter::new().by_name("cola")).await?;
    info!(results = hits.len(), "Search name 'cola'");

    let hits = repo.search(&ProductFilter::new().by_sku("bev")).await?;
    info!(results = hits.len(), "Search sku 'bev'");

    if let Some(top) = repo.top_ten().await?.first() {
        info!(
            product = %top.product_name,
            quantity_on_hand = top.quantity_on_hand,
            "Best stocked product"
        );
    }

    db.close().await;
    info!("Seed complete");
    Ok(())
}

/// Installs the fmt subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,inventory=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Generates a single product from its line, base name and size.
fn generate_product(
    line: &Line,
    name: &str,
    size: &str,
    price_addon: i64,
    seed: usize,
) -> Product {
    let code: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(3)
        .collect::<String>()
        .to_uppercase();
    let sku = format!("{}-{code}-{seed:04}", line.code);

    // UPC-A shape, checksum not computed
    let upc = format!("04{seed:010}");

    let manufacturer = line.manufacturers[seed % line.manufacturers.len()];

    let base_price = 199 + ((seed * 17) % 800) as i64;
    let price = Money::from_cents(base_price + price_addon);

    let quantity_on_hand = (seed % 101) as i64;

    Product::new(
        manufacturer,
        sku,
        upc,
        price,
        quantity_on_hand,
        format!("{name} {size}"),
    )
}
