//! # Seed Catalog Generator
//!
//! Writes a sample `products.json` for development.
//!
//! ## Usage
//! ```bash
//! # Six products per storefront section (default)
//! cargo run -p shopfront-store --bin seed
//!
//! # Custom amount and path
//! cargo run -p shopfront-store --bin seed -- --per-category 12 --out ./data/products.json
//!
//! # Overwrite an existing file
//! cargo run -p shopfront-store --bin seed -- --force
//! ```
//!
//! ## Generated Products
//! One category per storefront section: HomeAppliances, Electronics,
//! Fashion, Books, Sports. Each product has:
//! - Id unique within its category, starting at 1
//! - Name from the section's list (with a "Mk N" suffix once the list wraps)
//! - Price: 4.99 - 249.99
//! - Stock: 0 - 12 (some products start sold out)
//! - Model year: 2015 - 2024

use std::env;
use std::path::PathBuf;

use shopfront_core::{Catalog, Money, Product};
use shopfront_store::{CatalogStore, JsonFileStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Sections with (name, brand) pairs.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "HomeAppliances",
        &[
            ("Kettle", "Brewline"),
            ("Toaster", "Brewline"),
            ("Microwave", "Heatwave"),
            ("Blender", "Mixo"),
            ("Vacuum Cleaner", "Dustaway"),
            ("Air Fryer", "Heatwave"),
            ("Iron", "Pressly"),
            ("Fan", "Breezer"),
        ],
    ),
    (
        "Electronics",
        &[
            ("Headphones", "Sonique"),
            ("Smartphone", "Voltra"),
            ("Laptop", "Voltra"),
            ("Tablet", "Voltra"),
            ("Smartwatch", "Tickr"),
            ("Speaker", "Sonique"),
            ("Camera", "Lumen"),
            ("Monitor", "Pixelon"),
        ],
    ),
    (
        "Fashion",
        &[
            ("Denim Jacket", "Northway"),
            ("Sneakers", "Stride"),
            ("Scarf", "Loom"),
            ("Sunglasses", "Shade"),
            ("Backpack", "Northway"),
            ("Wool Hat", "Loom"),
            ("Leather Belt", "Hide"),
            ("Raincoat", "Northway"),
        ],
    ),
    (
        "Books",
        &[
            ("The Go Programming Language", "Addison-Wesley"),
            ("Programming Rust", "O'Reilly"),
            ("Clean Code", "Prentice Hall"),
            ("Dune", "Ace"),
            ("The Hobbit", "Allen & Unwin"),
            ("Sapiens", "Harper"),
            ("Refactoring", "Addison-Wesley"),
            ("Neuromancer", "Ace"),
        ],
    ),
    (
        "Sports",
        &[
            ("Football", "Kickr"),
            ("Tennis Racket", "Courtline"),
            ("Yoga Mat", "Flexa"),
            ("Dumbbell Set", "Ironclad"),
            ("Bicycle Helmet", "Ridesafe"),
            ("Running Shoes", "Stride"),
            ("Basketball", "Kickr"),
            ("Jump Rope", "Flexa"),
        ],
    ),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut per_category: usize = 6;
    let mut out = PathBuf::from("products.json");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--per-category" | "-n" => {
                if i + 1 < args.len() {
                    per_category = args[i + 1].parse().unwrap_or(per_category);
                    i += 1;
                }
            }
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Shopfront Seed Catalog Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --per-category <N>  Products per section (default: 6)");
                println!("  -o, --out <PATH>        Catalog file path (default: products.json)");
                println!("  -f, --force             Overwrite an existing catalog");
                println!("  -h, --help              Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    if out.exists() && !force {
        println!("⚠ {} already exists", out.display());
        println!("  Pass --force to overwrite it.");
        return Ok(());
    }

    let catalog = generate_catalog(per_category);
    let store = JsonFileStore::new(&out);
    store.save(&catalog)?;

    info!(
        path = ?out,
        categories = catalog.len(),
        products = catalog.product_count(),
        "Seed catalog written"
    );
    println!(
        "✓ Wrote {} products in {} categories to {}",
        catalog.product_count(),
        catalog.len(),
        out.display()
    );

    Ok(())
}

/// Builds the sample catalog. Deterministic for a given count.
fn generate_catalog(per_category: usize) -> Catalog {
    let mut catalog = Catalog::new();

    for (section_idx, (section, items)) in SECTIONS.iter().enumerate() {
        let products = (0..per_category)
            .map(|n| generate_product(section_idx, items, n))
            .collect();
        catalog.insert_category(*section, products);
    }

    catalog
}

fn generate_product(section_idx: usize, items: &[(&str, &str)], n: usize) -> Product {
    let (base_name, brand) = items[n % items.len()];
    let generation = n / items.len();
    let name = if generation == 0 {
        base_name.to_string()
    } else {
        format!("{} Mk {}", base_name, generation + 1)
    };

    let seed = section_idx * 97 + n * 31;
    let price = Money::from_cents(499 + ((seed * 1733) % 24_500) as i64);
    let stock = (seed % 13) as i64;
    let model_year = 2015 + (seed % 10) as i64;

    Product::new(n as i64 + 1, name, price, brand, model_year, stock)
}
