//! # Catalog Seeder
//!
//! Populates the database with a signage catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./signboard_dev.db
//! cargo run -p signboard-db --bin seed
//!
//! # Specify database path
//! cargo run -p signboard-db --bin seed -- --db ./data/signboard.db
//! ```
//!
//! Each category gets every finish variant, so the catalog exercises the
//! unit suffixes and quantity bounds the cart and product pages rely on.

use chrono::Utc;
use std::env;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use signboard_core::{Money, Product};
use signboard_db::{Database, DbConfig};

/// `(category, unit, min_qty, max_qty, lead_time_days, products)`
/// where each product is `(name, base price in cents)`.
type Category = (
    &'static str,
    Option<&'static str>,
    Option<i64>,
    Option<i64>,
    i64,
    &'static [(&'static str, i64)],
);

const CATEGORIES: &[Category] = &[
    (
        "banners",
        Some("sq ft"),
        Some(4),
        Some(500),
        3,
        &[
            ("Vinyl Banner", 450),
            ("Mesh Banner", 520),
            ("Fabric Banner", 780),
            ("Retractable Banner Stand", 8900),
        ],
    ),
    (
        "signs",
        None,
        None,
        Some(50),
        7,
        &[
            ("Acrylic Sign", 10000),
            ("Aluminum Composite Sign", 7500),
            ("Coroplast Yard Sign", 1800),
            ("A-Frame Sidewalk Sign", 14900),
            ("Illuminated Channel Letters", 65000),
        ],
    ),
    (
        "vinyl",
        Some("sq ft"),
        Some(2),
        None,
        2,
        &[
            ("Window Perforated Vinyl", 900),
            ("Wall Decal", 650),
            ("Floor Graphic", 1100),
            ("Vehicle Wrap Vinyl", 1500),
        ],
    ),
    (
        "plaques",
        None,
        None,
        Some(20),
        10,
        &[
            ("Brass Plaque", 12000),
            ("Wood Engraved Plaque", 8500),
            ("Stainless Steel Nameplate", 6000),
        ],
    ),
];

/// Finish variants and the price added to the base, in cents.
const FINISHES: &[(&str, i64)] = &[("Standard", 0), ("Premium", 250), ("Outdoor UV", 400)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./signboard_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Signboard Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./signboard_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Signboard Catalog Seeder");
    println!("========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.catalog().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let mut generated = 0;
    for &(category, unit, min_qty, max_qty, lead_time, products) in CATEGORIES {
        for &(name, base_cents) in products {
            for &(finish, addon_cents) in FINISHES {
                let product = build_product(
                    category,
                    &format!("{name} ({finish})"),
                    base_cents + addon_cents,
                    unit,
                    (min_qty, max_qty),
                    lead_time,
                );

                if let Err(e) = db.catalog().insert(&product).await {
                    eprintln!("Failed to insert {}: {}", product.name, e);
                    continue;
                }
                generated += 1;
            }
        }
    }

    let banners = db.catalog().list_active(Some("banners"), 100).await?;
    println!("✓ Generated {} products ({} banners)", generated, banners.len());

    db.close().await;
    Ok(())
}

fn build_product(
    category: &str,
    name: &str,
    price_cents: i64,
    unit: Option<&str>,
    (min_quantity, max_quantity): (Option<i64>, Option<i64>),
    lead_time_days: i64,
) -> Product {
    let now = Utc::now();
    let slug = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>();

    Product {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: Some(format!("{name} printed to order")),
        category: Some(category.to_string()),
        price: Money::from_cents(price_cents),
        image_url: Some(format!("/images/{category}/{slug}.jpg")),
        unit: unit.map(str::to_string),
        min_quantity,
        max_quantity,
        lead_time_days: Some(lead_time_days),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}
