//! # Seed Data Loader
//!
//! Creates (or migrates) a database file and fills empty tables with the
//! demo customers and rewards.
//!
//! ## Usage
//! ```bash
//! # Seed ./rewards_dev.db
//! cargo run -p rewards-db --bin seed
//!
//! # Specify database path
//! cargo run -p rewards-db --bin seed -- --db ./data/rewards_shop.db
//! ```

use rewards_db::migrations::migration_status;
use rewards_db::{Database, DbConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./rewards_dev.db");

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
                println!("Rewards Shop Seed Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./rewards_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Rewards Shop Seed Loader");
    println!("========================");
    println!("Database: {}", db_path);
    println!();

    // Seed explicitly below so the report can be printed.
    let config = DbConfig::new(&db_path).seed_on_first_run(false);
    let db = Database::new(config).await?;

    if !db.health_check().await {
        return Err("database did not answer a health check".into());
    }
    println!("✓ Connected to database");

    let (total, applied) = migration_status(db.pool()).await?;
    println!("✓ Migrations applied ({}/{})", applied, total);

    let report = db.seed_if_empty().await?;
    if report.is_empty() {
        println!("⚠ Tables already have data, nothing inserted.");
        println!("  Delete the database file to regenerate.");
    } else {
        println!("✓ Inserted {} customers", report.customers_inserted);
        println!("✓ Inserted {} rewards", report.rewards_inserted);
    }

    println!();
    for customer in db.customers().list_all().await? {
        println!("  {:<10} {:<24} {:>6}", customer.name, customer.email, customer.points);
    }
    for reward in db.rewards().list_all().await? {
        println!("  {:<16} {:>6}", reward.name, reward.cost);
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}
