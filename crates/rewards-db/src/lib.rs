//! # rewards-db: Database Layer for the Rewards Shop
//!
//! This crate provides database access for the rewards shop.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rewards Shop Data Flow                           │
//! │                                                                         │
//! │  RewardShopService (redeem, cancel_order, ...)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    rewards-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ CustomerRepo  │    │ + schema     │  │   │
//! │  │   │ SqlitePool    │◄───│ RewardRepo    │    │   check      │  │   │
//! │  │   │ Transactions  │    │ OrderRepo     │    │ + seed data  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (rewards_shop.db)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rewards_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("rewards_shop.db")).await?;
//! let customers = db.customers().list_all().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use seed::SeedReport;

pub use repository::customer::CustomerRepository;
pub use repository::order::OrderRepository;
pub use repository::reward::RewardRepository;
