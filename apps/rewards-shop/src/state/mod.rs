//! # State Module
//!
//! Application state shared by the console and the commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐       │
//! │  │       ShopState          │        │      ShopConfig          │       │
//! │  │                          │        │                          │       │
//! │  │  RewardShopService       │        │  database_path           │       │
//! │  │  └── Database (SQLite    │        │  seed_on_first_run       │       │
//! │  │        pool)             │        │  max_connections         │       │
//! │  └──────────────────────────┘        └──────────────────────────┘       │
//! │                                                                         │
//! │  ShopState: the pool is internally synchronized                         │
//! │  ShopConfig: read-only after startup                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod shop;

pub use config::{ConfigError, ShopConfig, IN_MEMORY_PATH};
pub use shop::ShopState;
