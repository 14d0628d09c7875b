//! # Rewards Shop Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rewards Shop                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  main.rs ────► Starts the runtime, reports fatal startup errors  │  │
//! │  │                                                                  │  │
//! │  │  lib.rs ─────► Logging, config, database, console                │  │
//! │  │                                                                  │  │
//! │  │  console.rs ─► redeem, issue, fulfill, cancel, add, delete       │  │
//! │  │                                                                  │  │
//! │  │  commands/ ──► Service calls returning DTOs or ApiError          │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  rewards_shop.db (local file, WAL mode, foreign keys on)         │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match rewards_shop_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rewards-shop: {e}");
            ExitCode::FAILURE
        }
    }
}
