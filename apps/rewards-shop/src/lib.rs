//! # Rewards Shop Library
//!
//! Wires configuration, the database and the rule service into the console.
//!
//! ## Module Organization
//! ```text
//! rewards_shop_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── console.rs      ◄─── Line-oriented front end
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── shop.rs     ◄─── Rule service wrapper
//! │   └── config.rs   ◄─── Environment configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── customer.rs ◄─── Customer listing, points, admin
//! │   ├── reward.rs   ◄─── Reward listing, admin
//! │   └── order.rs    ◄─── Redemption, fulfilment, cancellation
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod console;
pub mod error;
pub mod state;

use tokio::io::BufReader;
use tracing::{info, Subscriber};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use console::Console;
use rewards_db::Database;
use rewards_service::RewardShopService;
use state::{ShopConfig, ShopState};

/// Runs the application until the console reaches end of input or `quit`.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • Default: info,rewards=debug,sqlx=warn (RUST_LOG overrides)        │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • REWARDS_DB_PATH, REWARDS_SEED, REWARDS_MAX_CONNECTIONS            │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode and foreign keys                             │
/// │     • Run pending migrations, verify schema                             │
/// │     • Seed demo data into empty tables                                  │
/// │                                                                         │
/// │  4. Run Console ──────────────────────────────────────────────────────► │
/// │     • One command per line until EOF or `quit`                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Rewards Shop");

    let config = ShopConfig::from_env()?;
    info!(db_path = %config.database_path.display(), "Configuration loaded");

    let db = Database::new(config.db_config()).await?;
    info!("Database connected and migrations applied");

    let shop = ShopState::new(RewardShopService::new(db));

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    Console::new(&shop, stdin, stdout).run().await?;

    shop.service().database().close().await;
    info!("Rewards Shop stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=rewards=trace` - Show trace for rewards crates only
/// - Default: INFO level, DEBUG for rewards crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    build_subscriber(filter).init();
}

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "info,rewards=debug,sqlx=warn";

fn build_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}
