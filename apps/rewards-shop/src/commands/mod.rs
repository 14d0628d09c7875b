//! # Commands Module
//!
//! One async function per user action. The console calls these; they call
//! the rule service and return serializable DTOs or an [`ApiError`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── customer.rs  ◄─── list, add, delete, issue points
//! ├── reward.rs    ◄─── list, add, delete
//! └── order.rs     ◄─── redeem, pending list, fulfil, cancel
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Console: "redeem 1 1 3"                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  order::redeem(&shop, 1, 1, 3)                                          │
//! │      -> Result<RedemptionDto, ApiError>                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  RewardShopService::redeem ──► one SQLite transaction                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Console renders the DTO (or the error message)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`ApiError`]: crate::error::ApiError

pub mod customer;
pub mod order;
pub mod reward;

#[cfg(test)]
pub(crate) mod testing {
    use crate::state::ShopState;
    use rewards_db::{Database, DbConfig};
    use rewards_service::RewardShopService;

    /// Shop over an empty in-memory database.
    pub async fn empty_shop() -> ShopState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        ShopState::new(RewardShopService::new(db))
    }

    /// Shop over an in-memory database with the demo data.
    pub async fn seeded_shop() -> ShopState {
        let db = Database::new(DbConfig::in_memory().seed_on_first_run(true))
            .await
            .unwrap();
        ShopState::new(RewardShopService::new(db))
    }
}
