//! # Shop State
//!
//! Wraps the rule service for use in commands.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn list_rewards(shop: &ShopState) -> Result<Vec<RewardDto>, ApiError> {
//!     let rewards = shop.service().list_rewards().await?;
//!     Ok(rewards.into_iter().map(RewardDto::from).collect())
//! }
//! ```

use rewards_service::RewardShopService;

/// Wrapper around `RewardShopService` handed to every command.
#[derive(Debug, Clone)]
pub struct ShopState {
    service: RewardShopService,
}

impl ShopState {
    /// Creates a new ShopState around the service.
    pub fn new(service: RewardShopService) -> Self {
        ShopState { service }
    }

    /// Returns a reference to the inner service.
    pub fn service(&self) -> &RewardShopService {
        &self.service
    }
}
