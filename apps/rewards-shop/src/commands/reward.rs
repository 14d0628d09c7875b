//! # Reward Commands
//!
//! The reward catalogue and its admin actions.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::ShopState;
use rewards_core::Reward;

/// Reward DTO for the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardDto {
    pub id: i64,
    pub name: String,
    /// Points per unit.
    pub cost: i64,
}

impl From<Reward> for RewardDto {
    fn from(r: Reward) -> Self {
        RewardDto {
            id: r.id,
            name: r.name,
            cost: r.cost,
        }
    }
}

/// Lists the catalogue, cheapest first.
pub async fn list_rewards(shop: &ShopState) -> Result<Vec<RewardDto>, ApiError> {
    let rewards = shop.service().list_rewards().await?;
    debug!(count = rewards.len(), "Listed rewards");
    Ok(rewards.into_iter().map(RewardDto::from).collect())
}

/// Adds a reward to the catalogue (admin action).
pub async fn add_reward(shop: &ShopState, name: &str, cost: i64) -> Result<RewardDto, ApiError> {
    let reward = shop.service().add_reward(name, cost).await?;
    Ok(reward.into())
}

/// Removes a reward that was never redeemed (admin action).
pub async fn delete_reward(shop: &ShopState, id: i64) -> Result<(), ApiError> {
    shop.service().delete_reward(id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{empty_shop, seeded_shop};
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_seeded_catalogue_is_cheapest_first() {
        let shop = seeded_shop().await;
        let costs: Vec<i64> = list_rewards(&shop)
            .await
            .unwrap()
            .iter()
            .map(|r| r.cost)
            .collect();
        assert_eq!(costs, [15, 20, 40, 50]);
    }

    #[tokio::test]
    async fn test_add_and_delete_reward() {
        let shop = empty_shop().await;

        let err = add_reward(&shop, "Dice", 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "cost must be greater than 0");

        let dice = add_reward(&shop, "Dice", 4).await.unwrap();
        assert_eq!(list_rewards(&shop).await.unwrap(), [dice.clone()]);

        delete_reward(&shop, dice.id).await.unwrap();
        assert!(list_rewards(&shop).await.unwrap().is_empty());
    }
}
