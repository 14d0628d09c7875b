//! # Order Commands
//!
//! Redemption by customers, fulfilment and cancellation by employees.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  redeem ──► RedemptionDto (order pending, balance already reduced)      │
//! │                │                                                        │
//! │                ├── fulfill_order ──► OrderDto (status fulfilled)         │
//! │                │                                                        │
//! │                └── cancel_order ───► CustomerDto (points refunded)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::customer::CustomerDto;
use super::reward::RewardDto;
use crate::error::ApiError;
use crate::state::ShopState;
use rewards_core::{Order, OrderStatus, PendingOrder, Redemption};

/// Order DTO for the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i64,
    pub customer_id: i64,
    pub reward_id: i64,
    pub quantity: i64,
    pub points_spent: i64,
    pub order_time: DateTime<Utc>,
    pub status: OrderStatus,
}

impl From<Order> for OrderDto {
    fn from(o: Order) -> Self {
        OrderDto {
            id: o.id,
            customer_id: o.customer_id,
            reward_id: o.reward_id,
            quantity: o.quantity,
            points_spent: o.points_spent,
            order_time: o.order_time,
            status: o.status,
        }
    }
}

/// Pending order row, with the names the employee needs to hand it over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOrderDto {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub reward_id: i64,
    pub reward_name: String,
    pub quantity: i64,
    pub points_spent: i64,
    pub order_time: DateTime<Utc>,
}

impl From<PendingOrder> for PendingOrderDto {
    fn from(o: PendingOrder) -> Self {
        PendingOrderDto {
            id: o.id,
            customer_id: o.customer_id,
            customer_name: o.customer_name,
            reward_id: o.reward_id,
            reward_name: o.reward_name,
            quantity: o.quantity,
            points_spent: o.points_spent,
            order_time: o.order_time,
        }
    }
}

/// Outcome of a successful redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionDto {
    pub order_id: i64,
    pub quantity: i64,
    pub total_cost: i64,
    /// Customer after the deduction.
    pub customer: CustomerDto,
    pub reward: RewardDto,
}

/// Redeems `quantity` units of a reward for a customer.
///
/// ## Returns
/// * `Ok(RedemptionDto)` - Order created, points deducted
/// * `Err(ApiError)` - `INVALID_INPUT`, `NOT_FOUND` or `INSUFFICIENT_FUNDS`;
///   nothing was written
pub async fn redeem(
    shop: &ShopState,
    customer_id: i64,
    reward_id: i64,
    quantity: i64,
) -> Result<RedemptionDto, ApiError> {
    let Redemption {
        customer,
        reward,
        order_id,
        total_cost,
    } = shop.service().redeem(customer_id, reward_id, quantity).await?;

    Ok(RedemptionDto {
        order_id,
        quantity,
        total_cost: total_cost.value(),
        customer: customer.into(),
        reward: reward.into(),
    })
}

/// Lists pending orders, oldest first.
pub async fn list_pending_orders(shop: &ShopState) -> Result<Vec<PendingOrderDto>, ApiError> {
    let orders = shop.service().list_pending_orders().await?;
    debug!(count = orders.len(), "Listed pending orders");
    Ok(orders.into_iter().map(PendingOrderDto::from).collect())
}

/// Marks a pending order as handed over.
pub async fn fulfill_order(shop: &ShopState, order_id: i64) -> Result<OrderDto, ApiError> {
    let order = shop.service().fulfill_order(order_id).await?;
    Ok(order.into())
}

/// Cancels a pending order and returns the refunded customer.
pub async fn cancel_order(shop: &ShopState, order_id: i64) -> Result<CustomerDto, ApiError> {
    let customer = shop.service().cancel_order(order_id).await?;
    Ok(customer.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::customer::list_customers;
    use crate::commands::testing::seeded_shop;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_redeem_and_cancel_seeded_alice() {
        let shop = seeded_shop().await;
        // Alice (100) redeems 3 Booster Packs (20 each).
        let redemption = redeem(&shop, 1, 1, 3).await.unwrap();
        assert_eq!(redemption.reward.name, "Booster Pack");
        assert_eq!(redemption.total_cost, 60);
        assert_eq!(redemption.customer.points, 40);

        let pending = list_pending_orders(&shop).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].customer_name, "Alice");
        assert_eq!(pending[0].points_spent, 60);

        let alice = cancel_order(&shop, redemption.order_id).await.unwrap();
        assert_eq!(alice.points, 100);
        assert!(list_pending_orders(&shop).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bob_cannot_afford_two_playmats() {
        let shop = seeded_shop().await;
        let err = redeem(&shop, 2, 2, 2).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientFunds);
        assert_eq!(
            err.message,
            "Bob does not have enough points. Has 60, needs 100."
        );
        let bob = &list_customers(&shop).await.unwrap()[1];
        assert_eq!(bob.points, 60);
    }

    #[tokio::test]
    async fn test_fulfill_then_fulfill_again() {
        let shop = seeded_shop().await;
        let redemption = redeem(&shop, 3, 4, 1).await.unwrap();

        let order = fulfill_order(&shop, redemption.order_id).await.unwrap();
        assert_eq!(order.status, OrderStatus::Fulfilled);
        assert_eq!(order.points_spent, 40);

        let err = fulfill_order(&shop, redemption.order_id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
    }

    #[test]
    fn test_order_dto_serializes_status_lowercase() {
        let dto = OrderDto {
            id: 1,
            customer_id: 1,
            reward_id: 2,
            quantity: 3,
            points_spent: 60,
            order_time: DateTime::<Utc>::default(),
            status: OrderStatus::Cancelled,
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["status"], "cancelled");
        assert_eq!(json["pointsSpent"], 60);
    }
}
