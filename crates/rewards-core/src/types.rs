//! # Domain Types
//!
//! Core domain types used throughout the rewards shop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Reward      │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name           │   │  name           │   │  customer_id    │       │
//! │  │  email (unique) │   │  cost (> 0)     │   │  reward_id      │       │
//! │  │  points (>= 0)  │   │                 │   │  points_spent   │       │
//! │  └─────────────────┘   └─────────────────┘   │  status         │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  OrderStatus:  pending ──► fulfilled                                   │
//! │                   │                                                     │
//! │                   └──────► cancelled        (both terminal)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `Order.points_spent` freezes `cost × quantity` at redemption time. A later
//! change to the reward never changes what a refund gives back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::points::Points;

// =============================================================================
// Customer
// =============================================================================

/// A loyalty customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Unique across customers.
    pub email: String,
    /// Current balance, never negative.
    pub points: i64,
}

impl Customer {
    /// Returns the balance as a Points value.
    #[inline]
    pub fn balance(&self) -> Points {
        Points::new(self.points)
    }
}

/// Input for creating a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub points: i64,
}

// =============================================================================
// Reward
// =============================================================================

/// A catalog item that can be redeemed for points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Reward {
    pub id: i64,
    pub name: String,
    /// Price of a single unit, always positive.
    pub cost: i64,
}

impl Reward {
    /// Returns the unit price as a Points value.
    #[inline]
    pub fn unit_cost(&self) -> Points {
        Points::new(self.cost)
    }
}

/// Input for creating a reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReward {
    pub name: String,
    pub cost: i64,
}

// =============================================================================
// Order Status
// =============================================================================

/// The lifecycle state of a redemption order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Points deducted, waiting for staff.
    Pending,
    /// Handed over to the customer.
    Fulfilled,
    /// Reversed, points refunded.
    Cancelled,
}

impl OrderStatus {
    /// The lowercase name stored in the database.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Fulfilled => "fulfilled",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether no further transition is possible.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }

    /// Whether `self → next` is a legal transition.
    pub const fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Fulfilled)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }

    /// Validates a transition of order `order_id` and returns the new status.
    ///
    /// ## State Machine
    /// ```text
    /// pending ──fulfill──► fulfilled
    ///    │
    ///    └────cancel─────► cancelled
    ///
    /// anything else ──► InvalidOrderStatus
    /// ```
    pub fn transition_to(&self, order_id: i64, next: OrderStatus) -> CoreResult<OrderStatus> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidOrderStatus {
                order_id,
                current: *self,
            })
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order
// =============================================================================

/// A redemption order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub reward_id: i64,
    pub quantity: i64,
    /// `cost × quantity` at redemption time (frozen).
    pub points_spent: i64,
    pub order_time: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Returns the spent amount as a Points value.
    #[inline]
    pub fn spent(&self) -> Points {
        Points::new(self.points_spent)
    }
}

/// Input for inserting an order. Status always starts as pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer_id: i64,
    pub reward_id: i64,
    pub quantity: i64,
    pub points_spent: i64,
    pub order_time: DateTime<Utc>,
}

/// A pending order joined with display names, for the staff queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PendingOrder {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub reward_id: i64,
    pub reward_name: String,
    pub quantity: i64,
    pub points_spent: i64,
    pub status: OrderStatus,
    pub order_time: DateTime<Utc>,
}

// =============================================================================
// Redemption
// =============================================================================

/// Outcome of a successful redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redemption {
    /// Customer after the deduction.
    pub customer: Customer,
    pub reward: Reward,
    /// The pending order that was created.
    pub order_id: i64,
    pub total_cost: Points,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_transitions_from_pending() {
        let pending = OrderStatus::Pending;
        assert_eq!(
            pending.transition_to(1, OrderStatus::Fulfilled),
            Ok(OrderStatus::Fulfilled)
        );
        assert_eq!(
            pending.transition_to(1, OrderStatus::Cancelled),
            Ok(OrderStatus::Cancelled)
        );
        assert!(!pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn test_terminal_states_reject_everything() {
        for current in [OrderStatus::Fulfilled, OrderStatus::Cancelled] {
            assert!(current.is_terminal());
            for next in [
                OrderStatus::Pending,
                OrderStatus::Fulfilled,
                OrderStatus::Cancelled,
            ] {
                assert_eq!(
                    current.transition_to(9, next),
                    Err(CoreError::InvalidOrderStatus {
                        order_id: 9,
                        current
                    })
                );
            }
        }
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        assert_eq!(OrderStatus::Fulfilled.to_string(), "fulfilled");
    }
}
