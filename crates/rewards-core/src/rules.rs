//! # Business Rules
//!
//! Pure decision functions for redemption and order processing. The rule
//! service loads records, asks these functions what to do, then writes.
//!
//! ```text
//! redeem(customer, reward, qty)
//!      │
//!      ├── qty < 1 ?                  → Validation(MustBePositive)
//!      ├── cost × qty overflows ?     → Validation(Overflow)
//!      ├── balance < cost × qty ?     → InsufficientPoints
//!      └── OK → RedemptionPlan { total_cost, new_balance }
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::points::Points;
use crate::types::{Customer, Order, OrderStatus, Reward};
use crate::validation::validate_quantity;

/// What a redemption will do to the customer's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedemptionPlan {
    pub total_cost: Points,
    pub new_balance: Points,
}

/// Decides whether `customer` can redeem `quantity` units of `reward`.
///
/// ## Example
/// ```rust
/// use rewards_core::{rules::plan_redemption, Customer, Reward};
///
/// let alice = Customer {
///     id: 1,
///     name: "Alice".into(),
///     email: "alice@example.com".into(),
///     points: 100,
/// };
/// let pack = Reward { id: 1, name: "Booster Pack".into(), cost: 20 };
///
/// let plan = plan_redemption(&alice, &pack, 3).unwrap();
/// assert_eq!(plan.total_cost.value(), 60);
/// assert_eq!(plan.new_balance.value(), 40);
/// ```
pub fn plan_redemption(
    customer: &Customer,
    reward: &Reward,
    quantity: i64,
) -> CoreResult<RedemptionPlan> {
    validate_quantity(quantity)?;

    let total_cost = reward
        .unit_cost()
        .checked_times(quantity)
        .ok_or_else(|| ValidationError::Overflow {
            field: "quantity".to_string(),
        })?;

    let balance = customer.balance();
    if !balance.covers(total_cost) {
        return Err(CoreError::InsufficientPoints {
            customer: customer.name.clone(),
            available: balance.value(),
            required: total_cost.value(),
        });
    }

    Ok(RedemptionPlan {
        total_cost,
        new_balance: balance - total_cost,
    })
}

/// Checks that `order` may be fulfilled. No balance change follows.
pub fn check_fulfill(order: &Order) -> CoreResult<OrderStatus> {
    order.status.transition_to(order.id, OrderStatus::Fulfilled)
}

/// Checks that `order` may be cancelled and returns the refund owed.
pub fn check_cancel(order: &Order) -> CoreResult<Points> {
    order.status.transition_to(order.id, OrderStatus::Cancelled)?;
    Ok(order.spent())
}

// =============================================================================
// Unit Tests
// =============================================================================
