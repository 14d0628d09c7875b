//! # Points Module
//!
//! Provides the `Points` type for loyalty balances and reward prices.
//!
//! ## Why a Newtype?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHERE POINTS FLOW                                                      │
//! │                                                                         │
//! │  Reward.cost × quantity ──► total cost ──► Customer.points - total      │
//! │                                   │                                     │
//! │                                   └──► Order.points_spent (frozen)      │
//! │                                                                         │
//! │  Order.points_spent ──► refund on cancel ──► Customer.points + spent    │
//! │                                                                         │
//! │  Every multiplication is checked: an overflowing total is an error,     │
//! │  never a wrapped (negative) price.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rewards_core::points::Points;
//!
//! let cost = Points::new(20);
//! let total = cost.checked_times(3).unwrap();
//! assert_eq!(total.value(), 60);
//!
//! let balance = Points::new(100);
//! assert!(balance.covers(total));
//! assert_eq!((balance - total).value(), 40);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// An amount of loyalty points.
///
/// Signed so that deltas (refunds, deductions) can be expressed, but stored
/// balances are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Points(i64);

impl Points {
    /// Creates a points amount.
    #[inline]
    pub const fn new(value: i64) -> Self {
        Points(value)
    }

    /// Returns the raw integer amount.
    #[inline]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// Returns `None` on overflow.
    pub fn checked_times(&self, quantity: i64) -> Option<Points> {
        self.0.checked_mul(quantity).map(Points)
    }

    /// Adds two amounts, returning `None` on overflow.
    pub fn checked_add(&self, other: Points) -> Option<Points> {
        self.0.checked_add(other.0).map(Points)
    }

    /// Whether this balance is large enough to pay `price`.
    #[inline]
    pub fn covers(&self, price: Points) -> bool {
        self.0 >= price.0
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} pts", self.0)
    }
}

impl From<i64> for Points {
    fn from(value: i64) -> Self {
        Points(value)
    }
}

impl Sub for Points {
    type Output = Points;

    fn sub(self, rhs: Points) -> Points {
        Points(self.0 - rhs.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_times() {
        assert_eq!(Points::new(20).checked_times(3), Some(Points::new(60)));
        assert_eq!(Points::new(15).checked_times(1), Some(Points::new(15)));
        assert_eq!(Points::new(i64::MAX).checked_times(2), None);
    }

    #[test]
    fn test_covers_is_inclusive() {
        let balance = Points::new(60);
        assert!(balance.covers(Points::new(60)));
        assert!(balance.covers(Points::new(59)));
        assert!(!balance.covers(Points::new(61)));
    }

    #[test]
    fn test_refund_restores_balance() {
        let balance = Points::new(100) - Points::new(60);
        assert_eq!(balance, Points::new(40));
        assert_eq!(balance.checked_add(Points::new(60)), Some(Points::new(100)));
        assert_eq!(Points::new(i64::MAX).checked_add(Points::new(1)), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Points::new(250).to_string(), "250 pts");
    }
}
