//! # Error Types
//!
//! Domain-specific error types for rewards-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rewards-core errors (this file)                                       │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rewards-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  rewards-service errors                                                │
//! │  └── ShopError        - CoreError | DbError, classified by kind        │
//! │                                                                         │
//! │  app errors                                                            │
//! │  └── ApiError         - What the console shows (serializable)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ShopError → ApiError → Console    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule errors.
///
/// These errors represent rule violations detected before (or instead of)
/// touching storage. They are translated to user-facing messages by the app.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Customer cannot be found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(i64),

    /// Reward cannot be found.
    #[error("Reward not found: {0}")]
    RewardNotFound(i64),

    /// Order cannot be found.
    #[error("Order not found: {0}")]
    OrderNotFound(i64),

    /// Customer balance is lower than the redemption total.
    ///
    /// ## User Workflow
    /// ```text
    /// Redeem Playmat × 2 (cost 50)
    ///      │
    ///      ▼
    /// Bob has 60, needs 100
    ///      │
    ///      ▼
    /// InsufficientPoints { customer: "Bob", available: 60, required: 100 }
    ///      │
    ///      ▼
    /// Console shows: "Bob does not have enough points. Has 60, needs 100."
    /// ```
    #[error("{customer} does not have enough points. Has {available}, needs {required}.")]
    InsufficientPoints {
        customer: String,
        available: i64,
        required: i64,
    },

    /// Order is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Fulfilling an order that was already fulfilled or cancelled
    /// - Cancelling an order that was already fulfilled or cancelled
    #[error("Order {order_id} is not pending (current status: {current})")]
    InvalidOrderStatus { order_id: i64, current: OrderStatus },

    /// A customer or reward cannot be deleted while orders reference it.
    #[error("{entity} {id} cannot be deleted while it has orders")]
    HasOrders { entity: String, id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g., an email without "@").
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Arithmetic on the value would overflow.
    #[error("{field} is too large")]
    Overflow { field: String },

    /// Duplicate value (e.g., an email already registered).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientPoints {
            customer: "Bob".to_string(),
            available: 60,
            required: 100,
        };
        assert_eq!(
            err.to_string(),
            "Bob does not have enough points. Has 60, needs 100."
        );

        let err = CoreError::InvalidOrderStatus {
            order_id: 7,
            current: OrderStatus::Fulfilled,
        };
        assert_eq!(
            err.to_string(),
            "Order 7 is not pending (current status: fulfilled)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be greater than 0");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "points".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "points cannot be negative");
    }
}
