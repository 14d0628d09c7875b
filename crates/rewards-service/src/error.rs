//! # Service Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ShopError                         ErrorKind                            │
//! │  ─────────                         ─────────                            │
//! │  Core(Validation(..))         ──►  InvalidInput                         │
//! │  Core(*NotFound)              ──►  NotFound                             │
//! │  Core(InsufficientPoints)     ──►  InsufficientFunds                    │
//! │  Core(InvalidOrderStatus)     ──►  InvalidState                         │
//! │  Core(HasOrders)              ──►  InvalidState                         │
//! │  Db(UniqueViolation|Check)    ──►  InvalidInput                         │
//! │  Db(NotFound)                 ──►  NotFound                             │
//! │  Db(ForeignKeyViolation)      ──►  InvalidState                         │
//! │  Db(anything else)            ──►  Storage                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rewards_core::{CoreError, ValidationError};
use rewards_db::DbError;
use std::fmt;
use thiserror::Error;

/// Failure of a rule service operation.
#[derive(Debug, Error)]
pub enum ShopError {
    /// A business rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failed or rejected the write.
    #[error(transparent)]
    Db(#[from] DbError),
}

/// The shop's error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or out-of-range arguments.
    InvalidInput,
    /// Referenced customer, reward or order is absent.
    NotFound,
    /// Balance too low for a redemption.
    InsufficientFunds,
    /// Order not pending, or record still referenced.
    InvalidState,
    /// Database unavailable or failing.
    Storage,
}

impl ShopError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShopError::Core(err) => match err {
                CoreError::Validation(_) => ErrorKind::InvalidInput,
                CoreError::CustomerNotFound(_)
                | CoreError::RewardNotFound(_)
                | CoreError::OrderNotFound(_) => ErrorKind::NotFound,
                CoreError::InsufficientPoints { .. } => ErrorKind::InsufficientFunds,
                CoreError::InvalidOrderStatus { .. } | CoreError::HasOrders { .. } => {
                    ErrorKind::InvalidState
                }
            },
            ShopError::Db(err) => match err {
                DbError::UniqueViolation { .. } | DbError::CheckViolation { .. } => {
                    ErrorKind::InvalidInput
                }
                DbError::NotFound { .. } => ErrorKind::NotFound,
                DbError::ForeignKeyViolation { .. } => ErrorKind::InvalidState,
                _ => ErrorKind::Storage,
            },
        }
    }
}

impl From<ValidationError> for ShopError {
    fn from(err: ValidationError) -> Self {
        ShopError::Core(CoreError::Validation(err))
    }
}

impl From<sqlx::Error> for ShopError {
    fn from(err: sqlx::Error) -> Self {
        ShopError::Db(DbError::from(err))
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::NotFound => "not found",
            ErrorKind::InsufficientFunds => "insufficient funds",
            ErrorKind::InvalidState => "invalid state",
            ErrorKind::Storage => "storage",
        };
        f.write_str(name)
    }
}

/// Result type for rule service operations.
pub type ShopResult<T> = Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rewards_core::OrderStatus;

    #[test]
    fn test_core_kinds() {
        let cases = [
            (
                ShopError::from(ValidationError::MustBePositive {
                    field: "quantity".to_string(),
                }),
                ErrorKind::InvalidInput,
            ),
            (
                ShopError::from(CoreError::OrderNotFound(3)),
                ErrorKind::NotFound,
            ),
            (
                ShopError::from(CoreError::InsufficientPoints {
                    customer: "Bob".to_string(),
                    available: 1,
                    required: 2,
                }),
                ErrorKind::InsufficientFunds,
            ),
            (
                ShopError::from(CoreError::InvalidOrderStatus {
                    order_id: 3,
                    current: OrderStatus::Cancelled,
                }),
                ErrorKind::InvalidState,
            ),
        ];

        for (err, kind) in cases {
            assert_eq!(err.kind(), kind, "{err}");
        }
    }

    #[test]
    fn test_db_kinds() {
        assert_eq!(
            ShopError::from(DbError::duplicate("email", "a@b")).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            ShopError::from(DbError::PoolExhausted).kind(),
            ErrorKind::Storage
        );
        assert_eq!(
            ShopError::from(DbError::ForeignKeyViolation {
                message: "FOREIGN KEY constraint failed".to_string()
            })
            .kind(),
            ErrorKind::InvalidState
        );
    }

    #[test]
    fn test_message_is_transparent() {
        let err = ShopError::from(CoreError::CustomerNotFound(9));
        assert_eq!(err.to_string(), "Customer not found: 9");
    }
}
