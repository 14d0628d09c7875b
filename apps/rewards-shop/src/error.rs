//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Rewards Shop                       │
//! │                                                                         │
//! │  Console line: "redeem 2 2 2"                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  ShopError::kind() ─── InsufficientFunds ─────► ApiError        │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage? ─── details logged, generic message ─► ApiError       │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Console prints:                                                        │
//! │    Error: Bob does not have enough points. Has 60, needs 100.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Errors are serializable with a machine-readable `code` and a
//! human-readable `message`.

use serde::Serialize;
use tracing::error;

use rewards_service::{ErrorKind, ShopError};

/// API error returned from commands.
///
/// ```json
/// {
///   "code": "INSUFFICIENT_FUNDS",
///   "message": "Bob does not have enough points. Has 60, needs 100."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or out-of-range input
    InvalidInput,

    /// Customer, reward or order not found
    NotFound,

    /// Balance too low for a redemption
    InsufficientFunds,

    /// Order not pending, or record still referenced
    InvalidState,

    /// Database operation failed
    DatabaseError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidInput, message)
    }
}

impl From<ErrorKind> for ErrorCode {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidInput => ErrorCode::InvalidInput,
            ErrorKind::NotFound => ErrorCode::NotFound,
            ErrorKind::InsufficientFunds => ErrorCode::InsufficientFunds,
            ErrorKind::InvalidState => ErrorCode::InvalidState,
            ErrorKind::Storage => ErrorCode::DatabaseError,
        }
    }
}

/// Converts service errors to API errors.
impl From<ShopError> for ApiError {
    fn from(err: ShopError) -> Self {
        let code = ErrorCode::from(err.kind());
        match code {
            ErrorCode::DatabaseError => {
                // Log the actual error but return a generic message
                error!("Database operation failed: {}", err);
                ApiError::new(code, "Database operation failed")
            }
            _ => ApiError::new(code, err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rewards_core::{CoreError, ValidationError};
    use rewards_db::DbError;

    #[test]
    fn test_business_errors_keep_message() {
        let err = ApiError::from(ShopError::from(CoreError::InsufficientPoints {
            customer: "Bob".to_string(),
            available: 60,
            required: 100,
        }));
        assert_eq!(err.code, ErrorCode::InsufficientFunds);
        assert_eq!(
            err.message,
            "Bob does not have enough points. Has 60, needs 100."
        );

        let err = ApiError::from(ShopError::from(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "quantity must be greater than 0");
    }

    #[test]
    fn test_storage_errors_are_generic() {
        let err = ApiError::from(ShopError::from(DbError::PoolExhausted));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::new(ErrorCode::InvalidState, "Order 3 is not pending");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INVALID_STATE");
        assert_eq!(json["message"], "Order 3 is not pending");
    }
}
