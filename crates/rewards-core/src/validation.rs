//! # Validation Module
//!
//! Input validation for the rewards shop.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console                                                      │
//! │  └── Parses whole numbers, reports unparseable input                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Rule service                                                 │
//! │  └── THIS MODULE: trimming, required fields, sign checks               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE(email)                                                     │
//! │  └── Foreign keys from orders                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rewards_core::validation::{validate_email, validate_quantity};
//!
//! assert_eq!(validate_email("  alice@example.com ").unwrap(), "alice@example.com");
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewCustomer, NewReward};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_name(field: &str, name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(name.to_string())
}

/// Validates an email address and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must contain "@"
///
/// Uniqueness is enforced by the database.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if !email.contains('@') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must contain '@'".to_string(),
        });
    }

    Ok(email.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a redemption quantity (at least 1).
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates points issued to a customer (strictly positive).
pub fn validate_issued_points(points: i64) -> ValidationResult<()> {
    if points <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "points".to_string(),
        });
    }

    Ok(())
}

/// Validates the opening balance of a new customer (zero allowed).
pub fn validate_opening_balance(points: i64) -> ValidationResult<()> {
    if points < 0 {
        return Err(ValidationError::Negative {
            field: "points".to_string(),
        });
    }

    Ok(())
}

/// Validates a reward unit cost (strictly positive).
pub fn validate_cost(cost: i64) -> ValidationResult<()> {
    if cost <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "cost".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a new customer and returns the normalized (trimmed) input.
pub fn validate_new_customer(input: &NewCustomer) -> ValidationResult<NewCustomer> {
    let name = validate_name("name", &input.name)?;
    let email = validate_email(&input.email)?;
    validate_opening_balance(input.points)?;

    Ok(NewCustomer {
        name,
        email,
        points: input.points,
    })
}

/// Validates a new reward and returns the normalized (trimmed) input.
pub fn validate_new_reward(input: &NewReward) -> ValidationResult<NewReward> {
    let name = validate_name("reward name", &input.name)?;
    validate_cost(input.cost)?;

    Ok(NewReward {
        name,
        cost: input.cost,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("name", "  Dana ").unwrap(), "Dana");
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b").is_ok());
        assert_eq!(
            validate_email("").unwrap_err(),
            ValidationError::Required {
                field: "email".to_string()
            }
        );
        assert!(matches!(
            validate_email("not-an-email"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1000).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
    }

    #[test]
    fn test_validate_issued_points() {
        assert!(validate_issued_points(1).is_ok());
        assert!(validate_issued_points(0).is_err());
        assert!(validate_issued_points(-10).is_err());
    }

    #[test]
    fn test_validate_opening_balance() {
        assert!(validate_opening_balance(0).is_ok());
        assert!(validate_opening_balance(250).is_ok());
        assert!(validate_opening_balance(-1).is_err());
    }

    #[test]
    fn test_validate_cost() {
        assert!(validate_cost(15).is_ok());
        assert!(validate_cost(0).is_err());
        assert!(validate_cost(-5).is_err());
    }

    #[test]
    fn test_validate_new_customer_trims() {
        let input = NewCustomer {
            name: " Dana ".to_string(),
            email: " dana@example.com".to_string(),
            points: 0,
        };
        let normalized = validate_new_customer(&input).unwrap();
        assert_eq!(normalized.name, "Dana");
        assert_eq!(normalized.email, "dana@example.com");
    }

    #[test]
    fn test_validate_new_reward() {
        let ok = NewReward {
            name: "Dice Set".to_string(),
            cost: 10,
        };
        assert!(validate_new_reward(&ok).is_ok());

        let blank = NewReward {
            name: "  ".to_string(),
            cost: 10,
        };
        assert_eq!(
            validate_new_reward(&blank).unwrap_err().to_string(),
            "reward name is required"
        );
    }
}
