//! # rewards-service: Rule Service for the Rewards Shop
//!
//! [`RewardShopService`] is the only entry point the app uses. It enforces
//! the shop's invariants before any write:
//!
//! - a balance never goes negative through redemption
//! - `points_spent` is captured once, at redemption
//! - an order leaves `pending` exactly once
//! - cancelling refunds exactly `points_spent`
//!
//! ## Error Taxonomy
//! Every failure is a [`ShopError`]; [`ShopError::kind`] sorts it into
//! InvalidInput, NotFound, InsufficientFunds, InvalidState or Storage.

pub mod error;
pub mod service;

pub use error::{ErrorKind, ShopError, ShopResult};
pub use service::RewardShopService;
