//! # rewards-core: Pure Business Logic for the Rewards Shop
//!
//! This crate holds the rules of the loyalty shop as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Rewards Shop Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Console (apps/rewards-shop)                     │   │
//! │  │    customers ──► redeem ──► pending orders ──► fulfil/cancel    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               rewards-service (RewardShopService)               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rewards-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  points   │  │   rules   │  │ validation│  │   │
//! │  │   │ Customer  │  │  Points   │  │ redemption│  │  inputs   │  │   │
//! │  │   │  Order    │  │ checked × │  │ transition│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • PURE FUNCTIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 rewards-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (Customer, Reward, Order, OrderStatus)
//! - [`points`] - Points type with checked arithmetic
//! - [`rules`] - Redemption planning and order transitions
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types

pub mod error;
pub mod points;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use points::Points;
pub use rules::RedemptionPlan;
pub use types::*;
