//! # Repository Module
//!
//! Database repository implementations for the rewards shop.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Two Ways To Call A Repository                        │
//! │                                                                         │
//! │  Pool-scoped (one statement, one pooled connection):                   │
//! │      db.customers().get_by_id(1).await?                                │
//! │                                                                         │
//! │  Connection-scoped (several statements, one transaction):              │
//! │      let mut tx = db.begin().await?;                                   │
//! │      CustomerRepository::add_points_in(&mut tx, 1, -60).await?;        │
//! │      OrderRepository::insert_in(&mut tx, &order).await?;               │
//! │      tx.commit().await?;                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customers and balances
//! - [`reward::RewardRepository`] - Reward catalog
//! - [`order::OrderRepository`] - Redemption orders

pub mod customer;
pub mod order;
pub mod reward;
