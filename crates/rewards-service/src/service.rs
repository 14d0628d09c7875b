//! # Reward Shop Service
//!
//! Business operations of the shop, each one a single transaction.
//!
//! ## Redemption
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  redeem(customer_id, reward_id, quantity)                               │
//! │       │                                                                 │
//! │       ├── quantity < 1 ? ──────────────────────► InvalidInput          │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │       ├── load customer ── missing ? ──────────► NotFound              │
//! │       ├── load reward ──── missing ? ──────────► NotFound              │
//! │       ├── plan: cost × qty ≤ balance ? ── no ──► InsufficientFunds     │
//! │       ├── UPDATE points − total (guarded)                               │
//! │       ├── INSERT order (pending, points_spent = total)                  │
//! │  COMMIT                                                                 │
//! │       ▼                                                                 │
//! │  Redemption { customer, reward, order_id, total_cost }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any `?` between BEGIN and COMMIT drops the transaction, which rolls
//! back every statement already executed.

use chrono::Utc;
use sqlx::SqliteConnection;
use tracing::{debug, info, warn};

use crate::error::{ShopError, ShopResult};
use rewards_core::rules::{check_cancel, check_fulfill, plan_redemption};
use rewards_core::validation::{
    validate_issued_points, validate_new_customer, validate_new_reward, validate_quantity,
};
use rewards_core::{
    CoreError, Customer, NewCustomer, NewOrder, NewReward, Order, OrderStatus, PendingOrder,
    Redemption, Reward, ValidationError,
};
use rewards_db::{CustomerRepository, Database, DbError, OrderRepository, RewardRepository};

/// The rule service. Cheap to clone (wraps a pool handle).
#[derive(Debug, Clone)]
pub struct RewardShopService {
    db: Database,
}

impl RewardShopService {
    /// Creates a service over an opened database.
    pub fn new(db: Database) -> Self {
        RewardShopService { db }
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All customers, ordered by name.
    pub async fn list_customers(&self) -> ShopResult<Vec<Customer>> {
        Ok(self.db.customers().list_all().await?)
    }

    /// All rewards, cheapest first.
    pub async fn list_rewards(&self) -> ShopResult<Vec<Reward>> {
        Ok(self.db.rewards().list_all().await?)
    }

    pub async fn get_customer(&self, id: i64) -> ShopResult<Option<Customer>> {
        Ok(self.db.customers().get_by_id(id).await?)
    }

    pub async fn get_reward(&self, id: i64) -> ShopResult<Option<Reward>> {
        Ok(self.db.rewards().get_by_id(id).await?)
    }

    pub async fn get_order(&self, id: i64) -> ShopResult<Option<Order>> {
        Ok(self.db.orders().get_by_id(id).await?)
    }

    /// Pending orders with display names, oldest first.
    pub async fn list_pending_orders(&self) -> ShopResult<Vec<PendingOrder>> {
        Ok(self.db.orders().list_pending_with_names().await?)
    }

    // =========================================================================
    // Customer-facing: redemption
    // =========================================================================

    /// Exchanges `quantity` units of a reward for points.
    pub async fn redeem(
        &self,
        customer_id: i64,
        reward_id: i64,
        quantity: i64,
    ) -> ShopResult<Redemption> {
        self.redeem_tx(customer_id, reward_id, quantity)
            .await
            .inspect_err(|e| {
                warn!(customer_id, reward_id, quantity, error = %e, "Redemption rejected")
            })
    }

    async fn redeem_tx(
        &self,
        customer_id: i64,
        reward_id: i64,
        quantity: i64,
    ) -> ShopResult<Redemption> {
        validate_quantity(quantity)?;

        let mut tx = self.db.begin().await?;

        let customer = load_customer(&mut tx, customer_id).await?;
        let reward = RewardRepository::get_by_id_in(&mut tx, reward_id)
            .await?
            .ok_or(CoreError::RewardNotFound(reward_id))?;

        let plan = plan_redemption(&customer, &reward, quantity)?;
        debug!(
            customer_id,
            total_cost = plan.total_cost.value(),
            new_balance = plan.new_balance.value(),
            "Redemption planned"
        );

        let deducted =
            CustomerRepository::add_points_in(&mut tx, customer_id, -plan.total_cost.value())
                .await?;
        if !deducted {
            // The balance moved between the read and the write.
            let current = load_customer(&mut tx, customer_id).await?;
            return Err(CoreError::InsufficientPoints {
                customer: current.name,
                available: current.points,
                required: plan.total_cost.value(),
            }
            .into());
        }

        let order = OrderRepository::insert_in(
            &mut tx,
            &NewOrder {
                customer_id,
                reward_id,
                quantity,
                points_spent: plan.total_cost.value(),
                order_time: Utc::now(),
            },
        )
        .await?;

        let customer = load_customer(&mut tx, customer_id).await?;
        tx.commit().await?;

        info!(
            customer_id,
            reward_id,
            quantity,
            order_id = order.id,
            total_cost = plan.total_cost.value(),
            balance = customer.points,
            "Reward redeemed"
        );

        Ok(Redemption {
            customer,
            reward,
            order_id: order.id,
            total_cost: plan.total_cost,
        })
    }

    // =========================================================================
    // Employee operations
    // =========================================================================

    /// Adds points to a customer's balance.
    pub async fn issue_points(&self, customer_id: i64, points: i64) -> ShopResult<Customer> {
        self.issue_points_tx(customer_id, points)
            .await
            .inspect_err(|e| warn!(customer_id, points, error = %e, "Issuing points rejected"))
    }

    async fn issue_points_tx(&self, customer_id: i64, points: i64) -> ShopResult<Customer> {
        validate_issued_points(points)?;

        let mut tx = self.db.begin().await?;

        let customer = load_customer(&mut tx, customer_id).await?;
        customer
            .balance()
            .checked_add(points.into())
            .ok_or_else(|| ValidationError::Overflow {
                field: "points".to_string(),
            })?;

        if !CustomerRepository::add_points_in(&mut tx, customer_id, points).await? {
            return Err(CoreError::CustomerNotFound(customer_id).into());
        }

        let customer = load_customer(&mut tx, customer_id).await?;
        tx.commit().await?;

        info!(customer_id, points, balance = customer.points, "Points issued");
        Ok(customer)
    }

    /// Marks a pending order as handed over. The balance is untouched.
    pub async fn fulfill_order(&self, order_id: i64) -> ShopResult<Order> {
        self.fulfill_order_tx(order_id)
            .await
            .inspect_err(|e| warn!(order_id, error = %e, "Fulfilment rejected"))
    }

    async fn fulfill_order_tx(&self, order_id: i64) -> ShopResult<Order> {
        let mut tx = self.db.begin().await?;

        let order = load_order(&mut tx, order_id).await?;
        let next = check_fulfill(&order)?;

        transition(&mut tx, order_id, next).await?;

        let order = load_order(&mut tx, order_id).await?;
        tx.commit().await?;

        info!(order_id, customer_id = order.customer_id, "Order fulfilled");
        Ok(order)
    }

    /// Reverses a pending order and refunds its `points_spent`.
    pub async fn cancel_order(&self, order_id: i64) -> ShopResult<Customer> {
        self.cancel_order_tx(order_id)
            .await
            .inspect_err(|e| warn!(order_id, error = %e, "Cancellation rejected"))
    }

    async fn cancel_order_tx(&self, order_id: i64) -> ShopResult<Customer> {
        let mut tx = self.db.begin().await?;

        let order = load_order(&mut tx, order_id).await?;
        let refund = check_cancel(&order)?;
        let customer = load_customer(&mut tx, order.customer_id).await?;
        customer
            .balance()
            .checked_add(refund)
            .ok_or_else(|| ValidationError::Overflow {
                field: "points".to_string(),
            })?;

        // Status first: a second cancel cannot get past this guard, so it
        // can never refund twice.
        transition(&mut tx, order_id, OrderStatus::Cancelled).await?;

        if !CustomerRepository::add_points_in(&mut tx, order.customer_id, refund.value()).await? {
            return Err(CoreError::CustomerNotFound(order.customer_id).into());
        }

        let customer = load_customer(&mut tx, order.customer_id).await?;
        tx.commit().await?;

        info!(
            order_id,
            customer_id = customer.id,
            refund = refund.value(),
            balance = customer.points,
            "Order cancelled"
        );
        Ok(customer)
    }

    // =========================================================================
    // Admin operations
    // =========================================================================

    /// Creates a customer after trimming and validating the input.
    pub async fn add_customer(&self, name: &str, email: &str, points: i64) -> ShopResult<Customer> {
        let input = validate_new_customer(&NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
            points,
        })?;

        let customer = self
            .db
            .customers()
            .insert(&input)
            .await
            .map_err(|e| match e {
                DbError::UniqueViolation { field, value } => {
                    ShopError::from(ValidationError::Duplicate { field, value })
                }
                other => other.into(),
            })?;

        info!(customer_id = customer.id, email = %customer.email, "Customer added");
        Ok(customer)
    }

    /// Deletes a customer that has no orders.
    pub async fn delete_customer(&self, id: i64) -> ShopResult<()> {
        self.db
            .customers()
            .delete(id)
            .await
            .map_err(|e| classify_delete(e, "Customer", id, CoreError::CustomerNotFound(id)))?;

        info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    /// Creates a reward after trimming and validating the input.
    pub async fn add_reward(&self, name: &str, cost: i64) -> ShopResult<Reward> {
        let input = validate_new_reward(&NewReward {
            name: name.to_string(),
            cost,
        })?;

        let reward = self.db.rewards().insert(&input).await?;

        info!(reward_id = reward.id, cost = reward.cost, "Reward added");
        Ok(reward)
    }

    /// Deletes a reward that has no orders.
    pub async fn delete_reward(&self, id: i64) -> ShopResult<()> {
        self.db
            .rewards()
            .delete(id)
            .await
            .map_err(|e| classify_delete(e, "Reward", id, CoreError::RewardNotFound(id)))?;

        info!(reward_id = id, "Reward deleted");
        Ok(())
    }
}

// =============================================================================
// Transaction helpers
// =============================================================================

async fn load_customer(conn: &mut SqliteConnection, id: i64) -> ShopResult<Customer> {
    CustomerRepository::get_by_id_in(conn, id)
        .await?
        .ok_or_else(|| CoreError::CustomerNotFound(id).into())
}

async fn load_order(conn: &mut SqliteConnection, id: i64) -> ShopResult<Order> {
    OrderRepository::get_by_id_in(conn, id)
        .await?
        .ok_or_else(|| CoreError::OrderNotFound(id).into())
}

/// Moves a pending order to `next`, re-classifying a lost guard.
async fn transition(
    conn: &mut SqliteConnection,
    order_id: i64,
    next: OrderStatus,
) -> ShopResult<()> {
    if OrderRepository::update_status_in(conn, order_id, OrderStatus::Pending, next).await? {
        return Ok(());
    }

    let current = load_order(conn, order_id).await?;
    Err(CoreError::InvalidOrderStatus {
        order_id,
        current: current.status,
    }
    .into())
}

fn classify_delete(err: DbError, entity: &str, id: i64, not_found: CoreError) -> ShopError {
    match err {
        DbError::NotFound { .. } => not_found.into(),
        DbError::ForeignKeyViolation { .. } => CoreError::HasOrders {
            entity: entity.to_string(),
            id,
        }
        .into(),
        other => other.into(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
