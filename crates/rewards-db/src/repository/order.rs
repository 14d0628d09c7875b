//! # Order Repository
//!
//! Database operations for redemption orders.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. REDEEM                                                             │
//! │     └── insert_in() → Order { status: pending }                        │
//! │         (same transaction as the points deduction)                     │
//! │                                                                         │
//! │  2a. FULFIL                                                            │
//! │     └── update_status_in(pending → fulfilled)                          │
//! │                                                                         │
//! │  2b. CANCEL                                                            │
//! │     └── update_status_in(pending → cancelled) + refund                 │
//! │                                                                         │
//! │  Status writes are guarded on the expected current status, so a        │
//! │  second fulfil/cancel of the same order affects zero rows.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use rewards_core::{NewOrder, Order, OrderStatus, PendingOrder};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let mut conn = self.pool.acquire().await?;
        Self::get_by_id_in(&mut conn, id).await
    }

    /// Lists pending orders with customer and reward names, oldest first.
    pub async fn list_pending_with_names(&self) -> DbResult<Vec<PendingOrder>> {
        let orders = sqlx::query_as::<_, PendingOrder>(
            r#"
            SELECT
                o.id,
                o.customer_id,
                c.name AS customer_name,
                o.reward_id,
                r.name AS reward_name,
                o.quantity,
                o.points_spent,
                o.status,
                o.order_time
            FROM orders AS o
            JOIN customers AS c ON o.customer_id = c.id
            JOIN rewards   AS r ON o.reward_id   = r.id
            WHERE o.status = 'pending'
            ORDER BY o.order_time ASC, o.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Inserts a pending order.
    pub async fn insert(&self, order: &NewOrder) -> DbResult<Order> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_in(&mut conn, order).await
    }

    /// Moves an order from `from` to `to`; see [`Self::update_status_in`].
    pub async fn update_status(
        &self,
        id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> DbResult<bool> {
        let mut conn = self.pool.acquire().await?;
        Self::update_status_in(&mut conn, id, from, to).await
    }

    // -------------------------------------------------------------------------
    // Connection-level forms (usable inside a transaction)
    // -------------------------------------------------------------------------

    /// Gets an order by ID on the given connection.
    pub async fn get_by_id_in(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, reward_id, quantity, points_spent, order_time, status
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(order)
    }

    /// Inserts an order on the given connection; status takes the schema
    /// default (`pending`).
    pub async fn insert_in(conn: &mut SqliteConnection, order: &NewOrder) -> DbResult<Order> {
        debug!(
            customer_id = order.customer_id,
            reward_id = order.reward_id,
            quantity = order.quantity,
            points_spent = order.points_spent,
            "Inserting order"
        );

        let stored = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (customer_id, reward_id, quantity, points_spent, order_time)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, customer_id, reward_id, quantity, points_spent, order_time, status
            "#,
        )
        .bind(order.customer_id)
        .bind(order.reward_id)
        .bind(order.quantity)
        .bind(order.points_spent)
        .bind(format_order_time(order.order_time))
        .fetch_one(&mut *conn)
        .await?;

        Ok(stored)
    }

    /// Sets the status to `to` only if it is currently `from`.
    ///
    /// ## Returns
    /// * `Ok(true)` - Status changed
    /// * `Ok(false)` - Order missing or not in `from`; nothing written
    pub async fn update_status_in(
        conn: &mut SqliteConnection,
        id: i64,
        from: OrderStatus,
        to: OrderStatus,
    ) -> DbResult<bool> {
        debug!(order_id = id, %from, %to, "Updating order status");

        let result = sqlx::query("UPDATE orders SET status = ?3 WHERE id = ?1 AND status = ?2")
            .bind(id)
            .bind(from)
            .bind(to)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}

/// Fixed-width UTC timestamp so that text ordering matches time ordering.
fn format_order_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, TimeZone};
    use rewards_core::{NewCustomer, NewReward};

    struct Fixture {
        db: Database,
        customer_id: i64,
        other_customer_id: i64,
        reward_id: i64,
    }

    async fn setup() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let alice = db
            .customers()
            .insert(&NewCustomer {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                points: 100,
            })
            .await
            .unwrap();
        let bob = db
            .customers()
            .insert(&NewCustomer {
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
                points: 60,
            })
            .await
            .unwrap();
        let reward = db
            .rewards()
            .insert(&NewReward {
                name: "Booster Pack".to_string(),
                cost: 20,
            })
            .await
            .unwrap();

        Fixture {
            db,
            customer_id: alice.id,
            other_customer_id: bob.id,
            reward_id: reward.id,
        }
    }

    fn new_order(customer_id: i64, reward_id: i64, at: DateTime<Utc>) -> NewOrder {
        NewOrder {
            customer_id,
            reward_id,
            quantity: 3,
            points_spent: 60,
            order_time: at,
        }
    }

    #[tokio::test]
    async fn test_insert_defaults_to_pending() {
        let fx = setup().await;
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();

        let order = fx
            .db
            .orders()
            .insert(&new_order(fx.customer_id, fx.reward_id, at))
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.points_spent, 60);
        assert_eq!(order.order_time, at);
        assert_eq!(fx.db.orders().get_by_id(order.id).await.unwrap(), Some(order));
    }

    #[tokio::test]
    async fn test_pending_list_is_oldest_first_with_names() {
        let fx = setup().await;
        let repo = fx.db.orders();
        let base = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();

        let later = repo
            .insert(&new_order(fx.customer_id, fx.reward_id, base + Duration::minutes(5)))
            .await
            .unwrap();
        let earlier = repo
            .insert(&new_order(fx.other_customer_id, fx.reward_id, base))
            .await
            .unwrap();
        let done = repo
            .insert(&new_order(fx.customer_id, fx.reward_id, base - Duration::minutes(5)))
            .await
            .unwrap();
        assert!(repo
            .update_status(done.id, OrderStatus::Pending, OrderStatus::Fulfilled)
            .await
            .unwrap());

        let pending = repo.list_pending_with_names().await.unwrap();
        let ids: Vec<i64> = pending.iter().map(|o| o.id).collect();
        assert_eq!(ids, [earlier.id, later.id]);
        assert_eq!(pending[0].customer_name, "Bob");
        assert_eq!(pending[0].reward_name, "Booster Pack");
        assert_eq!(pending[1].customer_name, "Alice");
    }

    #[tokio::test]
    async fn test_update_status_is_guarded() {
        let fx = setup().await;
        let repo = fx.db.orders();
        let order = repo
            .insert(&new_order(fx.customer_id, fx.reward_id, Utc::now()))
            .await
            .unwrap();

        assert!(repo
            .update_status(order.id, OrderStatus::Pending, OrderStatus::Cancelled)
            .await
            .unwrap());
        // Second transition from pending no longer matches.
        assert!(!repo
            .update_status(order.id, OrderStatus::Pending, OrderStatus::Fulfilled)
            .await
            .unwrap());
        assert_eq!(
            repo.get_by_id(order.id).await.unwrap().unwrap().status,
            OrderStatus::Cancelled
        );
        assert!(!repo
            .update_status(999, OrderStatus::Pending, OrderStatus::Fulfilled)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_order_for_missing_customer_violates_foreign_key() {
        let fx = setup().await;
        let err = fx
            .db
            .orders()
            .insert(&new_order(999, fx.reward_id, Utc::now()))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_customer_with_orders_cannot_be_deleted() {
        let fx = setup().await;
        fx.db
            .orders()
            .insert(&new_order(fx.customer_id, fx.reward_id, Utc::now()))
            .await
            .unwrap();

        let err = fx.db.customers().delete(fx.customer_id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        let err = fx.db.rewards().delete(fx.reward_id).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
