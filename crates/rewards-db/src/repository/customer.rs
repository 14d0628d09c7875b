//! # Customer Repository
//!
//! Database operations for customers.
//!
//! ## Key Operations
//! - Listing (by name) and lookup by id
//! - Insert / delete (admin)
//! - Balance changes (redemption, issuance, refund)
//!
//! ## Guarded Balance Updates
//! ```text
//! UPDATE customers
//!    SET points = points + :delta
//!  WHERE id = :id
//!    AND points + :delta >= 0      ← a concurrent writer can never push
//!                                    the balance below zero
//! ```
//! Zero rows affected means "missing customer" or "not enough points"; the
//! caller decides which by re-reading inside the same transaction.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use rewards_core::{Customer, NewCustomer};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists all customers ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, name, email, points
            FROM customers
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Gets a customer by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let mut conn = self.pool.acquire().await?;
        Self::get_by_id_in(&mut conn, id).await
    }

    /// Inserts a customer and returns the stored row.
    pub async fn insert(&self, customer: &NewCustomer) -> DbResult<Customer> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_in(&mut conn, customer).await
    }

    /// Overwrites a customer's balance.
    pub async fn update_points(&self, id: i64, points: i64) -> DbResult<()> {
        debug!(customer_id = id, points, "Setting customer points");

        let result = sqlx::query("UPDATE customers SET points = ?2 WHERE id = ?1")
            .bind(id)
            .bind(points)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Applies a signed balance change; see [`Self::add_points_in`].
    pub async fn add_points(&self, id: i64, delta: i64) -> DbResult<bool> {
        let mut conn = self.pool.acquire().await?;
        Self::add_points_in(&mut conn, id, delta).await
    }

    /// Deletes a customer.
    ///
    /// Fails with `ForeignKeyViolation` while orders still reference it.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(customer_id = id, "Deleting customer");

        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Connection-level forms (usable inside a transaction)
    // -------------------------------------------------------------------------

    /// Gets a customer by ID on the given connection.
    pub async fn get_by_id_in(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, points FROM customers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(customer)
    }

    /// Inserts a customer on the given connection.
    ///
    /// A duplicate email becomes `UniqueViolation { field: "email", .. }`.
    pub async fn insert_in(
        conn: &mut SqliteConnection,
        customer: &NewCustomer,
    ) -> DbResult<Customer> {
        debug!(name = %customer.name, email = %customer.email, "Inserting customer");

        sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, email, points)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, email, points
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.points)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("email", &customer.email),
            other => other,
        })
    }

    /// Adds `delta` (may be negative) to the balance unless the result
    /// would be negative.
    ///
    /// ## Returns
    /// * `Ok(true)` - Balance updated
    /// * `Ok(false)` - Customer missing or balance too low; nothing written
    pub async fn add_points_in(conn: &mut SqliteConnection, id: i64, delta: i64) -> DbResult<bool> {
        debug!(customer_id = id, delta, "Adjusting customer points");

        let result = sqlx::query(
            r#"
            UPDATE customers
            SET points = points + ?2
            WHERE id = ?1 AND points + ?2 >= 0
            "#,
        )
        .bind(id)
        .bind(delta)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Counts customers on the given connection.
    pub async fn count_in(conn: &mut SqliteConnection) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn new_customer(name: &str, email: &str, points: i64) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
            points,
        }
    }

    async fn setup_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = setup_db().await;
        let repo = db.customers();

        let created = repo
            .insert(&new_customer("Alice", "alice@example.com", 100))
            .await
            .unwrap();
        assert!(created.id > 0);

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert_eq!(repo.get_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_orders_by_name() {
        let db = setup_db().await;
        let repo = db.customers();
        repo.insert(&new_customer("Chris", "c@example.com", 1)).await.unwrap();
        repo.insert(&new_customer("Alice", "a@example.com", 1)).await.unwrap();
        repo.insert(&new_customer("Bob", "b@example.com", 1)).await.unwrap();

        let names: Vec<String> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Alice", "Bob", "Chris"]);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = setup_db().await;
        let repo = db.customers();
        repo.insert(&new_customer("Alice", "alice@example.com", 1))
            .await
            .unwrap();

        let err = repo
            .insert(&new_customer("Alicia", "alice@example.com", 1))
            .await
            .unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "email");
                assert_eq!(value, "alice@example.com");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_add_points_guards_negative_balance() {
        let db = setup_db().await;
        let repo = db.customers();
        let c = repo.insert(&new_customer("Bob", "bob@example.com", 60)).await.unwrap();

        assert!(!repo.add_points(c.id, -61).await.unwrap());
        assert_eq!(repo.get_by_id(c.id).await.unwrap().unwrap().points, 60);

        assert!(repo.add_points(c.id, -60).await.unwrap());
        assert_eq!(repo.get_by_id(c.id).await.unwrap().unwrap().points, 0);

        assert!(repo.add_points(c.id, 25).await.unwrap());
        assert_eq!(repo.get_by_id(c.id).await.unwrap().unwrap().points, 25);

        assert!(!repo.add_points(999, 5).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_points_and_delete() {
        let db = setup_db().await;
        let repo = db.customers();
        let c = repo.insert(&new_customer("Bob", "bob@example.com", 60)).await.unwrap();

        repo.update_points(c.id, 75).await.unwrap();
        assert_eq!(repo.get_by_id(c.id).await.unwrap().unwrap().points, 75);

        // The CHECK constraint rejects negative balances outright.
        assert!(matches!(
            repo.update_points(c.id, -1).await,
            Err(DbError::CheckViolation { .. })
        ));

        repo.delete(c.id).await.unwrap();
        assert!(matches!(
            repo.delete(c.id).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            repo.update_points(c.id, 1).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
