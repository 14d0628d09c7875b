//! # Reward Repository
//!
//! Database operations for the reward catalog. Rewards are created and
//! deleted by admins and never edited in place.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use rewards_core::{NewReward, Reward};

/// Repository for reward database operations.
#[derive(Debug, Clone)]
pub struct RewardRepository {
    pool: SqlitePool,
}

impl RewardRepository {
    /// Creates a new RewardRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RewardRepository { pool }
    }

    /// Lists all rewards, cheapest first.
    pub async fn list_all(&self) -> DbResult<Vec<Reward>> {
        let rewards = sqlx::query_as::<_, Reward>(
            r#"
            SELECT id, name, cost
            FROM rewards
            ORDER BY cost, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rewards)
    }

    /// Gets a reward by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Reward>> {
        let mut conn = self.pool.acquire().await?;
        Self::get_by_id_in(&mut conn, id).await
    }

    /// Inserts a reward and returns the stored row.
    pub async fn insert(&self, reward: &NewReward) -> DbResult<Reward> {
        let mut conn = self.pool.acquire().await?;
        Self::insert_in(&mut conn, reward).await
    }

    /// Deletes a reward.
    ///
    /// Fails with `ForeignKeyViolation` while orders still reference it.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(reward_id = id, "Deleting reward");

        let result = sqlx::query("DELETE FROM rewards WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Reward", id));
        }

        Ok(())
    }

    /// Gets a reward by ID on the given connection.
    pub async fn get_by_id_in(conn: &mut SqliteConnection, id: i64) -> DbResult<Option<Reward>> {
        let reward = sqlx::query_as::<_, Reward>("SELECT id, name, cost FROM rewards WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(reward)
    }

    /// Inserts a reward on the given connection.
    pub async fn insert_in(conn: &mut SqliteConnection, reward: &NewReward) -> DbResult<Reward> {
        debug!(name = %reward.name, cost = reward.cost, "Inserting reward");

        let stored = sqlx::query_as::<_, Reward>(
            r#"
            INSERT INTO rewards (name, cost)
            VALUES (?1, ?2)
            RETURNING id, name, cost
            "#,
        )
        .bind(&reward.name)
        .bind(reward.cost)
        .fetch_one(&mut *conn)
        .await?;

        Ok(stored)
    }

    /// Counts rewards on the given connection.
    pub async fn count_in(conn: &mut SqliteConnection) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rewards")
            .fetch_one(&mut *conn)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn new_reward(name: &str, cost: i64) -> NewReward {
        NewReward {
            name: name.to_string(),
            cost,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_cost() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.rewards();
        repo.insert(&new_reward("Playmat", 50)).await.unwrap();
        repo.insert(&new_reward("Sleeves", 15)).await.unwrap();
        repo.insert(&new_reward("Booster Pack", 20)).await.unwrap();

        let costs: Vec<i64> = repo.list_all().await.unwrap().iter().map(|r| r.cost).collect();
        assert_eq!(costs, [15, 20, 50]);
    }

    #[tokio::test]
    async fn test_insert_get_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.rewards();

        let reward = repo.insert(&new_reward("Starter Deck", 40)).await.unwrap();
        assert_eq!(repo.get_by_id(reward.id).await.unwrap(), Some(reward.clone()));

        repo.delete(reward.id).await.unwrap();
        assert_eq!(repo.get_by_id(reward.id).await.unwrap(), None);
        assert!(matches!(
            repo.delete(reward.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_non_positive_cost_rejected_by_schema() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.rewards().insert(&new_reward("Free", 0)).await.unwrap_err();
        assert!(matches!(err, DbError::CheckViolation { .. }));
    }
}
