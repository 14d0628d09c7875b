//! # First-Run Seed Data
//!
//! Demo customers and rewards inserted into empty tables. Each table is
//! checked on its own, so deleting every reward and restarting brings the
//! catalog back without touching customers.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::repository::customer::CustomerRepository;
use crate::repository::reward::RewardRepository;
use rewards_core::{NewCustomer, NewReward};

/// Demo customers: (name, email, points).
pub const DEMO_CUSTOMERS: &[(&str, &str, i64)] = &[
    ("Alice", "alice@example.com", 100),
    ("Bob", "bob@example.com", 60),
    ("Chris", "chris@example.com", 250),
];

/// Demo rewards: (name, cost).
pub const DEMO_REWARDS: &[(&str, i64)] = &[
    ("Booster Pack", 20),
    ("Playmat", 50),
    ("Sleeves", 15),
    ("Starter Deck", 40),
];

/// How many rows a seed run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub customers_inserted: usize,
    pub rewards_inserted: usize,
}

impl SeedReport {
    /// True when nothing was inserted.
    pub fn is_empty(&self) -> bool {
        self.customers_inserted == 0 && self.rewards_inserted == 0
    }
}

/// Seeds every empty table inside one transaction.
pub async fn seed_if_empty(pool: &SqlitePool) -> DbResult<SeedReport> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    if CustomerRepository::count_in(&mut tx).await? == 0 {
        for (name, email, points) in DEMO_CUSTOMERS {
            let customer = NewCustomer {
                name: name.to_string(),
                email: email.to_string(),
                points: *points,
            };
            CustomerRepository::insert_in(&mut tx, &customer).await?;
            report.customers_inserted += 1;
        }
    }

    if RewardRepository::count_in(&mut tx).await? == 0 {
        for (name, cost) in DEMO_REWARDS {
            let reward = NewReward {
                name: name.to_string(),
                cost: *cost,
            };
            RewardRepository::insert_in(&mut tx, &reward).await?;
            report.rewards_inserted += 1;
        }
    }

    tx.commit().await?;
    debug!(?report, "Seed pass finished");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_seed_fills_empty_tables_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let first = db.seed_if_empty().await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                customers_inserted: 3,
                rewards_inserted: 4
            }
        );

        let second = db.seed_if_empty().await.unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn test_seed_only_touches_empty_table() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.customers()
            .insert(&NewCustomer {
                name: "Dana".to_string(),
                email: "dana@example.com".to_string(),
                points: 5,
            })
            .await
            .unwrap();

        let report = db.seed_if_empty().await.unwrap();
        assert_eq!(report.customers_inserted, 0);
        assert_eq!(report.rewards_inserted, 4);
        assert_eq!(db.customers().list_all().await.unwrap().len(), 1);
    }
}
