//! # Configuration State
//!
//! Application configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`REWARDS_*`)
//! 2. Defaults (this file)
//!
//! ## Environment Variables
//! | Variable                  | Default                              |
//! |---------------------------|--------------------------------------|
//! | `REWARDS_DB_PATH`         | `<data dir>/rewards_shop.db`         |
//! | `REWARDS_SEED`            | `true` (seed empty tables)           |
//! | `REWARDS_MAX_CONNECTIONS` | `5`                                  |
//!
//! `REWARDS_DB_PATH=:memory:` runs against a throwaway in-memory database.

use directories::ProjectDirs;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use rewards_db::DbConfig;

/// Special database path selecting an in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

const DB_FILE_NAME: &str = "rewards_shop.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    /// No platform data directory could be determined.
    #[error("could not determine app data directory (set REWARDS_DB_PATH)")]
    NoDataDir,

    /// The data directory could not be created.
    #[error("could not create data directory: {0}")]
    DataDir(#[from] std::io::Error),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    /// SQLite database file, or [`IN_MEMORY_PATH`].
    pub database_path: PathBuf,

    /// Insert demo customers and rewards into empty tables at startup.
    pub seed_on_first_run: bool,

    /// Upper bound of the connection pool.
    pub max_connections: u32,
}

impl ShopConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup("REWARDS_DB_PATH") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
            _ => default_database_path()?,
        };

        let seed_on_first_run = match lookup("REWARDS_SEED") {
            Some(value) => parse_flag("REWARDS_SEED", &value)?,
            None => true,
        };

        let max_connections = match lookup("REWARDS_MAX_CONNECTIONS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => return Err(invalid("REWARDS_MAX_CONNECTIONS", &value)),
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(ShopConfig {
            database_path,
            seed_on_first_run,
            max_connections,
        })
    }

    /// Returns true if the database lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == IN_MEMORY_PATH
    }

    /// Builds the database configuration.
    pub fn db_config(&self) -> DbConfig {
        if self.is_in_memory() {
            return DbConfig::in_memory().seed_on_first_run(self.seed_on_first_run);
        }

        DbConfig::new(self.database_path.clone())
            .max_connections(self.max_connections)
            .seed_on_first_run(self.seed_on_first_run)
    }
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.rewards.shop/rewards_shop.db`
/// - **Windows**: `%APPDATA%\rewards\shop\data\rewards_shop.db`
/// - **Linux**: `~/.local/share/shop/rewards_shop.db`
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("com", "rewards", "shop").ok_or(ConfigError::NoDataDir)?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.join(DB_FILE_NAME))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_values() {
        let config = ShopConfig::from_lookup(lookup(&[
            ("REWARDS_DB_PATH", "/tmp/shop.db"),
            ("REWARDS_SEED", "false"),
            ("REWARDS_MAX_CONNECTIONS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/shop.db"));
        assert!(!config.seed_on_first_run);
        assert_eq!(config.max_connections, 2);
        assert!(!config.is_in_memory());

        let db = config.db_config();
        assert_eq!(db.max_connections, 2);
        assert!(!db.seed_on_first_run);
    }

    #[test]
    fn test_defaults_with_path() {
        let config = ShopConfig::from_lookup(lookup(&[("REWARDS_DB_PATH", "./dev.db")])).unwrap();
        assert!(config.seed_on_first_run);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn test_in_memory_path() {
        let config = ShopConfig::from_lookup(lookup(&[
            ("REWARDS_DB_PATH", IN_MEMORY_PATH),
            ("REWARDS_SEED", "1"),
        ]))
        .unwrap();

        assert!(config.is_in_memory());
        let db = config.db_config();
        assert!(db.is_in_memory());
        assert!(db.seed_on_first_run);
    }

    #[test]
    fn test_invalid_values() {
        let err = ShopConfig::from_lookup(lookup(&[
            ("REWARDS_DB_PATH", "./dev.db"),
            ("REWARDS_SEED", "maybe"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid value for REWARDS_SEED: 'maybe'");

        for bad in ["0", "-1", "many"] {
            let err = ShopConfig::from_lookup(lookup(&[
                ("REWARDS_DB_PATH", "./dev.db"),
                ("REWARDS_MAX_CONNECTIONS", bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue { .. }), "{bad}");
        }
    }
}
