//! Physical connection factories

use super::errors::{PoolError, PoolResult};
use crate::backends::DatabaseType;
use async_trait::async_trait;
use rostra_conf::DatabaseConfig;
use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use std::str::FromStr;

/// Opens physical connections for a [`ConnectionPool`](super::ConnectionPool)
#[async_trait]
pub trait ConnectionManager: Send + Sync + 'static {
	type Connection: Send + 'static;

	/// Backend of the connections this manager opens
	fn database_type(&self) -> DatabaseType;

	async fn connect(&self) -> PoolResult<Self::Connection>;
}

/// Opens SQLite connections through sqlx
#[derive(Debug, Clone)]
pub struct SqliteConnectionManager {
	options: SqliteConnectOptions,
	url: String,
}

impl SqliteConnectionManager {
	/// Create a manager from a `sqlite:` URL
	///
	/// The database file is created on first connect when it does not exist.
	///
	/// # Examples
	///
	/// ```
	/// use rostra_db::pool::SqliteConnectionManager;
	///
	/// let manager = SqliteConnectionManager::new("sqlite::memory:").unwrap();
	/// assert_eq!(manager.url(), "sqlite::memory:");
	/// ```
	pub fn new(url: &str) -> PoolResult<Self> {
		let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
		Ok(Self {
			options,
			url: url.to_string(),
		})
	}

	/// Create a manager from database settings
	///
	/// # Examples
	///
	/// ```
	/// use rostra_conf::DatabaseConfig;
	/// use rostra_db::pool::SqliteConnectionManager;
	///
	/// let manager = SqliteConnectionManager::from_config(&DatabaseConfig::sqlite("app.db")).unwrap();
	/// assert_eq!(manager.url(), "sqlite:app.db");
	///
	/// let postgres = DatabaseConfig::postgresql("app", "user", "pass", "localhost", 5432);
	/// assert!(SqliteConnectionManager::from_config(&postgres).is_err());
	/// ```
	pub fn from_config(config: &DatabaseConfig) -> PoolResult<Self> {
		let url = config.to_url();
		match DatabaseType::from_url(&url) {
			Some(DatabaseType::Sqlite) => Self::new(&url),
			_ => Err(PoolError::Config(format!(
				"engine {} is not a SQLite backend",
				config.engine
			))),
		}
	}

	pub fn url(&self) -> &str {
		&self.url
	}
}

#[async_trait]
impl ConnectionManager for SqliteConnectionManager {
	type Connection = SqliteConnection;

	fn database_type(&self) -> DatabaseType {
		DatabaseType::Sqlite
	}

	async fn connect(&self) -> PoolResult<SqliteConnection> {
		Ok(self.options.connect().await?)
	}
}
