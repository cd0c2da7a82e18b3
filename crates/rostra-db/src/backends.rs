//! Database backend identification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Database type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseType {
	Postgres,
	Sqlite,
	Mysql,
}

impl DatabaseType {
	/// Dialect name as reported by the engine
	///
	/// # Examples
	///
	/// ```
	/// use rostra_db::DatabaseType;
	///
	/// assert_eq!(DatabaseType::Sqlite.name(), "sqlite");
	/// assert_eq!(DatabaseType::Postgres.name(), "postgresql");
	/// ```
	pub fn name(&self) -> &'static str {
		match self {
			DatabaseType::Postgres => "postgresql",
			DatabaseType::Sqlite => "sqlite",
			DatabaseType::Mysql => "mysql",
		}
	}

	/// Detect the database type from a connection URL scheme
	///
	/// # Examples
	///
	/// ```
	/// use rostra_db::DatabaseType;
	///
	/// assert_eq!(DatabaseType::from_url("sqlite::memory:"), Some(DatabaseType::Sqlite));
	/// assert_eq!(DatabaseType::from_url("postgres://localhost/db"), Some(DatabaseType::Postgres));
	/// assert_eq!(DatabaseType::from_url("mysql://localhost/db"), Some(DatabaseType::Mysql));
	/// assert_eq!(DatabaseType::from_url("redis://localhost"), None);
	/// ```
	pub fn from_url(url: &str) -> Option<Self> {
		let scheme = url.split(':').next()?.to_ascii_lowercase();
		match scheme.as_str() {
			"sqlite" => Some(DatabaseType::Sqlite),
			"postgres" | "postgresql" => Some(DatabaseType::Postgres),
			"mysql" | "mariadb" => Some(DatabaseType::Mysql),
			_ => None,
		}
	}

	pub fn is_sqlite(&self) -> bool {
		matches!(self, DatabaseType::Sqlite)
	}
}

impl fmt::Display for DatabaseType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
