//! # Rostra Database
//!
//! Database compatibility shims for the Rostra web application.
//!
//! This crate provides two independent adapters attached to storage-layer
//! lifecycle points:
//! - **Pid guard** ([`pool::PidGuard`]): a connection pool listener that refuses
//!   to hand out a connection opened by another process (for example a parent
//!   process that forked its workers after the pool was created). The pool
//!   discards such a connection and transparently opens a fresh one.
//! - **SQLite datetime fix** ([`reflection::SqliteDateTimeFix`]): a column
//!   reflection listener that stores every SQLite `DATETIME` column as integer
//!   seconds since the Unix epoch ([`types::EpochSeconds`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rostra_db::pool::{ConnectionPool, PoolConfig, add_engine_pidguard};
//! use rostra_db::reflection::SqliteInspector;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = ConnectionPool::new_sqlite("sqlite://app.db", PoolConfig::default()).await?;
//! add_engine_pidguard(&pool);
//!
//! let inspector = SqliteInspector::with_datetime_fix();
//! let mut conn = pool.acquire().await?;
//! let table = inspector.reflect_table(&mut conn, "roles").await?;
//! # Ok(())
//! # }
//! ```

pub mod backends;
pub mod models;
pub mod pool;
pub mod reflection;
pub mod types;

pub use backends::DatabaseType;

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::backends::DatabaseType;
	pub use crate::models::Role;
	pub use crate::pool::{
		ConnectionManager, ConnectionPool, PidGuard, PoolConfig, PoolError, PoolEvent,
		PoolEventListener, PoolResult, PooledConnection, SqliteConnectionManager,
		add_engine_pidguard,
	};
	pub use crate::reflection::{
		ColumnInfo, ColumnReflectListener, ColumnType, ColumnValue, ReflectionError,
		ReflectionHooks, SqliteDateTimeFix, SqliteInspector, TableInfo, install_sqlite_datetime_fix,
	};
	pub use crate::types::{CodecError, EpochSeconds};
}
