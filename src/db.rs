//! Database compatibility module.
//!
//! This module provides access to the guarded connection pool, SQLite
//! column reflection and the epoch-seconds timestamp codec.
//!
//! # Examples
//!
//! ```rust,no_run
//! use rostra::db::pool::{ConnectionPool, PoolConfig, add_engine_pidguard};
//!
//! # async fn example() -> Result<(), rostra::db::pool::PoolError> {
//! let pool = ConnectionPool::new_sqlite("sqlite:app.db", PoolConfig::default()).await?;
//! add_engine_pidguard(&pool);
//! let _conn = pool.acquire().await?;
//! # Ok(())
//! # }
//! ```

pub use rostra_db::*;
