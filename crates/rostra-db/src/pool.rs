//! Database connection pooling with lifecycle listeners
//!
//! The pool fires `connect` when it opens a physical connection and
//! `checkout` every time it hands one out. Listeners registered through
//! [`ConnectionPool::add_listener`] see a [`ConnectionRecord`] whose `info`
//! map survives for the lifetime of the physical connection.
//!
//! A checkout listener that returns [`PoolError::Disconnection`] makes the
//! pool discard the connection, open a new one and retry the checkout; the
//! caller of [`ConnectionPool::acquire`] only ever sees a usable connection.

pub mod config;
pub mod errors;
pub mod events;
pub mod guard;
pub mod manager;
// Allow module_inception: `pool::pool` keeps `rostra_db::pool::ConnectionPool` short
#[allow(clippy::module_inception)]
pub mod pool;
pub mod record;

pub use config::PoolConfig;
pub use errors::{PoolError, PoolResult};
pub use events::{PoolEvent, PoolEventListener};
pub use guard::{PID_INFO_KEY, PidGuard, add_engine_pidguard};
pub use manager::{ConnectionManager, SqliteConnectionManager};
pub use pool::{ConnectionPool, PooledConnection};
pub use record::{ConnectionProxy, ConnectionRecord};
