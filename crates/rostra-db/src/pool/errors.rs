//! Pool error types

use std::time::Duration;
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PoolError {
	/// The connection must not be used; the pool replaces it and retries
	#[error("Disconnection: {0}")]
	Disconnection(String),

	#[error("Invalid pool configuration: {0}")]
	Config(String),

	#[error("Database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("Pool is closed")]
	Closed,

	#[error("Timed out after {0:?} waiting for a connection")]
	Timeout(Duration),

	#[error("Listener error: {0}")]
	Listener(String),
}

impl PoolError {
	pub fn is_disconnection(&self) -> bool {
		matches!(self, PoolError::Disconnection(_))
	}
}

pub type PoolResult<T> = Result<T, PoolError>;
