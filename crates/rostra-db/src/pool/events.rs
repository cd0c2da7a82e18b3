//! Pool lifecycle events and listeners

use super::errors::PoolResult;
use super::record::{ConnectionProxy, ConnectionRecord};
use async_trait::async_trait;

/// Notification emitted after a pool state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolEvent {
	ConnectionCreated { connection_id: String },
	ConnectionAcquired { connection_id: String },
	ConnectionReturned { connection_id: String },
	ConnectionInvalidated { connection_id: String, reason: String },
}

impl PoolEvent {
	pub fn connection_created(connection_id: impl Into<String>) -> Self {
		Self::ConnectionCreated {
			connection_id: connection_id.into(),
		}
	}

	pub fn connection_acquired(connection_id: impl Into<String>) -> Self {
		Self::ConnectionAcquired {
			connection_id: connection_id.into(),
		}
	}

	pub fn connection_returned(connection_id: impl Into<String>) -> Self {
		Self::ConnectionReturned {
			connection_id: connection_id.into(),
		}
	}

	pub fn connection_invalidated(
		connection_id: impl Into<String>,
		reason: impl Into<String>,
	) -> Self {
		Self::ConnectionInvalidated {
			connection_id: connection_id.into(),
			reason: reason.into(),
		}
	}

	pub fn connection_id(&self) -> &str {
		match self {
			Self::ConnectionCreated { connection_id }
			| Self::ConnectionAcquired { connection_id }
			| Self::ConnectionReturned { connection_id }
			| Self::ConnectionInvalidated { connection_id, .. } => connection_id,
		}
	}
}

/// Connection pool lifecycle listener (SQLAlchemy PoolEvents)
///
/// `on_connect` and `on_checkout` run inline on the task that opens or
/// checks out the connection and may veto it by returning an error.
/// `on_event` is a notification only.
#[async_trait]
pub trait PoolEventListener: Send + Sync {
	/// Called once when a physical connection has been opened
	fn on_connect(&self, _record: &mut ConnectionRecord) -> PoolResult<()> {
		Ok(())
	}

	/// Called every time a connection is handed out
	///
	/// Returning [`PoolError::Disconnection`](super::PoolError::Disconnection)
	/// makes the pool discard the connection and retry with a new one.
	fn on_checkout(
		&self,
		_record: &mut ConnectionRecord,
		_proxy: &mut ConnectionProxy,
	) -> PoolResult<()> {
		Ok(())
	}

	async fn on_event(&self, _event: PoolEvent) {}
}
