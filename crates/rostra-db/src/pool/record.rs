//! Connection records and checkout proxies

use serde_json::Value;
use std::collections::HashMap;

/// Bookkeeping attached to one physical connection
///
/// The record lives exactly as long as its physical connection. Listeners
/// use [`info_mut`](Self::info_mut) to stash per-connection state.
#[derive(Debug, Clone)]
pub struct ConnectionRecord {
	id: String,
	info: HashMap<String, Value>,
	connected: bool,
}

impl ConnectionRecord {
	/// Create a record for a freshly opened connection
	///
	/// # Examples
	///
	/// ```
	/// use rostra_db::pool::ConnectionRecord;
	///
	/// let record = ConnectionRecord::new();
	/// assert!(record.is_connected());
	/// assert!(record.info().is_empty());
	/// assert!(!record.id().is_empty());
	/// ```
	pub fn new() -> Self {
		Self {
			id: uuid::Uuid::new_v4().to_string(),
			info: HashMap::new(),
			connected: true,
		}
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn info(&self) -> &HashMap<String, Value> {
		&self.info
	}

	pub fn info_mut(&mut self) -> &mut HashMap<String, Value> {
		&mut self.info
	}

	/// Whether the record still owns its physical connection
	pub fn is_connected(&self) -> bool {
		self.connected
	}

	/// Drop the physical connection; the pool closes it instead of reusing it
	pub fn invalidate(&mut self) {
		self.connected = false;
	}
}

impl Default for ConnectionRecord {
	fn default() -> Self {
		Self::new()
	}
}

/// Checkout-side handle for a record
#[derive(Debug, Clone)]
pub struct ConnectionProxy {
	connection_id: String,
	attached: bool,
}

impl ConnectionProxy {
	pub fn new(record: &ConnectionRecord) -> Self {
		Self {
			connection_id: record.id().to_string(),
			attached: record.is_connected(),
		}
	}

	pub fn connection_id(&self) -> &str {
		&self.connection_id
	}

	/// Whether the proxy still references the physical connection
	pub fn is_attached(&self) -> bool {
		self.attached
	}

	pub fn detach(&mut self) {
		self.attached = false;
	}
}
