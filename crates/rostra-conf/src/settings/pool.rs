//! Connection pool settings

use serde::{Deserialize, Serialize};

/// Connection pool settings
///
/// Missing keys take their default values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
	/// Upper bound on open connections
	pub max_connections: u32,

	/// Connections opened ahead of the first request
	pub min_connections: u32,

	/// Seconds to wait for a free connection
	pub acquire_timeout_secs: u64,

	/// Checkout retries on a fresh connection after a disconnection
	pub max_reconnect_attempts: u32,
}

impl Default for PoolSettings {
	fn default() -> Self {
		Self {
			max_connections: 10,
			min_connections: 0,
			acquire_timeout_secs: 30,
			max_reconnect_attempts: 3,
		}
	}
}

impl PoolSettings {
	/// Check the bounds are consistent
	///
	/// # Examples
	///
	/// ```
	/// use rostra_conf::PoolSettings;
	///
	/// assert!(PoolSettings::default().validate().is_ok());
	///
	/// let inverted = PoolSettings { min_connections: 20, ..PoolSettings::default() };
	/// assert!(inverted.validate().is_err());
	/// ```
	pub fn validate(&self) -> Result<(), String> {
		if self.max_connections == 0 {
			return Err("pool.max_connections must be greater than zero".to_string());
		}
		if self.min_connections > self.max_connections {
			return Err(format!(
				"pool.min_connections ({}) exceeds pool.max_connections ({})",
				self.min_connections, self.max_connections
			));
		}
		Ok(())
	}
}
