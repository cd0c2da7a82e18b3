//! Pool configuration

use rostra_conf::PoolSettings;
use std::time::Duration;

#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct PoolConfig {
	pub max_connections: u32,
	pub min_connections: u32,
	pub acquire_timeout: Duration,
	/// How many times a checkout may be retried on a fresh connection after a
	/// listener reported a disconnection
	pub max_reconnect_attempts: u32,
}

impl Default for PoolConfig {
	fn default() -> Self {
		Self {
			max_connections: 10,
			min_connections: 0,
			acquire_timeout: Duration::from_secs(30),
			max_reconnect_attempts: 3,
		}
	}
}

impl PoolConfig {
	/// Create a new pool configuration with default values
	///
	/// # Examples
	///
	/// ```rust
	/// use rostra_db::pool::PoolConfig;
	///
	/// let config = PoolConfig::new();
	/// assert_eq!(config.max_connections, 10);
	/// assert_eq!(config.max_reconnect_attempts, 3);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_max_connections(mut self, max: u32) -> Self {
		self.max_connections = max;
		self
	}

	pub fn with_min_connections(mut self, min: u32) -> Self {
		self.min_connections = min;
		self
	}

	pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
		self.acquire_timeout = timeout;
		self
	}

	pub fn with_max_reconnect_attempts(mut self, attempts: u32) -> Self {
		self.max_reconnect_attempts = attempts;
		self
	}

	pub fn validate(&self) -> Result<(), String> {
		if self.max_connections == 0 {
			return Err("max_connections must be greater than zero".to_string());
		}
		if self.max_connections < self.min_connections {
			return Err("max_connections must be >= min_connections".to_string());
		}
		Ok(())
	}
}

impl From<&PoolSettings> for PoolConfig {
	fn from(settings: &PoolSettings) -> Self {
		Self {
			max_connections: settings.max_connections,
			min_connections: settings.min_connections,
			acquire_timeout: Duration::from_secs(settings.acquire_timeout_secs),
			max_reconnect_attempts: settings.max_reconnect_attempts,
		}
	}
}
