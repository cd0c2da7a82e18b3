//! Multiprocessing guard for pooled connections
//!
//! A pool created before the process forks hands the parent's sockets and
//! file handles to every child. [`PidGuard`] tags each connection with the
//! pid that opened it and forces a reconnect when another process checks it
//! out.

use super::errors::{PoolError, PoolResult};
use super::events::PoolEventListener;
use super::manager::ConnectionManager;
use super::pool::ConnectionPool;
use super::record::{ConnectionProxy, ConnectionRecord};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Key under which the owner pid is stored in [`ConnectionRecord::info`]
pub const PID_INFO_KEY: &str = "pid";

type PidSource = Arc<dyn Fn() -> u32 + Send + Sync>;

/// Pool listener that discards connections inherited across a fork
#[derive(Clone)]
pub struct PidGuard {
	pid_source: PidSource,
}

impl PidGuard {
	/// Guard reading the pid of the running process
	pub fn new() -> Self {
		Self::with_pid_source(std::process::id)
	}

	/// Guard reading the current pid from `source`
	///
	/// # Examples
	///
	/// ```
	/// use rostra_db::pool::{ConnectionRecord, PidGuard, PoolEventListener};
	///
	/// let guard = PidGuard::with_pid_source(|| 4242);
	/// let mut record = ConnectionRecord::new();
	/// guard.on_connect(&mut record).unwrap();
	///
	/// assert_eq!(PidGuard::owner_pid(&record), Some(4242));
	/// ```
	pub fn with_pid_source<F>(source: F) -> Self
	where
		F: Fn() -> u32 + Send + Sync + 'static,
	{
		Self {
			pid_source: Arc::new(source),
		}
	}

	/// Pid that opened the record's connection, if it was tagged
	pub fn owner_pid(record: &ConnectionRecord) -> Option<u32> {
		record
			.info()
			.get(PID_INFO_KEY)
			.and_then(Value::as_u64)
			.and_then(|pid| u32::try_from(pid).ok())
	}

	/// Pid the guard considers current
	pub fn current_pid(&self) -> u32 {
		(self.pid_source)()
	}

	fn tag(&self, record: &mut ConnectionRecord, pid: u32) {
		record
			.info_mut()
			.insert(PID_INFO_KEY.to_string(), Value::from(pid));
	}
}

impl Default for PidGuard {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for PidGuard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PidGuard")
			.field("current_pid", &self.current_pid())
			.finish()
	}
}

#[async_trait]
impl PoolEventListener for PidGuard {
	fn on_connect(&self, record: &mut ConnectionRecord) -> PoolResult<()> {
		self.tag(record, self.current_pid());
		Ok(())
	}

	fn on_checkout(
		&self,
		record: &mut ConnectionRecord,
		proxy: &mut ConnectionProxy,
	) -> PoolResult<()> {
		let pid = self.current_pid();
		let Some(owner) = Self::owner_pid(record) else {
			// Opened before the guard was installed
			self.tag(record, pid);
			return Ok(());
		};
		if owner == pid {
			return Ok(());
		}

		tracing::warn!(
			original_pid = owner,
			current_pid = pid,
			connection_id = record.id(),
			"Parent process {} forked ({}) with an open database connection, \
			 which is being discarded and recreated.",
			owner,
			pid
		);
		record.invalidate();
		proxy.detach();
		Err(PoolError::Disconnection(format!(
			"Connection record belongs to pid {}, attempting to check out in pid {}",
			owner, pid
		)))
	}
}

/// Install a [`PidGuard`] on `pool`
///
/// Connections opened from now on are tagged with the current pid and
/// recreated when checked out from any other process.
pub fn add_engine_pidguard<M: ConnectionManager>(pool: &ConnectionPool<M>) -> Arc<PidGuard> {
	let guard = Arc::new(PidGuard::new());
	pool.add_listener(guard.clone());
	guard
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::atomic::{AtomicU32, Ordering};

	fn switchable_guard(initial: u32) -> (PidGuard, Arc<AtomicU32>) {
		let pid = Arc::new(AtomicU32::new(initial));
		let source = pid.clone();
		let guard = PidGuard::with_pid_source(move || source.load(Ordering::SeqCst));
		(guard, pid)
	}

	#[rstest]
	fn test_connect_tags_record_with_pid() {
		// Arrange
		let (guard, _) = switchable_guard(100);
		let mut record = ConnectionRecord::new();

		// Act
		guard.on_connect(&mut record).unwrap();

		// Assert
		assert_eq!(record.info().get(PID_INFO_KEY), Some(&Value::from(100u32)));
	}

	#[rstest]
	fn test_checkout_same_pid_is_noop() {
		// Arrange
		let (guard, _) = switchable_guard(100);
		let mut record = ConnectionRecord::new();
		guard.on_connect(&mut record).unwrap();
		let before = record.info().clone();
		let mut proxy = ConnectionProxy::new(&record);

		// Act
		let result = guard.on_checkout(&mut record, &mut proxy);

		// Assert
		assert!(result.is_ok());
		assert!(record.is_connected());
		assert!(proxy.is_attached());
		assert_eq!(record.info(), &before);
	}

	#[rstest]
	fn test_checkout_other_pid_discards_connection() {
		// Arrange
		let (guard, pid) = switchable_guard(100);
		let mut record = ConnectionRecord::new();
		guard.on_connect(&mut record).unwrap();
		let mut proxy = ConnectionProxy::new(&record);
		pid.store(200, Ordering::SeqCst);

		// Act
		let result = guard.on_checkout(&mut record, &mut proxy);

		// Assert
		let err = result.unwrap_err();
		assert!(err.is_disconnection());
		assert!(err.to_string().contains("pid 100"));
		assert!(err.to_string().contains("pid 200"));
		assert!(!record.is_connected());
		assert!(!proxy.is_attached());
	}

	#[rstest]
	fn test_checkout_untagged_record_adopts_current_pid() {
		// Arrange
		let (guard, _) = switchable_guard(300);
		let mut record = ConnectionRecord::new();
		let mut proxy = ConnectionProxy::new(&record);

		// Act
		let result = guard.on_checkout(&mut record, &mut proxy);

		// Assert
		assert!(result.is_ok());
		assert_eq!(PidGuard::owner_pid(&record), Some(300));
	}

	#[rstest]
	fn test_default_guard_uses_process_id() {
		// Arrange
		let guard = PidGuard::default();
		let mut record = ConnectionRecord::new();

		// Act
		guard.on_connect(&mut record).unwrap();

		// Assert
		assert_eq!(PidGuard::owner_pid(&record), Some(std::process::id()));
	}
}
