//! Connection pool lifecycle tests against on-disk SQLite databases

use async_trait::async_trait;
use parking_lot::Mutex;
use rostra_db::pool::{
	ConnectionPool, ConnectionProxy, ConnectionRecord, PidGuard, PoolConfig, PoolError,
	PoolEvent, PoolEventListener, PoolResult, SqliteConnectionManager, add_engine_pidguard,
};
use rstest::{fixture, rstest};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Records every notification the pool emits
#[derive(Default)]
struct EventRecorder {
	events: Mutex<Vec<PoolEvent>>,
}

impl EventRecorder {
	fn events(&self) -> Vec<PoolEvent> {
		self.events.lock().clone()
	}

	fn count(&self, predicate: impl Fn(&PoolEvent) -> bool) -> usize {
		self.events.lock().iter().filter(|e| predicate(e)).count()
	}

	async fn wait_for(&self, predicate: impl Fn(&PoolEvent) -> bool) -> bool {
		for _ in 0..100 {
			if self.count(&predicate) > 0 {
				return true;
			}
			tokio::time::sleep(Duration::from_millis(10)).await;
		}
		false
	}
}

#[async_trait]
impl PoolEventListener for EventRecorder {
	async fn on_event(&self, event: PoolEvent) {
		self.events.lock().push(event);
	}
}

/// Rejects every checkout as a disconnection
struct AlwaysDisconnect;

impl PoolEventListener for AlwaysDisconnect {
	fn on_checkout(
		&self,
		_record: &mut ConnectionRecord,
		_proxy: &mut ConnectionProxy,
	) -> PoolResult<()> {
		Err(PoolError::Disconnection("server went away".to_string()))
	}
}

/// Rejects every checkout with a non-retryable error
struct RejectCheckout;

impl PoolEventListener for RejectCheckout {
	fn on_checkout(
		&self,
		_record: &mut ConnectionRecord,
		_proxy: &mut ConnectionProxy,
	) -> PoolResult<()> {
		Err(PoolError::Listener("maintenance window".to_string()))
	}
}

struct TempDatabase {
	_dir: TempDir,
	url: String,
}

#[fixture]
fn database() -> TempDatabase {
	let dir = tempfile::tempdir().unwrap();
	let url = format!("sqlite://{}", dir.path().join("pool.db").display());
	TempDatabase { _dir: dir, url }
}

fn is_created(event: &PoolEvent) -> bool {
	matches!(event, PoolEvent::ConnectionCreated { .. })
}

fn is_invalidated(event: &PoolEvent) -> bool {
	matches!(event, PoolEvent::ConnectionInvalidated { .. })
}

#[rstest]
#[tokio::test]
async fn test_acquire_and_return_reuses_connection(database: TempDatabase) {
	// Arrange
	let pool = ConnectionPool::new_sqlite(&database.url, PoolConfig::default())
		.await
		.unwrap();
	let recorder = Arc::new(EventRecorder::default());
	pool.add_listener(recorder.clone());

	// Act
	let conn = pool.acquire().await.unwrap();
	let first_id = conn.connection_id().to_string();
	drop(conn);
	let returned = recorder
		.wait_for(|e| matches!(e, PoolEvent::ConnectionReturned { .. }))
		.await;
	let again = pool.acquire().await.unwrap();

	// Assert
	assert!(returned);
	assert_eq!(again.connection_id(), first_id);
	assert_eq!(recorder.count(is_created), 1);
	assert_eq!(
		recorder.events()[..2],
		[
			PoolEvent::connection_created(first_id.clone()),
			PoolEvent::connection_acquired(first_id.clone()),
		]
	);
}

#[rstest]
#[tokio::test]
async fn test_pooled_connection_executes_queries(database: TempDatabase) {
	// Arrange
	let pool = ConnectionPool::new_sqlite(&database.url, PoolConfig::default())
		.await
		.unwrap();
	let mut conn = pool.acquire().await.unwrap();

	// Act
	let value: i64 = sqlx::query_scalar("SELECT 40 + 2")
		.fetch_one(&mut *conn)
		.await
		.unwrap();

	// Assert
	assert_eq!(value, 42);
	assert!(conn.proxy().is_attached());
}

#[rstest]
#[tokio::test]
async fn test_pid_change_recreates_connection_transparently(database: TempDatabase) {
	// Arrange
	let pid = Arc::new(AtomicU32::new(100));
	let source = pid.clone();
	let pool = ConnectionPool::new_sqlite(&database.url, PoolConfig::default())
		.await
		.unwrap();
	pool.add_listener(Arc::new(PidGuard::with_pid_source(move || {
		source.load(Ordering::SeqCst)
	})));
	let recorder = Arc::new(EventRecorder::default());
	pool.add_listener(recorder.clone());

	let conn = pool.acquire().await.unwrap();
	let parent_id = conn.connection_id().to_string();
	assert_eq!(PidGuard::owner_pid(conn.record()), Some(100));
	drop(conn);
	assert_eq!(pool.idle_count(), 1);

	// Act
	pid.store(200, Ordering::SeqCst);
	let mut conn = pool.acquire().await.unwrap();

	// Assert
	assert_ne!(conn.connection_id(), parent_id);
	assert_eq!(PidGuard::owner_pid(conn.record()), Some(200));
	assert_eq!(recorder.count(is_created), 2);
	let invalidated: Vec<PoolEvent> = recorder
		.events()
		.into_iter()
		.filter(is_invalidated)
		.collect();
	assert_eq!(
		invalidated,
		vec![PoolEvent::connection_invalidated(
			parent_id,
			"Connection record belongs to pid 100, attempting to check out in pid 200",
		)]
	);
	let value: i64 = sqlx::query_scalar("SELECT 1")
		.fetch_one(&mut *conn)
		.await
		.unwrap();
	assert_eq!(value, 1);
}

#[rstest]
#[tokio::test]
async fn test_same_pid_keeps_connection(database: TempDatabase) {
	// Arrange
	let pool = ConnectionPool::new_sqlite(&database.url, PoolConfig::default())
		.await
		.unwrap();
	let guard = add_engine_pidguard(&pool);

	// Act
	let first = pool.acquire().await.unwrap();
	let first_id = first.connection_id().to_string();
	drop(first);
	let second = pool.acquire().await.unwrap();

	// Assert
	assert_eq!(pool.listener_count(), 1);
	assert_eq!(second.connection_id(), first_id);
	assert_eq!(
		PidGuard::owner_pid(second.record()),
		Some(guard.current_pid())
	);
}

#[rstest]
#[case(0, 1)]
#[case(2, 3)]
#[tokio::test]
async fn test_reconnect_attempts_are_bounded(
	database: TempDatabase,
	#[case] attempts: u32,
	#[case] expected_connects: usize,
) {
	// Arrange
	let config = PoolConfig::default().with_max_reconnect_attempts(attempts);
	let pool = ConnectionPool::new_sqlite(&database.url, config).await.unwrap();
	let recorder = Arc::new(EventRecorder::default());
	pool.add_listener(recorder.clone());
	pool.add_listener(Arc::new(AlwaysDisconnect));

	// Act
	let result = pool.acquire().await;

	// Assert
	assert!(matches!(result, Err(PoolError::Disconnection(ref reason)) if reason == "server went away"));
	assert_eq!(recorder.count(is_created), expected_connects);
	assert_eq!(recorder.count(is_invalidated), expected_connects);
	assert_eq!(pool.idle_count(), 0);
}

#[rstest]
#[tokio::test]
async fn test_listener_error_keeps_connection_idle(database: TempDatabase) {
	// Arrange
	let pool = ConnectionPool::new_sqlite(&database.url, PoolConfig::default())
		.await
		.unwrap();
	pool.add_listener(Arc::new(RejectCheckout));

	// Act
	let result = pool.acquire().await;

	// Assert
	assert!(matches!(result, Err(PoolError::Listener(_))));
	assert_eq!(pool.idle_count(), 1);
}

#[rstest]
#[tokio::test]
async fn test_invalidated_connection_is_not_returned(database: TempDatabase) {
	// Arrange
	let pool = ConnectionPool::new_sqlite(&database.url, PoolConfig::default())
		.await
		.unwrap();
	let recorder = Arc::new(EventRecorder::default());
	pool.add_listener(recorder.clone());
	let conn = pool.acquire().await.unwrap();
	let id = conn.connection_id().to_string();

	// Act
	conn.invalidate("corrupted").await;

	// Assert
	assert_eq!(pool.idle_count(), 0);
	assert!(
		recorder
			.events()
			.contains(&PoolEvent::connection_invalidated(id, "corrupted"))
	);
}

#[rstest]
#[tokio::test]
async fn test_acquire_times_out_when_exhausted(database: TempDatabase) {
	// Arrange
	let config = PoolConfig::default()
		.with_max_connections(1)
		.with_acquire_timeout(Duration::from_millis(50));
	let pool = ConnectionPool::new_sqlite(&database.url, config).await.unwrap();
	let _held = pool.acquire().await.unwrap();

	// Act
	let result = pool.acquire().await;

	// Assert
	assert!(matches!(result, Err(PoolError::Timeout(d)) if d == Duration::from_millis(50)));
}

#[rstest]
#[tokio::test]
async fn test_closed_pool_rejects_acquire(database: TempDatabase) {
	// Arrange
	let pool = ConnectionPool::new_sqlite(&database.url, PoolConfig::default())
		.await
		.unwrap();
	drop(pool.acquire().await.unwrap());

	// Act
	pool.close();
	let result = pool.acquire().await;

	// Assert
	assert!(pool.is_closed());
	assert_eq!(pool.idle_count(), 0);
	assert!(matches!(result, Err(PoolError::Closed)));
}

#[rstest]
#[tokio::test]
async fn test_prefill_opens_min_connections(database: TempDatabase) {
	// Arrange
	let config = PoolConfig::default().with_min_connections(2);
	let pool = ConnectionPool::new_sqlite(&database.url, config).await.unwrap();
	let recorder = Arc::new(EventRecorder::default());
	pool.add_listener(recorder.clone());

	// Act
	pool.prefill().await.unwrap();

	// Assert
	assert_eq!(pool.idle_count(), 2);
	assert_eq!(recorder.count(is_created), 2);
}

#[rstest]
#[tokio::test]
async fn test_invalid_config_is_rejected() {
	// Arrange
	let manager = SqliteConnectionManager::new("sqlite::memory:").unwrap();
	let config = PoolConfig::default().with_max_connections(0);

	// Act
	let result = ConnectionPool::new(manager, config).await;

	// Assert
	assert!(matches!(result, Err(PoolError::Config(_))));
}
