//! Role model persistence through the pool

use rostra_db::models::Role;
use rostra_db::pool::{ConnectionPool, PoolConfig, add_engine_pidguard};
use rostra_db::reflection::{ColumnType, SqliteInspector};
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn test_roles_round_trip_through_guarded_pool() {
	// Arrange
	let dir = tempfile::tempdir().unwrap();
	let url = format!("sqlite://{}", dir.path().join("roles.db").display());
	let pool = ConnectionPool::new_sqlite(&url, PoolConfig::default())
		.await
		.unwrap();
	add_engine_pidguard(&pool);
	let mut conn = pool.acquire().await.unwrap();
	Role::create_table(&mut conn).await.unwrap();

	// Act
	let admin = Role::insert(&mut conn, "admin", "Administrator").await.unwrap();
	let editor = Role::insert(&mut conn, "editor", "Editor").await.unwrap();
	drop(conn);
	let mut conn = pool.acquire().await.unwrap();
	let roles = Role::all(&mut conn).await.unwrap();

	// Assert
	assert_eq!(roles, vec![admin.clone(), editor]);
	assert_eq!(admin.id, 1);
	assert_eq!(roles[0].to_string(), "Administrator");
}

#[rstest]
#[tokio::test]
async fn test_roles_table_reflection() {
	// Arrange
	let dir = tempfile::tempdir().unwrap();
	let url = format!("sqlite://{}", dir.path().join("roles.db").display());
	let pool = ConnectionPool::new_sqlite(&url, PoolConfig::default())
		.await
		.unwrap();
	let mut conn = pool.acquire().await.unwrap();
	Role::create_table(&mut conn).await.unwrap();

	// Act
	let table = SqliteInspector::with_datetime_fix()
		.reflect_table(&mut conn, "roles")
		.await
		.unwrap();

	// Assert
	let name = table.column("name").unwrap();
	assert_eq!(name.declared_type, "VARCHAR(200)");
	assert_eq!(name.column_type, ColumnType::Text);
	assert!(!name.nullable);
	assert!(table.column("id").unwrap().primary_key);
	assert_eq!(table.columns.len(), 3);
}
