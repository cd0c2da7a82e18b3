//! Integer storage for SQLite datetime columns

use super::column::{ColumnInfo, ColumnType};
use super::hooks::{ColumnReflectListener, ReflectionHooks};
use crate::backends::DatabaseType;
use std::sync::Arc;

/// Reflection listener storing SQLite `DATETIME` columns as epoch seconds
///
/// Columns of other types, and every column of a non-SQLite database, are
/// left untouched.
///
/// # Examples
///
/// ```
/// use rostra_db::DatabaseType;
/// use rostra_db::reflection::{
///     ColumnInfo, ColumnReflectListener, ColumnType, SqliteDateTimeFix,
/// };
///
/// let mut column = ColumnInfo {
///     name: "created_at".to_string(),
///     column_type: ColumnType::DateTime,
///     declared_type: "DATETIME".to_string(),
///     nullable: true,
///     default: None,
///     primary_key: false,
/// };
///
/// SqliteDateTimeFix.on_column_reflect(DatabaseType::Postgres, "events", &mut column);
/// assert_eq!(column.column_type, ColumnType::DateTime);
///
/// SqliteDateTimeFix.on_column_reflect(DatabaseType::Sqlite, "events", &mut column);
/// assert_eq!(column.column_type, ColumnType::EpochSeconds);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDateTimeFix;

impl ColumnReflectListener for SqliteDateTimeFix {
	fn on_column_reflect(&self, database: DatabaseType, table: &str, column: &mut ColumnInfo) {
		if !database.is_sqlite() || !column.column_type.is_datetime() {
			return;
		}
		tracing::debug!(
			table,
			column = %column.name,
			"storing datetime column as epoch seconds"
		);
		column.column_type = ColumnType::EpochSeconds;
	}
}

/// Register [`SqliteDateTimeFix`] on `hooks` when `database` is SQLite
///
/// Returns whether the listener is registered after the call. Installing
/// twice registers it once.
///
/// # Examples
///
/// ```
/// use rostra_db::DatabaseType;
/// use rostra_db::reflection::{ReflectionHooks, install_sqlite_datetime_fix};
///
/// let mut hooks = ReflectionHooks::new();
/// assert!(!install_sqlite_datetime_fix(&mut hooks, DatabaseType::Mysql));
/// assert!(hooks.is_empty());
///
/// assert!(install_sqlite_datetime_fix(&mut hooks, DatabaseType::Sqlite));
/// assert!(install_sqlite_datetime_fix(&mut hooks, DatabaseType::Sqlite));
/// assert_eq!(hooks.len(), 1);
/// ```
pub fn install_sqlite_datetime_fix(hooks: &mut ReflectionHooks, database: DatabaseType) -> bool {
	if !database.is_sqlite() {
		return false;
	}
	if !hooks.has_listener(SqliteDateTimeFix.name()) {
		hooks.add_listener(Arc::new(SqliteDateTimeFix));
	}
	true
}
