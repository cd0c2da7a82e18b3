//! SQLite table inspector

use super::column::{ColumnInfo, ColumnType, TableInfo};
use super::errors::{ReflectionError, ReflectionResult};
use super::hooks::ReflectionHooks;
use super::sqlite_datetime::install_sqlite_datetime_fix;
use crate::backends::DatabaseType;
use sqlx::SqliteConnection;

/// Reads table definitions from a SQLite connection
#[derive(Debug, Clone, Default)]
pub struct SqliteInspector {
	hooks: ReflectionHooks,
}

impl SqliteInspector {
	pub fn new(hooks: ReflectionHooks) -> Self {
		Self { hooks }
	}

	/// Inspector with [`SqliteDateTimeFix`](super::SqliteDateTimeFix) installed
	pub fn with_datetime_fix() -> Self {
		let mut hooks = ReflectionHooks::new();
		install_sqlite_datetime_fix(&mut hooks, DatabaseType::Sqlite);
		Self { hooks }
	}

	pub fn hooks(&self) -> &ReflectionHooks {
		&self.hooks
	}

	pub fn hooks_mut(&mut self) -> &mut ReflectionHooks {
		&mut self.hooks
	}

	/// Reflect the columns of `table`
	///
	/// Every registered listener sees each column once, in declaration
	/// order, before the description is returned.
	pub async fn reflect_table(
		&self,
		conn: &mut SqliteConnection,
		table: &str,
	) -> ReflectionResult<TableInfo> {
		#[derive(sqlx::FromRow)]
		struct TableInfoRow {
			// PRAGMA field: column position, rows already arrive in order
			#[allow(dead_code)]
			cid: i64,
			name: String,
			r#type: String,
			notnull: i64,
			dflt_value: Option<String>,
			pk: i64,
		}

		let query = format!("PRAGMA table_info({})", quote_identifier(table));
		let rows: Vec<TableInfoRow> = sqlx::query_as(&query).fetch_all(&mut *conn).await?;
		if rows.is_empty() {
			return Err(ReflectionError::TableNotFound(table.to_string()));
		}

		let mut columns = Vec::with_capacity(rows.len());
		for row in rows {
			let mut column = ColumnInfo {
				column_type: ColumnType::from_sqlite_declared(&row.r#type),
				name: row.name,
				declared_type: row.r#type,
				nullable: row.notnull == 0 && row.pk == 0,
				default: row.dflt_value,
				primary_key: row.pk > 0,
			};
			self.hooks.fire(DatabaseType::Sqlite, table, &mut column);
			columns.push(column);
		}

		tracing::debug!(table, columns = columns.len(), "reflected table");
		Ok(TableInfo {
			name: table.to_string(),
			columns,
		})
	}

	/// Names of the user tables in the database
	pub async fn table_names(&self, conn: &mut SqliteConnection) -> ReflectionResult<Vec<String>> {
		let names: Vec<(String,)> = sqlx::query_as(
			"SELECT name FROM sqlite_master WHERE type = 'table' \
			 AND name NOT LIKE 'sqlite_%' ORDER BY name",
		)
		.fetch_all(&mut *conn)
		.await?;
		Ok(names.into_iter().map(|(name,)| name).collect())
	}
}

fn quote_identifier(name: &str) -> String {
	format!("\"{}\"", name.replace('"', "\"\""))
}
