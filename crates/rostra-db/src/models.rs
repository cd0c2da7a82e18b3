//! Application models

use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use std::fmt;

/// DDL for the `roles` table
pub const ROLES_TABLE: &str = "CREATE TABLE IF NOT EXISTS roles (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	name VARCHAR(200) NOT NULL,
	title_name VARCHAR(200) NOT NULL
)";

/// A named role; displayed by its title
///
/// # Examples
///
/// ```
/// use rostra_db::models::Role;
///
/// let role = Role {
///     id: 1,
///     name: "admin".to_string(),
///     title_name: "Administrator".to_string(),
/// };
/// assert_eq!(role.to_string(), "Administrator");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
	pub id: i64,
	pub name: String,
	pub title_name: String,
}

impl Role {
	pub async fn create_table(conn: &mut SqliteConnection) -> sqlx::Result<()> {
		sqlx::query(ROLES_TABLE).execute(&mut *conn).await?;
		Ok(())
	}

	/// Insert a role and return it with its assigned id
	pub async fn insert(
		conn: &mut SqliteConnection,
		name: &str,
		title_name: &str,
	) -> sqlx::Result<Self> {
		let result = sqlx::query("INSERT INTO roles (name, title_name) VALUES (?, ?)")
			.bind(name)
			.bind(title_name)
			.execute(&mut *conn)
			.await?;
		Ok(Self {
			id: result.last_insert_rowid(),
			name: name.to_string(),
			title_name: title_name.to_string(),
		})
	}

	pub async fn all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<Self>> {
		sqlx::query_as("SELECT id, name, title_name FROM roles ORDER BY id")
			.fetch_all(&mut *conn)
			.await
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.title_name)
	}
}
