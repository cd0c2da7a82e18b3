//! Reflected column metadata and values

use super::errors::{ReflectionError, ReflectionResult};
use crate::types::{CodecError, EpochSeconds};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row, Sqlite, TypeInfo, ValueRef};
use std::collections::HashMap;

/// Effective type of a reflected column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
	Integer,
	Real,
	Numeric,
	Text,
	Blob,
	Boolean,
	Date,
	DateTime,
	/// Timestamp stored as INTEGER seconds since the Unix epoch
	EpochSeconds,
}

impl ColumnType {
	/// Map a SQLite declared type to a column type
	///
	/// Date, datetime and boolean declarations are recognized by name; other
	/// declarations follow SQLite's column affinity rules.
	///
	/// # Examples
	///
	/// ```
	/// use rostra_db::reflection::ColumnType;
	///
	/// assert_eq!(ColumnType::from_sqlite_declared("DATETIME"), ColumnType::DateTime);
	/// assert_eq!(ColumnType::from_sqlite_declared("VARCHAR(200)"), ColumnType::Text);
	/// assert_eq!(ColumnType::from_sqlite_declared("BIGINT"), ColumnType::Integer);
	/// assert_eq!(ColumnType::from_sqlite_declared(""), ColumnType::Blob);
	/// assert_eq!(ColumnType::from_sqlite_declared("DECIMAL(10,2)"), ColumnType::Numeric);
	/// ```
	pub fn from_sqlite_declared(declared: &str) -> Self {
		let declared = declared.trim().to_ascii_uppercase();
		let base = declared
			.split(|c: char| c == '(' || c.is_whitespace())
			.next()
			.unwrap_or_default();

		match base {
			"DATETIME" | "TIMESTAMP" => return ColumnType::DateTime,
			"DATE" => return ColumnType::Date,
			"BOOLEAN" | "BOOL" => return ColumnType::Boolean,
			_ => {}
		}

		if declared.contains("INT") {
			ColumnType::Integer
		} else if ["CHAR", "CLOB", "TEXT"].iter().any(|t| declared.contains(t)) {
			ColumnType::Text
		} else if declared.is_empty() || declared.contains("BLOB") {
			ColumnType::Blob
		} else if ["REAL", "FLOA", "DOUB"].iter().any(|t| declared.contains(t)) {
			ColumnType::Real
		} else {
			ColumnType::Numeric
		}
	}

	pub fn is_datetime(&self) -> bool {
		matches!(self, ColumnType::DateTime)
	}

	/// Convert a value before it is bound as a parameter for this column
	pub fn bind_value(&self, value: ColumnValue) -> Result<ColumnValue, CodecError> {
		match (self, value) {
			(ColumnType::EpochSeconds, ColumnValue::DateTime(dt)) => {
				Ok(ColumnValue::Integer(EpochSeconds::encode(&dt)))
			}
			(ColumnType::EpochSeconds, value @ (ColumnValue::Null | ColumnValue::Integer(_))) => {
				Ok(value)
			}
			(ColumnType::EpochSeconds, other) => Err(CodecError::UnexpectedValue {
				expected: "datetime",
				found: other.kind(),
			}),
			(_, value) => Ok(value),
		}
	}

	/// Convert a value read from storage for this column
	pub fn result_value(&self, value: ColumnValue) -> Result<ColumnValue, CodecError> {
		match (self, value) {
			(ColumnType::EpochSeconds, ColumnValue::Integer(seconds)) => {
				EpochSeconds::decode(seconds).map(ColumnValue::DateTime)
			}
			(ColumnType::EpochSeconds, value @ (ColumnValue::Null | ColumnValue::DateTime(_))) => {
				Ok(value)
			}
			(ColumnType::EpochSeconds, other) => Err(CodecError::UnexpectedValue {
				expected: "integer",
				found: other.kind(),
			}),
			(ColumnType::Boolean, ColumnValue::Integer(i)) => Ok(ColumnValue::Boolean(i != 0)),
			(_, value) => Ok(value),
		}
	}
}

/// A single column value
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
	Null,
	Integer(i64),
	Real(f64),
	Text(String),
	Blob(Vec<u8>),
	Boolean(bool),
	DateTime(DateTime<Utc>),
}

impl ColumnValue {
	/// Name of the variant, used in error messages
	pub fn kind(&self) -> &'static str {
		match self {
			ColumnValue::Null => "null",
			ColumnValue::Integer(_) => "integer",
			ColumnValue::Real(_) => "real",
			ColumnValue::Text(_) => "text",
			ColumnValue::Blob(_) => "blob",
			ColumnValue::Boolean(_) => "boolean",
			ColumnValue::DateTime(_) => "datetime",
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, ColumnValue::Null)
	}

	/// Bind this value as the next parameter of `query`
	pub fn bind_to<'q>(
		self,
		query: Query<'q, Sqlite, SqliteArguments<'q>>,
	) -> Query<'q, Sqlite, SqliteArguments<'q>> {
		match self {
			ColumnValue::Null => query.bind(None::<i64>),
			ColumnValue::Integer(i) => query.bind(i),
			ColumnValue::Real(f) => query.bind(f),
			ColumnValue::Text(s) => query.bind(s),
			ColumnValue::Blob(b) => query.bind(b),
			ColumnValue::Boolean(b) => query.bind(b),
			ColumnValue::DateTime(dt) => query.bind(dt),
		}
	}
}

impl From<i64> for ColumnValue {
	fn from(i: i64) -> Self {
		ColumnValue::Integer(i)
	}
}

impl From<f64> for ColumnValue {
	fn from(f: f64) -> Self {
		ColumnValue::Real(f)
	}
}

impl From<bool> for ColumnValue {
	fn from(b: bool) -> Self {
		ColumnValue::Boolean(b)
	}
}

impl From<&str> for ColumnValue {
	fn from(s: &str) -> Self {
		ColumnValue::Text(s.to_string())
	}
}

impl From<String> for ColumnValue {
	fn from(s: String) -> Self {
		ColumnValue::Text(s)
	}
}

impl From<Vec<u8>> for ColumnValue {
	fn from(b: Vec<u8>) -> Self {
		ColumnValue::Blob(b)
	}
}

impl From<DateTime<Utc>> for ColumnValue {
	fn from(dt: DateTime<Utc>) -> Self {
		ColumnValue::DateTime(dt)
	}
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(ColumnValue::Null, Into::into)
	}
}

/// Column metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
	/// Column name
	pub name: String,
	/// Effective type; reflection listeners may replace it
	pub column_type: ColumnType,
	/// Type as written in the table definition
	pub declared_type: String,
	/// Whether the column is nullable
	pub nullable: bool,
	/// Default value expression
	pub default: Option<String>,
	/// Whether the column is part of the primary key
	pub primary_key: bool,
}

/// Table metadata
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
	/// Table name
	pub name: String,
	/// Columns in declaration order
	pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
	pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
		self.columns.iter().find(|c| c.name == name)
	}

	/// Convert `value` for binding into column `column`
	pub fn encode_value(&self, column: &str, value: ColumnValue) -> ReflectionResult<ColumnValue> {
		let info = self
			.column(column)
			.ok_or_else(|| ReflectionError::UnknownColumn {
				table: self.name.clone(),
				column: column.to_string(),
			})?;
		Ok(info.column_type.bind_value(value)?)
	}

	/// Read every column of `row`, converting values of known columns
	///
	/// Values are read by their storage class. Result columns that are not
	/// part of this table, such as expressions, are returned unconverted.
	pub fn decode_row(&self, row: &SqliteRow) -> ReflectionResult<HashMap<String, ColumnValue>> {
		let mut values = HashMap::with_capacity(row.columns().len());
		for (idx, column) in row.columns().iter().enumerate() {
			let raw = row.try_get_raw(idx)?;
			let value = if raw.is_null() {
				ColumnValue::Null
			} else {
				let storage = raw.type_info().name().to_string();
				match storage.as_str() {
					"INTEGER" => ColumnValue::Integer(row.try_get(idx)?),
					"REAL" => ColumnValue::Real(row.try_get(idx)?),
					"BLOB" => ColumnValue::Blob(row.try_get(idx)?),
					_ => ColumnValue::Text(row.try_get(idx)?),
				}
			};

			let value = match self.column(column.name()) {
				Some(info) => info.column_type.result_value(value)?,
				None => value,
			};
			values.insert(column.name().to_string(), value);
		}
		Ok(values)
	}
}
