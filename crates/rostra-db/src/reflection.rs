//! Table reflection with per-column listeners
//!
//! [`SqliteInspector`] reads a table's columns from `PRAGMA table_info` and
//! hands each [`ColumnInfo`] to the [`ColumnReflectListener`]s registered in
//! its [`ReflectionHooks`] before the table description is returned.
//! Listeners may rewrite the column's effective [`ColumnType`], which then
//! drives how values are bound and read back ([`TableInfo::encode_value`],
//! [`TableInfo::decode_row`]).

pub mod column;
pub mod errors;
pub mod hooks;
pub mod inspector;
pub mod sqlite_datetime;

pub use column::{ColumnInfo, ColumnType, ColumnValue, TableInfo};
pub use errors::{ReflectionError, ReflectionResult};
pub use hooks::{ColumnReflectListener, ReflectionHooks};
pub use inspector::SqliteInspector;
pub use sqlite_datetime::{SqliteDateTimeFix, install_sqlite_datetime_fix};
