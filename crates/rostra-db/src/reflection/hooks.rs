//! Column reflection listeners

use super::column::ColumnInfo;
use crate::backends::DatabaseType;
use std::fmt;
use std::sync::Arc;

/// Listener fired once for every column of a reflected table
pub trait ColumnReflectListener: Send + Sync {
	/// Inspect or rewrite `column` before it is added to the table description
	fn on_column_reflect(&self, database: DatabaseType, table: &str, column: &mut ColumnInfo);

	/// Name used to detect duplicate registrations
	fn name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}
}

/// Registry of column reflection listeners
#[derive(Clone, Default)]
pub struct ReflectionHooks {
	listeners: Vec<Arc<dyn ColumnReflectListener>>,
}

impl ReflectionHooks {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a listener; listeners fire in registration order
	pub fn add_listener(&mut self, listener: Arc<dyn ColumnReflectListener>) {
		self.listeners.push(listener);
	}

	pub fn has_listener(&self, name: &str) -> bool {
		self.listeners.iter().any(|l| l.name() == name)
	}

	pub fn len(&self) -> usize {
		self.listeners.len()
	}

	pub fn is_empty(&self) -> bool {
		self.listeners.is_empty()
	}

	/// Fire every listener for `column`
	pub fn fire(&self, database: DatabaseType, table: &str, column: &mut ColumnInfo) {
		for listener in &self.listeners {
			listener.on_column_reflect(database, table, column);
		}
	}
}

impl fmt::Debug for ReflectionHooks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list()
			.entries(self.listeners.iter().map(|l| l.name()))
			.finish()
	}
}
