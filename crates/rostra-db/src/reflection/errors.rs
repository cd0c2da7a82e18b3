//! Reflection error types

use crate::types::CodecError;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReflectionError {
	#[error("Database error: {0}")]
	Database(#[from] sqlx::Error),

	#[error("Table not found: {0}")]
	TableNotFound(String),

	#[error("Unknown column {column} on table {table}")]
	UnknownColumn { table: String, column: String },

	#[error("Codec error: {0}")]
	Codec(#[from] CodecError),
}

pub type ReflectionResult<T> = Result<T, ReflectionError>;
