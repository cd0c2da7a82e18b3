//! Column value codecs
//!
//! SQLite has no native datetime storage class. [`EpochSeconds`] stores a
//! timestamp as INTEGER seconds since 1970-01-01T00:00:00Z and reads it
//! back as a [`chrono::DateTime<Utc>`](chrono::DateTime).

pub mod epoch;

pub use epoch::EpochSeconds;

use thiserror::Error;

/// Error raised when a stored value cannot be converted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CodecError {
	/// Seconds value outside the range `chrono` can represent
	#[error("Timestamp out of range: {0} seconds since epoch")]
	OutOfRange(i64),

	#[error("Unexpected value: expected {expected}, found {found}")]
	UnexpectedValue {
		expected: &'static str,
		found: &'static str,
	},
}
