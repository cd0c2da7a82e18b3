//! Integer-seconds timestamp codec

use super::CodecError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::{Database, Decode, Encode, Sqlite, Type};
use std::fmt;
use std::ops::Deref;

/// A UTC timestamp stored as whole seconds since the Unix epoch
///
/// Sub-second precision is truncated on encode, so a stored value always
/// decodes to a second-aligned instant.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rostra_db::types::EpochSeconds;
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
/// let seconds = EpochSeconds::encode(&instant);
/// assert_eq!(seconds, 1_704_164_645);
/// assert_eq!(EpochSeconds::decode(seconds).unwrap(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochSeconds(pub DateTime<Utc>);

impl EpochSeconds {
	/// Seconds since the epoch for `value`
	pub fn encode(value: &DateTime<Utc>) -> i64 {
		value.timestamp()
	}

	/// The instant `seconds` after the epoch
	pub fn decode(seconds: i64) -> Result<DateTime<Utc>, CodecError> {
		DateTime::from_timestamp(seconds, 0).ok_or(CodecError::OutOfRange(seconds))
	}

	pub fn from_seconds(seconds: i64) -> Result<Self, CodecError> {
		Self::decode(seconds).map(Self)
	}

	pub fn seconds(&self) -> i64 {
		Self::encode(&self.0)
	}

	pub fn into_inner(self) -> DateTime<Utc> {
		self.0
	}
}

impl From<DateTime<Utc>> for EpochSeconds {
	fn from(value: DateTime<Utc>) -> Self {
		Self(value)
	}
}

impl From<EpochSeconds> for DateTime<Utc> {
	fn from(value: EpochSeconds) -> Self {
		value.0
	}
}

impl Deref for EpochSeconds {
	type Target = DateTime<Utc>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl fmt::Display for EpochSeconds {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0.to_rfc3339())
	}
}

impl Type<Sqlite> for EpochSeconds {
	fn type_info() -> <Sqlite as Database>::TypeInfo {
		<i64 as Type<Sqlite>>::type_info()
	}

	fn compatible(ty: &<Sqlite as Database>::TypeInfo) -> bool {
		<i64 as Type<Sqlite>>::compatible(ty)
	}
}

impl<'q> Encode<'q, Sqlite> for EpochSeconds {
	fn encode_by_ref(
		&self,
		buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
	) -> Result<IsNull, BoxDynError> {
		<i64 as Encode<'q, Sqlite>>::encode(self.seconds(), buf)
	}
}

impl<'r> Decode<'r, Sqlite> for EpochSeconds {
	fn decode(value: <Sqlite as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
		let seconds = <i64 as Decode<'r, Sqlite>>::decode(value)?;
		Ok(Self::from_seconds(seconds)?)
	}
}
