//! Core settings
//!
//! [`Settings`] groups the database connection and pool sections of a
//! settings file:
//!
//! ```toml
//! [database]
//! engine = "rostra.db.backends.sqlite3"
//! name = "db.sqlite3"
//!
//! [pool]
//! max_connections = 10
//! acquire_timeout_secs = 30
//! ```
//!
//! Every key can be overridden from the environment with
//! [`Settings::with_env_overrides`]; see [`ENV_PREFIX`].

pub mod database_config;
pub mod env;
pub mod pool;

pub use database_config::DatabaseConfig;
pub use pool::PoolSettings;

use env::{Env, EnvError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Prefix of the environment variables read by [`Settings::from_env`]
pub const ENV_PREFIX: &str = "ROSTRA_";

/// Settings loading errors
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
	#[error("Failed to parse settings: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Failed to read settings file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error(transparent)]
	Env(#[from] EnvError),

	#[error("Invalid settings: {0}")]
	Invalid(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Application settings
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub database: DatabaseConfig,
	pub pool: PoolSettings,
}

impl Settings {
	/// Parse settings from TOML; missing sections and keys take defaults
	///
	/// # Examples
	///
	/// ```
	/// use rostra_conf::Settings;
	///
	/// let settings = Settings::from_toml_str("").unwrap();
	/// assert_eq!(settings, Settings::default());
	/// assert_eq!(settings.database.to_url(), "sqlite:db.sqlite3");
	///
	/// assert!(Settings::from_toml_str("[pool]\nmax_connections = 0").is_err());
	/// ```
	pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Read settings from a TOML file
	pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		tracing::debug!(path = %path.display(), "loading settings file");
		Self::from_toml_str(&source)
	}

	/// Defaults overridden by `ROSTRA_`-prefixed environment variables
	pub fn from_env() -> SettingsResult<Self> {
		Self::default().with_env_overrides(&Env::new().with_prefix(ENV_PREFIX))
	}

	/// Apply environment overrides
	///
	/// Recognized keys, relative to the prefix of `env`:
	/// `DATABASE_ENGINE`, `DATABASE_NAME`, `DATABASE_USER`,
	/// `DATABASE_PASSWORD`, `DATABASE_HOST`, `DATABASE_PORT`,
	/// `POOL_MAX_CONNECTIONS`, `POOL_MIN_CONNECTIONS`,
	/// `POOL_ACQUIRE_TIMEOUT_SECS` and `POOL_MAX_RECONNECT_ATTEMPTS`.
	pub fn with_env_overrides(mut self, env: &Env) -> SettingsResult<Self> {
		let mut applied = Vec::new();

		let db = &mut self.database;
		override_value(env, "DATABASE_ENGINE", &mut db.engine, &mut applied)?;
		override_value(env, "DATABASE_NAME", &mut db.name, &mut applied)?;
		override_option(env, "DATABASE_USER", &mut db.user, &mut applied)?;
		override_option(env, "DATABASE_PASSWORD", &mut db.password, &mut applied)?;
		override_option(env, "DATABASE_HOST", &mut db.host, &mut applied)?;
		override_option(env, "DATABASE_PORT", &mut db.port, &mut applied)?;

		let pool = &mut self.pool;
		override_value(env, "POOL_MAX_CONNECTIONS", &mut pool.max_connections, &mut applied)?;
		override_value(env, "POOL_MIN_CONNECTIONS", &mut pool.min_connections, &mut applied)?;
		override_value(
			env,
			"POOL_ACQUIRE_TIMEOUT_SECS",
			&mut pool.acquire_timeout_secs,
			&mut applied,
		)?;
		override_value(
			env,
			"POOL_MAX_RECONNECT_ATTEMPTS",
			&mut pool.max_reconnect_attempts,
			&mut applied,
		)?;

		if !applied.is_empty() {
			tracing::debug!(keys = ?applied, "applied environment overrides");
		}
		self.validate()?;
		Ok(self)
	}

	pub fn validate(&self) -> SettingsResult<()> {
		if self.database.name.is_empty() {
			return Err(SettingsError::Invalid(
				"database.name must not be empty".to_string(),
			));
		}
		self.pool.validate().map_err(SettingsError::Invalid)
	}
}

fn override_value<T>(
	env: &Env,
	key: &str,
	target: &mut T,
	applied: &mut Vec<String>,
) -> Result<(), EnvError>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	if let Some(value) = env.parse(key)? {
		*target = value;
		applied.push(env.key_name(key));
	}
	Ok(())
}

fn override_option<T>(
	env: &Env,
	key: &str,
	target: &mut Option<T>,
	applied: &mut Vec<String>,
) -> Result<(), EnvError>
where
	T: std::str::FromStr,
	T::Err: std::fmt::Display,
{
	if let Some(value) = env.parse(key)? {
		*target = Some(value);
		applied.push(env.key_name(key));
	}
	Ok(())
}
