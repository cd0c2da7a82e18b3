//! Environment variable handling
//!
//! Typed lookups of environment variables, optionally under a common prefix.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Environment variable reader with prefix support
#[derive(Debug, Clone, Default)]
pub struct Env {
	/// Optional prefix for environment variables (e.g., "ROSTRA_")
	pub prefix: Option<String>,
}

impl Env {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set a prefix for all environment variable lookups
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Full variable name for `key`, including the prefix
	///
	/// # Examples
	///
	/// ```
	/// use rostra_conf::Env;
	///
	/// assert_eq!(Env::new().key_name("PORT"), "PORT");
	/// assert_eq!(Env::new().with_prefix("ROSTRA_").key_name("PORT"), "ROSTRA_PORT");
	/// ```
	pub fn key_name(&self, key: &str) -> String {
		match &self.prefix {
			Some(prefix) => format!("{}{}", prefix, key),
			None => key.to_string(),
		}
	}

	/// Read a string value, `None` when unset
	pub fn opt_str(&self, key: &str) -> Result<Option<String>, EnvError> {
		let full_key = self.key_name(key);
		validate_env_var_name(&full_key)?;
		Ok(env::var(&full_key).ok())
	}

	/// Read a required string value
	pub fn str(&self, key: &str) -> Result<String, EnvError> {
		self.opt_str(key)?
			.ok_or_else(|| EnvError::MissingVariable(self.key_name(key)))
	}

	/// Read a string value with a default
	pub fn str_with_default(&self, key: &str, default: &str) -> Result<String, EnvError> {
		Ok(self.opt_str(key)?.unwrap_or_else(|| default.to_string()))
	}

	/// Read and parse a value, `None` when unset
	pub fn parse<T>(&self, key: &str) -> Result<Option<T>, EnvError>
	where
		T: FromStr,
		T::Err: Display,
	{
		let Some(value) = self.opt_str(key)? else {
			return Ok(None);
		};
		value
			.parse::<T>()
			.map(Some)
			.map_err(|e| EnvError::ParseError {
				key: self.key_name(key),
				value_len: value.len(),
				error: e.to_string(),
			})
	}

	/// Read a boolean value, `None` when unset
	///
	/// Accepts `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0`, ignoring case.
	pub fn bool(&self, key: &str) -> Result<Option<bool>, EnvError> {
		let Some(value) = self.opt_str(key)? else {
			return Ok(None);
		};
		parse_bool(&value)
			.map(Some)
			.map_err(|error| EnvError::ParseError {
				key: self.key_name(key),
				value_len: value.len(),
				error,
			})
	}
}

/// Parse a boolean the way settings files spell it
pub fn parse_bool(value: &str) -> Result<bool, String> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "yes" | "on" | "1" => Ok(true),
		"false" | "no" | "off" | "0" => Ok(false),
		_ => Err("expected a boolean".to_string()),
	}
}

/// Validates an environment variable name.
///
/// Rejects names that are empty, contain control characters, or contain
/// the `=` separator.
pub fn validate_env_var_name(name: &str) -> Result<(), EnvError> {
	let reason = if name.is_empty() {
		"environment variable name must not be empty".to_string()
	} else if let Some(pos) = name.find(|c: char| c.is_control()) {
		format!(
			"environment variable name contains control character at position {}",
			pos
		)
	} else if name.contains('=') {
		"environment variable name must not contain '='".to_string()
	} else {
		return Ok(());
	};
	Err(EnvError::InvalidVariableName {
		name: name.to_string(),
		reason,
	})
}

/// Environment variable errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EnvError {
	#[error("Missing environment variable: {0}")]
	MissingVariable(String),

	#[error("Failed to parse environment variable '{key}' (value length: {value_len}): {error}")]
	ParseError {
		key: String,
		/// Length of the original value, kept instead of the value itself
		value_len: usize,
		error: String,
	},

	#[error("Invalid environment variable name '{name}': {reason}")]
	InvalidVariableName { name: String, reason: String },
}
