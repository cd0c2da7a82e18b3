//! # Rostra Configuration
//!
//! Database and connection pool settings for Rostra applications.
//!
//! Settings are read from a TOML file and can then be overridden by
//! `ROSTRA_`-prefixed environment variables.
//!
//! ## Quick Start
//!
//! ```rust
//! use rostra_conf::Settings;
//!
//! let settings = Settings::from_toml_str(
//!     r#"
//!     [database]
//!     engine = "rostra.db.backends.sqlite3"
//!     name = "app.db"
//!
//!     [pool]
//!     max_connections = 4
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.database.to_url(), "sqlite:app.db");
//! assert_eq!(settings.pool.max_connections, 4);
//! assert_eq!(settings.pool.max_reconnect_attempts, 3);
//! ```
//!
//! ## Module Organization
//!
//! - [`settings`]: settings structs, loading and environment overrides

pub mod settings;

pub use settings::env::{Env, EnvError};
pub use settings::{DatabaseConfig, PoolSettings, Settings, SettingsError, SettingsResult};
