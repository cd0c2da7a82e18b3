//! # Rostra
//!
//! Input hygiene and database compatibility shims for the Rostra web
//! application.
//!
//! ## Feature Flags
//!
//! - `minimal` - text normalization and HTML sanitization only
//! - `full` (default) - everything below
//! - `utils` - [`utils`]: line-break cleanup, HTML sanitizing and auto-linking
//! - `database` - [`db`]: pool pid guard and SQLite datetime storage
//! - `conf` - [`conf`]: database and pool settings
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "utils")]
//! # {
//! use rostra::utils::{clean_html, clean_up_string};
//!
//! assert_eq!(clean_up_string(Some(" 090 1234\r\n")).as_deref(), Some("0901234"));
//! assert_eq!(
//!     clean_html(Some("<i onclick=\"x()\">hi</i>"), false).as_deref(),
//!     Some("<i>hi</i>")
//! );
//! # }
//! ```

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "database")]
pub mod db;
#[cfg(feature = "utils")]
pub mod utils;

// Re-export settings
#[cfg(feature = "conf")]
pub use rostra_conf::{DatabaseConfig, PoolSettings, Settings, SettingsError};

// Re-export database pool
#[cfg(feature = "database")]
pub use rostra_db::pool::{ConnectionPool, PoolConfig, PoolError, add_engine_pidguard};

// Re-export reflection entry points
#[cfg(feature = "database")]
pub use rostra_db::reflection::{SqliteInspector, install_sqlite_datetime_fix};

// Re-export string helpers
#[cfg(feature = "utils")]
pub use rostra_utils::{clean_html, clean_up_string, strip_tags};

/// Prelude module for convenient imports
pub mod prelude {
	#[cfg(feature = "conf")]
	pub use crate::conf::*;
	#[cfg(feature = "database")]
	pub use rostra_db::prelude::*;
	#[cfg(feature = "utils")]
	pub use crate::utils::*;
}
