//! Settings module.
//!
//! # Examples
//!
//! ```rust
//! use rostra::conf::{DatabaseConfig, Settings};
//!
//! let settings = Settings::from_toml_str("[database]\nname = \"app.db\"").unwrap();
//! assert_eq!(settings.database, DatabaseConfig::sqlite("app.db"));
//! ```

pub use rostra_conf::*;
