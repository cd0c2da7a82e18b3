//! Text normalization and HTML sanitization module.
//!
//! # Examples
//!
//! ```rust
//! use rostra::utils::{remove_line_breaks, strip_tags};
//!
//! assert_eq!(remove_line_breaks("a\r\nb"), "a\nb");
//! assert_eq!(strip_tags(Some("<p>plain</p>")).as_deref(), Some("plain"));
//! ```

pub use rostra_utils::*;
