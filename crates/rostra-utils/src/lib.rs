//! # Rostra Utils
//!
//! Input hygiene helpers shared by every form and model that accepts free text.
//!
//! ## Modules
//!
//! - [`text`]: line-break and whitespace normalization for single-line and
//!   free-text fields
//! - [`html`]: allow-list HTML sanitization with automatic, no-follow links
//!
//! ## Quick Start
//!
//! ```
//! use rostra_utils::{clean_html, clean_up_string, strip_tags};
//!
//! assert_eq!(clean_up_string(Some(" 12 34\n")), Some("1234".to_string()));
//! assert_eq!(strip_tags(Some("<p>Hello <b>World</b></p>")).as_deref(), Some("Hello World"));
//! assert_eq!(clean_html(Some("<b>ok</b>"), false).as_deref(), Some("<b>ok</b>"));
//! ```

pub mod html;
pub mod text;

pub use html::{HtmlPolicy, clean_html, linkify_html, strip_tags};
pub use text::{clean_up_string, remove_line_breaks, strip_line_breaks};
