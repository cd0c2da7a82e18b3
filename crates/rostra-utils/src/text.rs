//! Line-break and whitespace normalization for user-submitted strings

use regex::Regex;
use std::sync::OnceLock;

static ASCII_LETTER: OnceLock<Regex> = OnceLock::new();

fn ascii_letter() -> &'static Regex {
	ASCII_LETTER.get_or_init(|| Regex::new(r"[a-zA-Z]").unwrap())
}

/// Remove every carriage return, leaving line feeds in place
///
/// # Examples
///
/// ```
/// use rostra_utils::text::remove_line_breaks;
///
/// assert_eq!(remove_line_breaks("one\r\ntwo\r"), "one\ntwo");
/// assert_eq!(remove_line_breaks("plain"), "plain");
/// ```
pub fn remove_line_breaks(target: &str) -> String {
	target.replace('\r', "")
}

/// Remove every line feed and every carriage return
///
/// # Examples
///
/// ```
/// use rostra_utils::text::strip_line_breaks;
///
/// assert_eq!(strip_line_breaks("12\r\n34\n"), "1234");
/// ```
pub fn strip_line_breaks(target: &str) -> String {
	target.replace('\n', "").replace('\r', "")
}

/// Normalize a submitted field value
///
/// Values without any ASCII letter are treated as codes or numbers and
/// collapsed into one token: line breaks and spaces are removed and the
/// result is trimmed. Values containing a letter are treated as free text:
/// only carriage returns are removed and the outer whitespace trimmed.
///
/// `None` and the empty string are returned unchanged.
///
/// # Examples
///
/// ```
/// use rostra_utils::text::clean_up_string;
///
/// assert_eq!(clean_up_string(Some(" 12 34\n")), Some("1234".to_string()));
/// assert_eq!(clean_up_string(Some(" Hi\r\nThere ")), Some("Hi\nThere".to_string()));
/// assert_eq!(clean_up_string(Some("")), Some(String::new()));
/// assert_eq!(clean_up_string(None), None);
/// ```
pub fn clean_up_string(target: Option<&str>) -> Option<String> {
	let target = target?;
	if target.is_empty() {
		return Some(String::new());
	}

	if !ascii_letter().is_match(target) {
		return Some(strip_line_breaks(target).trim().replace(' ', ""));
	}
	Some(remove_line_breaks(target).trim().to_string())
}
