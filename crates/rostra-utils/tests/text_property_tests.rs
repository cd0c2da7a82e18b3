//! Text normalization property tests
//!
//! Property-based tests for the line-break and whitespace helpers.

use proptest::prelude::*;
use rostra_utils::{clean_up_string, remove_line_breaks, strip_line_breaks};

proptest! {
	/// Test: carriage returns are removed, everything else keeps its order
	#[test]
	fn prop_remove_line_breaks_drops_only_carriage_returns(input in "[a-z0-9 \r\n]{0,40}") {
		let result = remove_line_breaks(&input);

		prop_assert!(!result.contains('\r'));
		let expected: String = input.chars().filter(|c| *c != '\r').collect();
		prop_assert_eq!(result, expected);
	}

	/// Test: stripping removes both line-break characters
	#[test]
	fn prop_strip_line_breaks_removes_both(input in "[a-z \r\n]{0,40}") {
		let result = strip_line_breaks(&input);

		prop_assert!(!result.contains('\r'));
		prop_assert!(!result.contains('\n'));
	}

	/// Test: values without letters collapse to one token
	#[test]
	fn prop_clean_up_string_collapses_codes(input in "[0-9+\\- \r\n]{1,40}") {
		let result = clean_up_string(Some(&input)).unwrap();

		let expected: String = input
			.chars()
			.filter(|c| !matches!(c, ' ' | '\r' | '\n'))
			.collect();
		prop_assert_eq!(result, expected);
	}

	/// Test: free text keeps internal spacing and line feeds
	#[test]
	fn prop_clean_up_string_keeps_free_text_layout(
		head in "[a-z]{1,10}",
		tail in "[a-z]{1,10}",
		pad in "[ \r\n]{0,5}",
	) {
		let input = format!("{pad}{head} \r\n{tail}{pad}");

		let result = clean_up_string(Some(&input)).unwrap();

		prop_assert_eq!(result, format!("{head} \n{tail}"));
	}
}
