//! HTML sanitization for user-submitted markup
//!
//! Sanitizing is delegated to [`ammonia`]; auto-linking of bare URLs and
//! email addresses is done on the sanitized output with [`linkify`], so the
//! only anchors a caller can get back either passed the allow-list or were
//! generated here. Every anchor carries `rel="nofollow"` and
//! `target="_blank"`.

use ammonia::Builder;
use linkify::{LinkFinder, LinkKind};
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::sync::OnceLock;

/// Allow-list applied by [`clean_html`]
pub struct HtmlPolicy;

impl HtmlPolicy {
	/// Inline and structural tags kept by [`clean_html`]
	pub const TAGS: &'static [&'static str] = &[
		"b", "strong", "span", "p", "em", "i", "u", "center", "sup", "sub", "ul", "ol", "li",
		"strike", "br",
	];

	/// Attributes allowed on every kept tag
	pub const GENERIC_ATTRIBUTES: &'static [&'static str] = &["style"];

	/// CSS properties allowed inside a `style` attribute
	pub const STYLE_PROPERTIES: &'static [&'static str] =
		&["text-align", "font-weight", "text-decoration"];

	/// Extra tag and attribute allowed when links are enabled
	pub const LINK_TAG: &'static str = "a";
	pub const LINK_ATTRIBUTE: &'static str = "href";

	/// Relation and target forced onto every anchor
	pub const LINK_REL: &'static str = "nofollow";
	pub const LINK_TARGET: &'static str = "_blank";
}

/// Tags whose whole content is dropped rather than unwrapped
const CONTENT_TAGS: [&str; 2] = ["script", "style"];

static MARKUP: OnceLock<Builder<'static>> = OnceLock::new();
static MARKUP_WITH_LINKS: OnceLock<Builder<'static>> = OnceLock::new();
static TEXT_ONLY: OnceLock<Builder<'static>> = OnceLock::new();
static LINK_FINDER: OnceLock<LinkFinder> = OnceLock::new();

fn markup_builder(allow_link: bool) -> Builder<'static> {
	let mut tags: HashSet<&'static str> = HtmlPolicy::TAGS.iter().copied().collect();
	let mut tag_attributes = HashMap::new();
	if allow_link {
		tags.insert(HtmlPolicy::LINK_TAG);
		tag_attributes.insert(
			HtmlPolicy::LINK_TAG,
			HashSet::from([HtmlPolicy::LINK_ATTRIBUTE]),
		);
	}

	let mut builder = Builder::default();
	builder
		.tags(tags)
		.tag_attributes(tag_attributes)
		.generic_attributes(HtmlPolicy::GENERIC_ATTRIBUTES.iter().copied().collect())
		.filter_style_properties(HtmlPolicy::STYLE_PROPERTIES.iter().copied().collect())
		.clean_content_tags(CONTENT_TAGS.into_iter().collect())
		.link_rel(Some(HtmlPolicy::LINK_REL))
		.set_tag_attribute_value(HtmlPolicy::LINK_TAG, "target", HtmlPolicy::LINK_TARGET);
	builder
}

fn text_builder() -> Builder<'static> {
	let mut builder = Builder::empty();
	builder.clean_content_tags(CONTENT_TAGS.into_iter().collect());
	builder
}

fn link_finder() -> &'static LinkFinder {
	LINK_FINDER.get_or_init(|| {
		let mut finder = LinkFinder::new();
		finder
			.kinds(&[LinkKind::Url, LinkKind::Email])
			.url_must_have_scheme(false);
		finder
	})
}

/// Sanitize untrusted markup for display
///
/// Keeps the tags listed in [`HtmlPolicy::TAGS`] (plus `a[href]` when
/// `allow_link` is set), restricts `style` to the properties in
/// [`HtmlPolicy::STYLE_PROPERTIES`] and unwraps everything else, keeping its
/// text. Bare URLs and email addresses are then turned into links.
///
/// # Examples
///
/// ```
/// use rostra_utils::html::clean_html;
///
/// let cleaned = clean_html(Some("<script>alert(1)</script><b>ok</b>"), false).unwrap();
/// assert_eq!(cleaned, "<b>ok</b>");
///
/// let linked = clean_html(Some("see https://example.com"), false).unwrap();
/// assert_eq!(
///     linked,
///     r#"see <a href="https://example.com" rel="nofollow" target="_blank">https://example.com</a>"#
/// );
///
/// assert_eq!(clean_html(None, false), None);
/// ```
pub fn clean_html(html: Option<&str>, allow_link: bool) -> Option<String> {
	let html = html?;
	let builder = if allow_link {
		MARKUP_WITH_LINKS.get_or_init(|| markup_builder(true))
	} else {
		MARKUP.get_or_init(|| markup_builder(false))
	};
	let cleaned = builder.clean(html).to_string();
	Some(linkify_html(&cleaned))
}

/// Remove all markup, returning the escaped text content
///
/// # Examples
///
/// ```
/// use rostra_utils::html::strip_tags;
///
/// assert_eq!(strip_tags(Some("<p>Hello <b>World</b></p>")).as_deref(), Some("Hello World"));
/// assert_eq!(strip_tags(Some("5 < 6")).as_deref(), Some("5 &lt; 6"));
/// assert_eq!(strip_tags(None), None);
/// ```
pub fn strip_tags(html: Option<&str>) -> Option<String> {
	let html = html?;
	Some(TEXT_ONLY.get_or_init(text_builder).clean(html).to_string())
}

/// Turn bare URLs and email addresses in sanitized markup into links
///
/// Text already inside an anchor is left alone. The input must be
/// well-formed serialized HTML such as the output of [`clean_html`]'s
/// sanitizing step.
///
/// # Examples
///
/// ```
/// use rostra_utils::html::linkify_html;
///
/// assert_eq!(
///     linkify_html("<p>mail admin@example.com</p>"),
///     r#"<p>mail <a href="mailto:admin@example.com" rel="nofollow" target="_blank">admin@example.com</a></p>"#
/// );
/// assert_eq!(linkify_html("no links &amp; more"), "no links &amp; more");
/// ```
pub fn linkify_html(html: &str) -> String {
	let mut out = String::with_capacity(html.len());
	let mut anchor_depth = 0usize;
	let mut rest = html;

	while !rest.is_empty() {
		if rest.starts_with('<') {
			let end = tag_end(rest);
			let tag = &rest[..end];
			match anchor_transition(tag) {
				Some(true) => anchor_depth += 1,
				Some(false) => anchor_depth = anchor_depth.saturating_sub(1),
				None => {}
			}
			out.push_str(tag);
			rest = &rest[end..];
		} else {
			let end = rest.find('<').unwrap_or(rest.len());
			let text = &rest[..end];
			if anchor_depth == 0 {
				push_linked_text(&mut out, text);
			} else {
				out.push_str(text);
			}
			rest = &rest[end..];
		}
	}
	out
}

/// Byte offset just past the `>` closing the tag at the start of `html`.
/// A `>` inside a quoted attribute value does not close the tag.
fn tag_end(html: &str) -> usize {
	let mut quote: Option<char> = None;
	for (i, ch) in html.char_indices().skip(1) {
		match quote {
			Some(q) if ch == q => quote = None,
			Some(_) => {}
			None if ch == '"' || ch == '\'' => quote = Some(ch),
			None if ch == '>' => return i + 1,
			None => {}
		}
	}
	html.len()
}

/// `Some(true)` for an opening `<a>`, `Some(false)` for `</a>`
fn anchor_transition(tag: &str) -> Option<bool> {
	let inner = &tag[1..];
	let (closing, inner) = match inner.strip_prefix('/') {
		Some(rest) => (true, rest),
		None => (false, inner),
	};
	let name_len = inner
		.find(|c: char| !c.is_ascii_alphanumeric())
		.unwrap_or(inner.len());
	let self_closing = tag.ends_with("/>");
	(inner[..name_len].eq_ignore_ascii_case(HtmlPolicy::LINK_TAG) && !self_closing)
		.then_some(!closing)
}

fn push_linked_text(out: &mut String, escaped: &str) {
	let text = unescape_text(escaped);
	let mut last = 0;

	for link in link_finder().links(&text) {
		out.push_str(&escape_text(&text[last..link.start()]));

		let target = link.as_str();
		let href = match link.kind() {
			LinkKind::Email => format!("mailto:{}", target),
			_ if target.contains("://") => target.to_string(),
			_ => format!("http://{}", target),
		};
		let _ = write!(
			out,
			r#"<a href="{}" rel="{}" target="{}">{}</a>"#,
			escape_attr(&href),
			HtmlPolicy::LINK_REL,
			HtmlPolicy::LINK_TARGET,
			escape_text(target)
		);
		last = link.end();
	}
	out.push_str(&escape_text(&text[last..]));
}

/// Escape text the same way the sanitizer serializes text nodes
fn escape_text(text: &str) -> String {
	let mut result = String::with_capacity(text.len());
	for ch in text.chars() {
		match ch {
			'&' => result.push_str("&amp;"),
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			'\u{a0}' => result.push_str("&nbsp;"),
			_ => result.push(ch),
		}
	}
	result
}

fn escape_attr(value: &str) -> String {
	let mut result = String::with_capacity(value.len());
	for ch in value.chars() {
		match ch {
			'&' => result.push_str("&amp;"),
			'"' => result.push_str("&quot;"),
			'<' => result.push_str("&lt;"),
			'>' => result.push_str("&gt;"),
			'\u{a0}' => result.push_str("&nbsp;"),
			_ => result.push(ch),
		}
	}
	result
}

// `&amp;` goes last so an escaped entity such as `&amp;lt;` survives as `&lt;`
fn unescape_text(text: &str) -> String {
	text.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&nbsp;", "\u{a0}")
		.replace("&quot;", "\"")
		.replace("&amp;", "&")
}
