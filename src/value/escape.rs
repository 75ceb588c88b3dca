//! Reserved character escaping
//!
//! Solr's query parser treats a fixed set of characters as syntax. Every
//! occurrence of one of them is prefixed with a backslash unless the
//! character is already preceded by one. Spaces are escaped too, which is
//! why bare `AND`/`OR`/`NOT` words never need special handling.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Characters with special meaning in the Solr standard query parser
pub const RESERVED_CHARS: &[char] = &[
    ' ', '&', '|', '+', '-', '!', '(', ')', '{', '}', '[', ']', '*', '^', '"', '~', '?', ':', '\\',
];

static RESERVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[ &|+\\\-!(){}\[\]*^"~?:]"#).expect("reserved character class is a valid pattern")
});

/// Escape every reserved character that is not already escaped.
///
/// The lookbehind check runs against the input, not the output, so a single
/// backslash followed by a reserved character is treated as an existing
/// escape sequence: `foo\ bar` becomes `foo\\ bar`.
pub fn escape(text: &str) -> Cow<'_, str> {
    RESERVED.replace_all(text, |caps: &Captures| {
        let Some(m) = caps.get(0) else {
            return String::new();
        };
        if text[..m.start()].ends_with('\\') {
            m.as_str().to_string()
        } else {
            format!("\\{}", m.as_str())
        }
    })
}

/// Check whether a character needs escaping
pub fn is_reserved(ch: char) -> bool {
    RESERVED_CHARS.contains(&ch)
}
