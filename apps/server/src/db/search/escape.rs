//! Literal-pattern escaping for substring searches.
//!
//! Text searches are executed as case-insensitive regular expressions by both
//! storage backends (the `regex` crate in memory, `~*` in PostgreSQL). User
//! input must only ever match as a literal substring, so every character with
//! special meaning in either dialect is backslash-escaped. A backslash
//! followed by punctuation is a literal in both dialects.

/// Escape `input` so it matches literally inside a regular expression.
pub(crate) fn escape_pattern_literal(input: &str) -> String {
    regex::escape(input)
}

/// Build the literal substring pattern for a raw search value.
///
/// Leading and trailing whitespace is not part of the searched text.
pub(crate) fn literal_substring_pattern(raw: &str) -> String {
    escape_pattern_literal(raw.trim())
}
