//! LIKE pattern handling in both directions.
//!
//! Building a pattern from literal text escapes `\`, `%` and `_` first so
//! that the wildcard added afterwards is the only one. Matching a caller's
//! LIKE pattern in memory escapes regex metacharacters first and only then
//! turns unescaped `%` and `_` into `.*` and `.`.

use regex::Regex;

use crate::error::EvalError;

/// Escape character understood by the generated LIKE patterns.
pub const LIKE_ESCAPE: char = '\\';

/// Escapes SQL wildcards in `text` so it matches literally inside LIKE.
///
/// ```
/// use sqlexpr::functions::pattern::escape_like;
///
/// assert_eq!(escape_like("50%_off"), r"50\%\_off");
/// ```
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Translates a LIKE pattern into an anchored regex source string.
///
/// A backslash makes the next character literal, so `\%` matches a percent
/// sign. A trailing lone backslash matches itself.
pub fn like_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push_str("^(?s:");

    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        match ch {
            LIKE_ESCAPE => {
                let literal = chars.next().unwrap_or(LIKE_ESCAPE);
                regex.push_str(&regex::escape(literal.encode_utf8(&mut [0; 4])));
            }
            '%' => regex.push_str(".*"),
            '_' => regex.push('.'),
            other => regex.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
    }

    regex.push_str(")$");
    regex
}

/// Full-string LIKE match of `text` against `pattern`.
pub fn like_matches(text: &str, pattern: &str) -> Result<bool, EvalError> {
    let re = Regex::new(&like_to_regex(pattern))
        .map_err(|e| EvalError::TypeError(format!("invalid LIKE pattern {:?}: {e}", pattern)))?;
    Ok(re.is_match(text))
}
