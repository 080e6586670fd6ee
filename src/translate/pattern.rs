//! MySQL `LIKE` patterns as PostgreSQL regular expressions.

/// Converts a `LIKE` pattern into an anchored regular expression.
///
/// `%` matches any run of characters and `_` matches one character. A
/// backslash makes the next character literal. Everything else is escaped.
pub fn like_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 2);
    regex.push('^');

    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '%' => regex.push_str(".*"),
            '_' => regex.push('.'),
            '\\' => match chars.next() {
                Some(escaped) => push_literal(&mut regex, escaped),
                None => push_literal(&mut regex, '\\'),
            },
            other => push_literal(&mut regex, other),
        }
    }

    regex.push('$');
    regex
}

fn push_literal(regex: &mut String, ch: char) {
    let mut buf = [0u8; 4];
    regex.push_str(&regex::escape(ch.encode_utf8(&mut buf)));
}
