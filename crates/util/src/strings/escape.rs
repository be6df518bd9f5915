/// Escape a string so it can be embedded in expression source verbatim.
///
/// Every character other than space and ASCII letters/digits is replaced by
/// its `\uXXXX` escape. Characters outside the basic multilingual plane are
/// written as a surrogate pair of escapes.
///
/// # Examples
///
/// ```
/// use ng_expression_util::strings::escape;
///
/// assert_eq!(escape("hello world"), "hello world");
/// assert_eq!(escape("a'b"), "a\\u0027b");
/// assert_eq!(escape("a.b"), "a\\u002eb");
/// ```
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut units = [0u16; 2];

    for ch in s.chars() {
        if ch == ' ' || ch.is_ascii_alphanumeric() {
            result.push(ch);
            continue;
        }
        for unit in ch.encode_utf16(&mut units) {
            result.push_str(&format!("\\u{:04x}", unit));
        }
    }

    result
}

/// Escape a string and wrap it in single quotes.
///
/// # Examples
///
/// ```
/// use ng_expression_util::strings::quote;
///
/// assert_eq!(quote("abc"), "'abc'");
/// assert_eq!(quote(""), "''");
/// ```
pub fn quote(s: &str) -> String {
    format!("'{}'", escape(s))
}
