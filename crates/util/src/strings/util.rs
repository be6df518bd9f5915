/// A predicate function for checking character properties.
pub type CharPredicate = fn(char) -> bool;

/// Check if a character is an ASCII decimal digit.
///
/// # Examples
///
/// ```
/// use ng_expression_util::strings::is_digit;
///
/// assert!(is_digit('0'));
/// assert!(is_digit('9'));
/// assert!(!is_digit('a'));
/// ```
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if a character may start an identifier: `a-z`, `A-Z`, `_` or `$`.
///
/// # Examples
///
/// ```
/// use ng_expression_util::strings::is_ident_start;
///
/// assert!(is_ident_start('a'));
/// assert!(is_ident_start('$'));
/// assert!(!is_ident_start('1'));
/// ```
pub fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

/// Check if a character may continue an identifier.
pub fn is_ident_part(ch: char) -> bool {
    is_ident_start(ch) || is_digit(ch)
}

/// Check if a character is whitespace in expression source.
///
/// Only space, `\r`, `\t`, `\n`, vertical tab and the no-break space count.
///
/// # Examples
///
/// ```
/// use ng_expression_util::strings::is_whitespace;
///
/// assert!(is_whitespace(' '));
/// assert!(is_whitespace('\u{00A0}'));
/// assert!(!is_whitespace('\u{2003}'));
/// ```
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\r' | '\t' | '\n' | '\u{000B}' | '\u{00A0}')
}

/// Check if a character may follow an exponent marker in a number literal.
pub fn is_exp_operator(ch: char) -> bool {
    ch == '-' || ch == '+' || is_digit(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_digit() {
        assert!(is_digit('0'));
        assert!(is_digit('5'));
        assert!(!is_digit('x'));
        assert!(!is_digit('٣'));
    }

    #[test]
    fn test_is_ident_start() {
        assert!(is_ident_start('a'));
        assert!(is_ident_start('Z'));
        assert!(is_ident_start('_'));
        assert!(is_ident_start('$'));
        assert!(!is_ident_start('0'));
        assert!(!is_ident_start('é'));
    }

    #[test]
    fn test_is_ident_part() {
        assert!(is_ident_part('a'));
        assert!(is_ident_part('0'));
        assert!(!is_ident_part('-'));
    }

    #[test]
    fn test_is_whitespace() {
        assert!(is_whitespace(' '));
        assert!(is_whitespace('\t'));
        assert!(is_whitespace('\n'));
        assert!(is_whitespace('\r'));
        assert!(is_whitespace('\u{000B}'));
        assert!(is_whitespace('\u{00A0}'));
    }

    #[test]
    fn test_is_whitespace_not() {
        assert!(!is_whitespace('a'));
        assert!(!is_whitespace('\u{000C}'));
        assert!(!is_whitespace('\u{3000}'));
    }

    #[test]
    fn test_is_exp_operator() {
        assert!(is_exp_operator('+'));
        assert!(is_exp_operator('-'));
        assert!(is_exp_operator('7'));
        assert!(!is_exp_operator('e'));
    }
}
