/// Format a number the way JavaScript's `String(n)` does.
///
/// Integral values below `1e21` print without a fraction or exponent; very
/// small and very large magnitudes use exponent notation with an explicit
/// sign.
///
/// # Examples
///
/// ```
/// use ng_expression_util::strings::number_to_string;
///
/// assert_eq!(number_to_string(1.0), "1");
/// assert_eq!(number_to_string(0.5), "0.5");
/// assert_eq!(number_to_string(f64::NAN), "NaN");
/// ```
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let formatted = format!("{:e}", n);
        return match formatted.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => formatted,
        };
    }
    if n.fract() == 0.0 {
        return format!("{:.0}", n);
    }
    format!("{}", n)
}

/// Largest array index JavaScript recognizes (`2^32 - 2`).
pub const MAX_ARRAY_INDEX: u32 = u32::MAX - 1;

/// Parse a canonical array index (`"0"`, `"42"`, but not `"01"`, `"-1"`,
/// `"1.0"` or anything above [`MAX_ARRAY_INDEX`]).
pub fn parse_array_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>()
        .ok()
        .filter(|index| *index <= MAX_ARRAY_INDEX)
        .map(|index| index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integers() {
        assert_eq!(number_to_string(0.0), "0");
        assert_eq!(number_to_string(-0.0), "0");
        assert_eq!(number_to_string(42.0), "42");
        assert_eq!(number_to_string(-7.0), "-7");
        assert_eq!(number_to_string(1e20), "100000000000000000000");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(number_to_string(1.5), "1.5");
        assert_eq!(number_to_string(0.015), "0.015");
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1e-7), "1e-7");
        assert_eq!(number_to_string(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(number_to_string(f64::INFINITY), "Infinity");
        assert_eq!(number_to_string(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_parse_array_index() {
        assert_eq!(parse_array_index("0"), Some(0));
        assert_eq!(parse_array_index("17"), Some(17));
        assert_eq!(parse_array_index("01"), None);
        assert_eq!(parse_array_index("-1"), None);
        assert_eq!(parse_array_index("1.0"), None);
        assert_eq!(parse_array_index(""), None);
        assert_eq!(parse_array_index("length"), None);
        assert_eq!(parse_array_index("4294967294"), Some(4_294_967_294));
        assert_eq!(parse_array_index("4294967295"), None);
        assert_eq!(parse_array_index("18446744073709551615"), None);
    }

    proptest! {
        #[test]
        fn integral_values_parse_back(n in -1_000_000_000i64..1_000_000_000i64) {
            let text = number_to_string(n as f64);
            prop_assert_eq!(text.parse::<i64>().unwrap(), n);
        }

        #[test]
        fn index_keys_parse_back(i in 0usize..1_000_000) {
            prop_assert_eq!(parse_array_index(&number_to_string(i as f64)), Some(i));
        }
    }
}
