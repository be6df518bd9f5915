//! ng-expression-util - Utility functions for ng-expression
//!
//! Small helpers shared by the expression front end: character classes used
//! by the tokenizer, literal escaping, JS-style number formatting and own
//! property lookup over ordered maps.

pub mod has_own_property;
pub mod strings;

// Re-exports for convenience
pub use has_own_property::has_own_property;
pub use strings::{
    escape, is_digit, is_exp_operator, is_ident_part, is_ident_start, is_whitespace,
    number_to_string, parse_array_index, quote, CharPredicate, MAX_ARRAY_INDEX,
};
