//! String utilities.
//!
//! Provides character classes, literal escaping and number formatting.

mod escape;
mod number;
mod util;

pub use escape::{escape, quote};
pub use number::{number_to_string, parse_array_index, MAX_ARRAY_INDEX};
pub use util::{
    is_digit, is_exp_operator, is_ident_part, is_ident_start, is_whitespace, CharPredicate,
};
