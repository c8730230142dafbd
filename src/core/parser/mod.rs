//! Operator input parsing

mod roll_numbers;


pub use roll_numbers::{is_valid_roll_number, parse_free_text, parse_tabular};
