//! Rule-based building blocks of the statement parser.

pub mod fields;
pub mod lines;
pub mod money;
pub mod patterns;

pub use fields::extract_fields;
pub use lines::combine_raw_lines;
pub use money::{clean_balance, convert_money_to_number, parse_amount};
pub use patterns::*;
