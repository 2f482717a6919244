//! Compiled patterns shared by the statement parser.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Transaction date in DD-MM-YYYY form. Anchored: a logical record line
    // always starts with its date.
    pub static ref LEADING_DATE: Regex = Regex::new(
        r"^\d{2}-\d{2}-\d{4}"
    ).unwrap();

    // Any run of digits; the last run before the money columns is the
    // operation id.
    pub static ref DIGIT_RUN: Regex = Regex::new(
        r"\d+"
    ).unwrap();

    // Currency marker opening each monetary field.
    pub static ref CURRENCY_MARKER: Regex = Regex::new(
        r"\$"
    ).unwrap();

    // Characters never allowed in generated filenames.
    pub static ref FILENAME_FORBIDDEN: Regex = Regex::new(
        r#"[\\/*?:"<>|]"#
    ).unwrap();
}
