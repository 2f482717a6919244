//! Statement parsing module.
//!
//! Turns extracted statement text into transaction records in three stages:
//! line reconstruction, field extraction, and value normalization.

mod parser;
pub mod rules;

pub use parser::{AccountStatementParser, ExtractionResult, StatementParser};
