//! Monetary value normalization.
//!
//! Statement amounts use the Argentine locale: `$` prefix, `.` as the
//! thousands separator, `,` as the decimal separator.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Re-render a monetary substring as dot-decimal text.
///
/// Strips the currency symbol, drops thousands separators, and swaps the
/// decimal comma for a dot. Purely textual: any non-numeric leftovers are
/// kept and must be tolerated by the typed conversion downstream.
pub fn convert_money_to_number(raw: &str) -> String {
    raw.replace('$', "")
        .replace('.', "")
        .replace(',', ".")
        .trim()
        .to_string()
}

/// Clamp a normalized balance to at most two digits after the first dot.
///
/// Balances are reliably 2-decimal currency amounts; stray trailing
/// characters swept into the balance span are cut off here. Idempotent.
/// Never applied to the value column, which may carry legitimate trailing
/// context.
pub fn clean_balance(normalized: &str) -> String {
    match normalized.find('.') {
        Some(dot) => {
            let end = normalized[dot + 1..]
                .char_indices()
                .nth(2)
                .map(|(i, _)| dot + 1 + i)
                .unwrap_or(normalized.len());
            normalized[..end].to_string()
        }
        None => normalized.to_string(),
    }
}

/// Typed conversion for the table-formatting stage.
///
/// `None` marks an unconvertible cell; callers represent it as missing,
/// never as zero.
pub fn parse_amount(normalized: &str) -> Option<Decimal> {
    Decimal::from_str(normalized).ok()
}
