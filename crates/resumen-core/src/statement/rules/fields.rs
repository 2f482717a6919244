//! Field extraction from one logical record line.

use crate::models::statement::TransactionRecord;

use super::money::{clean_balance, convert_money_to_number};
use super::patterns::{CURRENCY_MARKER, DIGIT_RUN, LEADING_DATE};

/// Slice one logical record line into its five fields.
///
/// Anchors: the leading date and the start positions of the first two `$`
/// markers in the remainder. The last digit run before the money columns is
/// the operation id; statement lines place it immediately before the money
/// columns, and descriptions may themselves contain incidental digits
/// earlier in the line.
///
/// Returns `None` when the line has no leading date, fewer than two `$`
/// markers, or no digit run before the first marker. Never panics on
/// malformed input; a `None` line simply contributes nothing to the table.
pub fn extract_fields(line: &str) -> Option<TransactionRecord> {
    let date = LEADING_DATE.find(line)?;
    let rest = line[date.end()..].trim();

    let markers: Vec<usize> = CURRENCY_MARKER.find_iter(rest).map(|m| m.start()).collect();
    if markers.len() < 2 {
        return None;
    }

    let before = rest[..markers[0]].trim();
    let value_span = rest[markers[0]..markers[1]].trim();
    let balance_span = rest[markers[1]..].trim();

    let operation_id = DIGIT_RUN.find_iter(before).last()?.as_str();

    // Split on the last occurrence of the id substring, so an id that also
    // shows up earlier in the description does not truncate it.
    let split = before.rfind(operation_id)?;
    let description = before[..split].trim().to_string();

    Some(TransactionRecord {
        date: date.as_str().to_string(),
        description,
        operation_id: operation_id.to_string(),
        value: convert_money_to_number(value_span),
        balance: clean_balance(&convert_money_to_number(balance_span)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_well_formed_line() {
        let record =
            extract_fields("01-03-2024 Pago de servicios 987654 $1.000,00$5.432,10").unwrap();

        assert_eq!(record.date, "01-03-2024");
        assert_eq!(record.description, "Pago de servicios");
        assert_eq!(record.operation_id, "987654");
        assert_eq!(record.value, "1000.00");
        assert_eq!(record.balance, "5432.10");
    }

    #[test]
    fn test_no_leading_date() {
        assert_eq!(extract_fields("Pago de servicios 987654 $1,00$2,00"), None);
        // Date must open the line.
        assert_eq!(
            extract_fields("saldo al 01-03-2024 987654 $1,00$2,00"),
            None
        );
    }

    #[test]
    fn test_fewer_than_two_markers() {
        assert_eq!(extract_fields("01-03-2024 Pago 987654 $1.000,00"), None);
        assert_eq!(extract_fields("01-03-2024 Pago 987654 sin montos"), None);
    }

    #[test]
    fn test_no_digit_run_before_money() {
        assert_eq!(extract_fields("01-03-2024 Pago $1,00$2,00"), None);
    }

    #[test]
    fn test_last_digit_run_wins() {
        // "24" in the description is an incidental digit run; the id is the
        // rightmost one before the money columns.
        let record =
            extract_fields("01-03-2024 Carga 24 cuotas 555000 $100,00$200,00").unwrap();

        assert_eq!(record.operation_id, "555000");
        assert_eq!(record.description, "Carga 24 cuotas");
    }

    #[test]
    fn test_id_repeated_in_description_splits_on_last_occurrence() {
        let record = extract_fields("01-03-2024 Plan 42 extendido 42 $1,00$2,00").unwrap();

        assert_eq!(record.operation_id, "42");
        assert_eq!(record.description, "Plan 42 extendido");
    }

    #[test]
    fn test_balance_clamped_value_untouched() {
        let record = extract_fields("01-03-2024 Ajuste 7 $100,456$100,456").unwrap();

        // Same raw span: the value keeps its precision, the balance is
        // clamped to two decimals.
        assert_eq!(record.value, "100.456");
        assert_eq!(record.balance, "100.45");
    }

    #[test]
    fn test_third_marker_goes_to_balance_span() {
        let record = extract_fields("01-03-2024 Pago 9 $1,00$2,00 $3,00").unwrap();

        assert_eq!(record.value, "1.00");
        // Everything from the second marker onward is the balance span.
        assert_eq!(record.balance, "2.00");
    }
}
