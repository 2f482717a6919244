//! Transaction record and typed table models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::statement::rules::money::parse_amount;
use crate::statement::rules::patterns::FILENAME_FORBIDDEN;

/// Date format used throughout Mercado Pago summaries (DD-MM-YYYY).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// One parsed transaction, exactly as extracted from a logical statement line.
///
/// Every field is kept textual: the date is pattern-validated only (no
/// calendar validation) and the numeric fields hold the normalized
/// dot-decimal rendering. Typed conversion happens later, in
/// [`StatementTable::from_records`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction date in DD-MM-YYYY form.
    pub date: String,

    /// Free-text description, trimmed.
    pub description: String,

    /// Digit sequence identifying the operation within the statement.
    pub operation_id: String,

    /// Transaction value, normalized to dot-decimal text.
    pub value: String,

    /// Running balance, normalized and clamped to two decimals.
    pub balance: String,
}

/// One typed row of the output table.
///
/// `None` in a numeric column marks a cell that survived normalization but
/// still failed to convert; it is never silently replaced with zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Transaction date in DD-MM-YYYY form.
    pub date: String,

    /// Free-text description.
    pub description: String,

    /// Operation identifier, if it fits a 64-bit integer.
    pub operation_id: Option<i64>,

    /// Transaction value.
    pub value: Option<Decimal>,

    /// Running balance.
    pub balance: Option<Decimal>,
}

/// Ordered transaction table for one or more statements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementTable {
    /// Rows in source order.
    pub rows: Vec<StatementRow>,
}

impl StatementTable {
    /// Build a typed table from parsed records, preserving source order.
    pub fn from_records(records: &[TransactionRecord]) -> Self {
        let rows = records
            .iter()
            .map(|r| StatementRow {
                date: r.date.clone(),
                description: r.description.clone(),
                operation_id: r.operation_id.parse().ok(),
                value: parse_amount(&r.value),
                balance: parse_amount(&r.balance),
            })
            .collect();

        Self { rows }
    }

    /// Append all rows of `other`, keeping insertion order.
    pub fn extend(&mut self, other: StatementTable) {
        self.rows.extend(other.rows);
    }

    /// Number of rows in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Date range covered by the table, ignoring rows whose date does not
    /// parse as a calendar date.
    pub fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self
            .rows
            .iter()
            .filter_map(|r| NaiveDate::parse_from_str(&r.date, DATE_FORMAT).ok());

        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some((min, max))
    }

    /// Period label used for consolidated output names, e.g.
    /// `Del_01-03-2024_al_31-03-2024`.
    pub fn period_label(&self) -> Option<String> {
        self.period().map(|(min, max)| {
            format!(
                "Del_{}_al_{}",
                min.format(DATE_FORMAT),
                max.format(DATE_FORMAT)
            )
        })
    }
}

/// Strip characters that are unsafe in filenames and replace spaces with
/// underscores.
pub fn sanitize_filename(name: &str) -> String {
    FILENAME_FORBIDDEN.replace_all(name, "").replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn record(date: &str, id: &str, value: &str, balance: &str) -> TransactionRecord {
        TransactionRecord {
            date: date.to_string(),
            description: "Pago de servicios".to_string(),
            operation_id: id.to_string(),
            value: value.to_string(),
            balance: balance.to_string(),
        }
    }

    #[test]
    fn test_typed_conversion() {
        let table = StatementTable::from_records(&[record(
            "01-03-2024",
            "987654",
            "1000.00",
            "5432.10",
        )]);

        assert_eq!(table.len(), 1);
        let row = &table.rows[0];
        assert_eq!(row.operation_id, Some(987654));
        assert_eq!(row.value, Some(Decimal::from_str("1000.00").unwrap()));
        assert_eq!(row.balance, Some(Decimal::from_str("5432.10").unwrap()));
    }

    #[test]
    fn test_unconvertible_cells_are_none() {
        let table = StatementTable::from_records(&[record(
            "01-03-2024",
            "987654x",
            "1000.00 ver detalle",
            "no disponible",
        )]);

        let row = &table.rows[0];
        assert_eq!(row.operation_id, None);
        assert_eq!(row.value, None);
        assert_eq!(row.balance, None);
    }

    #[test]
    fn test_period_spans_min_to_max() {
        let table = StatementTable::from_records(&[
            record("15-03-2024", "1", "10.00", "100.00"),
            record("01-03-2024", "2", "10.00", "110.00"),
            record("31-03-2024", "3", "10.00", "120.00"),
        ]);

        assert_eq!(
            table.period_label().as_deref(),
            Some("Del_01-03-2024_al_31-03-2024")
        );
    }

    #[test]
    fn test_period_skips_invalid_dates() {
        // Pattern-valid but not a calendar date.
        let table = StatementTable::from_records(&[
            record("99-99-2024", "1", "10.00", "100.00"),
            record("02-03-2024", "2", "10.00", "110.00"),
        ]);

        let (min, max) = table.period().unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(max, min);
    }

    #[test]
    fn test_empty_table_has_no_period() {
        let table = StatementTable::default();
        assert!(table.is_empty());
        assert_eq!(table.period(), None);
        assert_eq!(table.period_label(), None);
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut consolidated = StatementTable::from_records(&[record(
            "01-03-2024",
            "1",
            "10.00",
            "100.00",
        )]);
        consolidated.extend(StatementTable::from_records(&[record(
            "02-03-2024",
            "2",
            "20.00",
            "120.00",
        )]));

        assert_eq!(consolidated.len(), 2);
        assert_eq!(consolidated.rows[0].operation_id, Some(1));
        assert_eq!(consolidated.rows[1].operation_id, Some(2));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(
            sanitize_filename("Del 01-03-2024 al 31-03-2024"),
            "Del_01-03-2024_al_31-03-2024"
        );
        assert_eq!(sanitize_filename(r#"a\b/c*d?e:f"g<h>i|j"#), "abcdefghij");
    }
}
