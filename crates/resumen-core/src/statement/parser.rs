//! Single-pass account statement parser.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::statement::TransactionRecord;

use super::rules::{combine_raw_lines, extract_fields};

/// Result of parsing one statement text.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Parsed records, in source order.
    pub records: Vec<TransactionRecord>,
    /// Logical lines examined.
    pub lines_scanned: usize,
    /// Logical lines dropped for failing field extraction.
    pub lines_skipped: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for statement parsing.
pub trait StatementParser {
    /// Parse transaction records from extracted statement text.
    ///
    /// Infallible by contract: malformed lines are skipped per line, and
    /// empty or fully unrecognized input yields an empty record list rather
    /// than an error.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Parser for Mercado Pago account summary text.
///
/// Pure and reentrant: no state beyond the per-call line accumulator, so
/// independent texts may be parsed concurrently without coordination.
pub struct AccountStatementParser;

impl AccountStatementParser {
    /// Create a new statement parser.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AccountStatementParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for AccountStatementParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing statement from {} characters of text", text.len());

        let logical_lines = combine_raw_lines(text);
        let lines_scanned = logical_lines.len();

        let mut records = Vec::with_capacity(lines_scanned);
        for line in &logical_lines {
            match extract_fields(line) {
                Some(record) => records.push(record),
                None => debug!("Skipping unparseable line: {:?}", line),
            }
        }

        let lines_skipped = lines_scanned - records.len();
        debug!(
            "Extracted {} records ({} logical lines skipped)",
            records.len(),
            lines_skipped
        );

        ExtractionResult {
            records,
            lines_scanned,
            lines_skipped,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_basic_statement() {
        let text = "\
MERCADO PAGO - RESUMEN DE CUENTA
Titular: JUAN PEREZ
01-03-2024 Pago de servicios 987654 $1.000,00$5.432,10
02-03-2024 Transferencia\nrecibida 987655 $2.500,00$7.932,10
03-03-2024 Linea corrupta sin montos
04-03-2024 Compra 987656 $-500,00$7.432,10";

        let parser = AccountStatementParser::new();
        let result = parser.parse(text);

        assert_eq!(result.records.len(), 3);
        assert_eq!(result.lines_scanned, 4);
        assert_eq!(result.lines_skipped, 1);

        let first = &result.records[0];
        assert_eq!(
            (
                first.date.as_str(),
                first.description.as_str(),
                first.operation_id.as_str(),
                first.value.as_str(),
                first.balance.as_str(),
            ),
            ("01-03-2024", "Pago de servicios", "987654", "1000.00", "5432.10")
        );

        // Multi-line record is reconstructed before extraction.
        assert_eq!(result.records[1].description, "Transferencia recibida");

        // Source order is preserved.
        assert_eq!(result.records[2].operation_id, "987656");
    }

    #[test]
    fn test_parse_empty_input() {
        let parser = AccountStatementParser::new();
        let result = parser.parse("");

        assert!(result.records.is_empty());
        assert_eq!(result.lines_scanned, 0);
        assert_eq!(result.lines_skipped, 0);
    }

    #[test]
    fn test_all_unparseable_input_yields_no_records() {
        let parser = AccountStatementParser::new();
        let result = parser.parse("encabezado\n01-03-2024 sin montos\npie de pagina");

        assert!(result.records.is_empty());
        assert_eq!(result.lines_scanned, 1);
        assert_eq!(result.lines_skipped, 1);
    }

    #[test]
    fn test_orphan_leading_lines_leave_no_trace() {
        let parser = AccountStatementParser::new();
        let result = parser.parse("orphan text\n02-03-2024 Compra 111 $10,00$100,00");

        assert_eq!(result.records.len(), 1);
        let record = &result.records[0];
        assert_eq!(record.description, "Compra");
        assert!(!record.description.contains("orphan"));
    }

    #[test]
    fn test_duplicate_operation_ids_pass_through() {
        let text = "\
01-03-2024 Pago A 111 $10,00$100,00
02-03-2024 Pago B 111 $20,00$120,00";

        let parser = AccountStatementParser::new();
        let result = parser.parse(text);

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].operation_id, "111");
        assert_eq!(result.records[1].operation_id, "111");
    }
}
