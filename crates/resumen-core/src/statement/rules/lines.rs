//! Line reconstruction: merging physical text lines into logical record lines.
//!
//! A single transaction may span several lines in the extracted text. Only
//! lines opening with a date start a new record; anything else continues the
//! previous one.

use super::patterns::LEADING_DATE;

/// Merge raw extracted lines into logical record lines.
///
/// A line matching the leading-date pattern flushes the current accumulator
/// (trimmed, if non-empty) and starts a new one. Any other line is appended
/// to the current accumulator with a single separating space. Raw lines
/// before the first dated line have no record to attach to and are dropped;
/// they are not recoverable.
pub fn combine_raw_lines(text: &str) -> Vec<String> {
    let mut combined = Vec::new();
    let mut current: Option<String> = None;

    for raw in text.lines() {
        if LEADING_DATE.is_match(raw) {
            if let Some(line) = current.take() {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    combined.push(line);
                }
            }
            current = Some(raw.to_string());
        } else if let Some(line) = current.as_mut() {
            line.push(' ');
            line.push_str(raw);
        }
    }

    if let Some(line) = current {
        let line = line.trim().to_string();
        if !line.is_empty() {
            combined.push(line);
        }
    }

    combined
}
