//! Core library for Mercado Pago account summary processing.
//!
//! This crate provides:
//! - PDF processing (embedded text extraction)
//! - Statement line reconstruction and field extraction
//! - Typed transaction tables ready for CSV/JSON serialization

pub mod error;
pub mod models;
pub mod pdf;
pub mod statement;

pub use error::{PdfError, Result, ResumenError};
pub use models::config::ResumenConfig;
pub use models::statement::{StatementRow, StatementTable, TransactionRecord};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use statement::{AccountStatementParser, ExtractionResult, StatementParser};
