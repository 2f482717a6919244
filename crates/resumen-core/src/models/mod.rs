//! Data models for transaction records, tables, and configuration.

pub mod config;
pub mod statement;
