//! Configuration structures for the statement pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ResumenError};

/// Main configuration for the resumen pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumenConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

impl Default for ResumenConfig {
    fn default() -> Self {
        Self {
            pdf: PdfConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read from a PDF (0 = unlimited).
    pub max_pages: usize,

    /// Minimum extracted text length to consider a PDF non-empty.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            min_text_length: 1,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Filename prefix for the consolidated batch table.
    pub consolidated_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            consolidated_prefix: "CONSOLIDADO_MERCADOPAGO".to_string(),
        }
    }
}

impl ResumenConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ResumenError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| ResumenError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
