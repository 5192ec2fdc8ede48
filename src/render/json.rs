//! JSON template files.

use crate::error::{Error, Result};
use crate::model::Document;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Template file format version written by this crate.
pub const TEMPLATE_VERSION: &str = "1.0";

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// On-disk template: `{ "version": "...", "document": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Format version
    pub version: String,

    /// The document
    pub document: Document,
}

impl TemplateFile {
    /// Wrap a document at the current format version.
    pub fn new(document: Document) -> Self {
        Self {
            version: TEMPLATE_VERSION.to_string(),
            document,
        }
    }

    /// Parse a template file.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let template: TemplateFile = serde_json::from_str(json)?;
        if template.version.trim().is_empty() {
            return Err(Error::InvalidTemplate("missing version".to_string()));
        }
        Ok(template)
    }

    /// Read a template file from disk.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize the template.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let result = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
            JsonFormat::Compact => serde_json::to_string(self),
        };

        result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
    }
}

/// Convert a document to a JSON template file.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    TemplateFile::new(doc.clone()).to_json(format)
}
