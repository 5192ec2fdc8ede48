//! Document-level types.

use super::Page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default document id assigned by captures.
pub const DEFAULT_DOCUMENT_ID: &str = "document";

/// Component name of the document scaffold in template source.
pub const DOCUMENT_COMPONENT: &str = "Document";

/// Kind of paged document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Single-sheet flyer
    #[default]
    Flyer,
    /// Multi-page booklet or catalog
    Booklet,
    /// Slide deck
    Presentation,
}

impl DocumentType {
    /// Lowercase name as used in source and template files.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Flyer => "flyer",
            DocumentType::Booklet => "booklet",
            DocumentType::Presentation => "presentation",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flyer" => Ok(DocumentType::Flyer),
            "booklet" => Ok(DocumentType::Booklet),
            "presentation" => Ok(DocumentType::Presentation),
            other => Err(format!("unknown document type: {}", other)),
        }
    }
}

/// A paged document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document id
    pub id: String,

    /// Free-text title
    pub title: String,

    /// Document kind
    #[serde(rename = "type")]
    pub doc_type: DocumentType,

    /// Paper size token (e.g. `A4`)
    pub paper_size: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Pages in order
    #[serde(default)]
    pub pages: Vec<Page>,

    /// Informational metadata, never rendered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(
        title: impl Into<String>,
        doc_type: DocumentType,
        paper_size: impl Into<String>,
    ) -> Self {
        Self {
            id: DEFAULT_DOCUMENT_ID.to_string(),
            title: title.into(),
            doc_type,
            paper_size: paper_size.into(),
            description: None,
            pages: Vec::new(),
            metadata: None,
        }
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of elements across all pages.
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(Page::element_count).sum()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Creation date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Document author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Template version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Metadata {
    /// Metadata with both timestamps set to now.
    pub fn stamped() -> Self {
        let now = Utc::now();
        Self {
            created_at: Some(now),
            updated_at: Some(now),
            ..Default::default()
        }
    }

    /// Move the modification timestamp to now.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new("Flyer", DocumentType::Flyer, "A4");
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.id, "document");
    }

    #[test]
    fn test_document_type_parse() {
        assert_eq!("Booklet".parse::<DocumentType>(), Ok(DocumentType::Booklet));
        assert_eq!(
            " presentation ".parse::<DocumentType>(),
            Ok(DocumentType::Presentation)
        );
        assert!("poster".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_document_json_field_names() {
        let doc = Document::new("Sale", DocumentType::Flyer, "A4");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["type"], "flyer");
        assert_eq!(json["paperSize"], "A4");
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_metadata_stamped() {
        let mut meta = Metadata::stamped();
        assert!(meta.created_at.is_some());
        let created = meta.created_at;
        meta.touch();
        assert_eq!(meta.created_at, created);
        assert!(meta.updated_at >= created);
    }
}
