//! Capture options.

use crate::model::DocumentType;

/// Prefix of reserved attributes and props that carry document structure.
pub const DEFAULT_PRIVATE_PREFIX: &str = "data-doc-";

/// Title used when the source carries none.
pub const DEFAULT_TITLE: &str = "Untitled Document";

/// Paper size used when the source carries none.
pub const DEFAULT_PAPER_SIZE: &str = "A4";

/// Reserved marker names, appended to the private prefix.
pub mod marker {
    /// Outer document node
    pub const ROOT: &str = "root";
    /// Page node
    pub const PAGE: &str = "page";
    /// Padding wrapper inside a page
    pub const CONTENT: &str = "content";
    /// Document title
    pub const TITLE: &str = "title";
    /// Document type
    pub const TYPE: &str = "type";
    /// Paper size token
    pub const PAPER_SIZE: &str = "paper-size";
    /// Document description
    pub const DESCRIPTION: &str = "description";
    /// Decorative shape
    pub const SHAPE: &str = "shape";
}

/// Options shared by both capture walkers.
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    /// Reserved attribute prefix; attributes using it are never copied verbatim
    pub private_prefix: String,

    /// Fallback title
    pub default_title: String,

    /// Fallback paper size
    pub default_paper_size: String,

    /// Fallback for a missing or unknown document type
    pub default_type: DocumentType,
}

impl CaptureOptions {
    /// Create new capture options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reserved attribute prefix.
    pub fn with_private_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.private_prefix = prefix.into();
        self
    }

    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    pub fn with_default_paper_size(mut self, paper_size: impl Into<String>) -> Self {
        self.default_paper_size = paper_size.into();
        self
    }

    pub fn with_default_type(mut self, doc_type: DocumentType) -> Self {
        self.default_type = doc_type;
        self
    }

    /// Full attribute name of a reserved marker, e.g. `data-doc-page`.
    pub fn marker(&self, name: &str) -> String {
        format!("{}{}", self.private_prefix, name)
    }

    /// Marker name of a reserved attribute, or `None` for ordinary attributes.
    pub fn marker_name<'a>(&self, attribute: &'a str) -> Option<&'a str> {
        if self.private_prefix.is_empty() {
            return None;
        }
        attribute.strip_prefix(self.private_prefix.as_str())
    }

    /// Parse a document type, falling back to the configured default.
    pub(crate) fn document_type(&self, value: Option<&str>) -> DocumentType {
        match value {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::debug!("unknown document type '{}', using {}", raw, self.default_type);
                self.default_type
            }),
            None => self.default_type,
        }
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            private_prefix: DEFAULT_PRIVATE_PREFIX.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            default_paper_size: DEFAULT_PAPER_SIZE.to_string(),
            default_type: DocumentType::default(),
        }
    }
}
