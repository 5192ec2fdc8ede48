//! Rendering result with statistics.

use crate::model::ElementKind;
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including source and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered source text
    pub source: String,

    /// Render statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(source: String, stats: RenderStats) -> Self {
        Self { source, stats }
    }

    /// Get the source length in bytes.
    pub fn source_len(&self) -> usize {
        self.source.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Pages emitted
    pub page_count: u32,

    /// Text elements emitted
    pub text_count: u32,

    /// Image elements emitted
    pub image_count: u32,

    /// Container elements emitted
    pub container_count: u32,

    /// Shape elements emitted
    pub shape_count: u32,

    /// Elements whose style wrapped onto several lines
    pub wrapped_style_count: u32,

    /// Lines in the emitted source
    pub line_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_page(&mut self) {
        self.page_count += 1;
    }

    pub(crate) fn add_element(&mut self, kind: ElementKind) {
        match kind {
            ElementKind::Text => self.text_count += 1,
            ElementKind::Image => self.image_count += 1,
            ElementKind::Container => self.container_count += 1,
            ElementKind::Shape => self.shape_count += 1,
        }
    }

    pub(crate) fn add_wrapped_style(&mut self) {
        self.wrapped_style_count += 1;
    }

    pub(crate) fn count_lines(&mut self, source: &str) {
        self.line_count = source.lines().count() as u32;
    }

    /// Total elements emitted.
    pub fn element_count(&self) -> u32 {
        self.text_count + self.image_count + self.container_count + self.shape_count
    }
}
