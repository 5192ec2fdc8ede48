//! # pagecodec
//!
//! Round-trip codec for paged documents (flyers, booklets, presentations).
//!
//! A rendered document is captured into a small intermediate representation
//! (Document / Page / Element / Style) from either a markup snapshot or a
//! rendered component tree. The IR is rendered back into readable template
//! source under a compact or detailed layout policy. Independently, template
//! source that references a named style dictionary can have those references
//! replaced by literal values.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pagecodec::{capture_markup_str, render};
//!
//! fn main() -> pagecodec::Result<()> {
//!     let html = std::fs::read_to_string("snapshot.html")?;
//!     if let Some(doc) = capture_markup_str(&html)? {
//!         let source = render::to_source(&doc, &render::RenderOptions::detailed())?;
//!         println!("{}", source);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two capture paths**: markup snapshots and component trees, one IR
//! - **Two layout policies**: compact and detailed source output
//! - **Style inlining**: dictionary references replaced by literals
//! - **Template files**: versioned JSON read and write
//! - **Cleanup pipeline**: normalization of generated source text

pub mod capture;
pub mod cleanup;
pub mod error;
pub mod ident;
pub mod model;
pub mod render;
pub mod style;

// Re-export commonly used types
pub use capture::{
    Capture, CaptureOptions, CaptureSource, ComponentNode, ComponentTreeCapture, MarkupCapture,
    MarkupNode,
};
pub use cleanup::{clean_generated_source, CleanupOptions, CleanupPipeline, CleanupPreset};
pub use error::{Error, Result};
pub use ident::sanitize_identifier;
pub use model::{
    Document, DocumentType, Element, ElementKind, Metadata, Padding, Page, Style,
};
pub use render::{FormatPolicy, JsonFormat, RenderOptions, RenderResult, TemplateFile};
pub use style::{inline_styles, InlineOptions, InlineResult, StyleInliner, StyleRegistry};

use std::path::Path;

/// Capture a document from serialized markup with default options.
///
/// Returns `Ok(None)` when the markup parses but holds no recognizable
/// document.
///
/// # Example
///
/// ```
/// use pagecodec::capture_markup_str;
///
/// let html = r#"<div data-doc-title="Hi"><div data-doc-page><p>Hello</p></div></div>"#;
/// let doc = capture_markup_str(html).unwrap().unwrap();
/// assert_eq!(doc.page_count(), 1);
/// ```
pub fn capture_markup_str(markup: &str) -> Result<Option<Document>> {
    let node = capture::parse_markup(markup)?;
    Ok(capture::capture_markup(&node, &CaptureOptions::default()))
}

/// Capture a document from a serialized component tree with default options.
pub fn capture_component_str(json: &str) -> Result<Option<Document>> {
    let tree = ComponentNode::from_json_str(json)?;
    Ok(capture::capture_component_tree(&tree, &CaptureOptions::default()))
}

/// Read a document from a JSON template file.
pub fn read_template<P: AsRef<Path>>(path: P) -> Result<Document> {
    Ok(TemplateFile::from_json_file(path)?.document)
}

/// Render a document to source under the given policy.
///
/// # Example
///
/// ```
/// use pagecodec::{render_source, Document, DocumentType, FormatPolicy, Page};
///
/// let doc = Document::new("Outlet Sale Flyer", DocumentType::Flyer, "A4")
///     .with_page(Page::new("page-0"));
/// let source = render_source(&doc, FormatPolicy::Compact).unwrap();
/// assert!(source.contains("export const OutletSaleFlyer = ("));
/// ```
pub fn render_source(doc: &Document, policy: FormatPolicy) -> Result<String> {
    render::to_source(doc, &RenderOptions::new().with_policy(policy))
}

/// Builder tying capture and render options together.
///
/// # Example
///
/// ```
/// use pagecodec::{Codec, MarkupNode};
///
/// let snapshot = MarkupNode::element("div")
///     .with_attribute("data-doc-title", "Hi")
///     .with_child(MarkupNode::element("div").with_attribute("data-doc-page", ""));
/// let result = Codec::new().compact().capture_markup(&snapshot).unwrap();
/// assert!(result.to_source().unwrap().contains("<Page />"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Codec {
    capture_options: CaptureOptions,
    render_options: RenderOptions,
}

impl Codec {
    /// Create a codec with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the compact layout policy.
    pub fn compact(mut self) -> Self {
        self.render_options.policy = FormatPolicy::Compact;
        self
    }

    /// Use the detailed layout policy.
    pub fn detailed(mut self) -> Self {
        self.render_options.policy = FormatPolicy::Detailed;
        self
    }

    /// Set capture options.
    pub fn with_capture_options(mut self, options: CaptureOptions) -> Self {
        self.capture_options = options;
        self
    }

    /// Set render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the import line of rendered source.
    pub fn with_import_line(mut self, line: impl Into<String>) -> Self {
        self.render_options.import_line = line.into();
        self
    }

    /// Capture from any supported source.
    pub fn capture(self, source: CaptureSource<'_>) -> Option<CodecResult> {
        let document = source.capture(&self.capture_options)?;
        Some(CodecResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Capture from a markup snapshot.
    pub fn capture_markup(self, node: &MarkupNode) -> Option<CodecResult> {
        self.capture(CaptureSource::FromMarkup(node))
    }

    /// Capture from a rendered component tree.
    pub fn capture_component_tree(self, tree: &ComponentNode) -> Option<CodecResult> {
        self.capture(CaptureSource::FromComponentTree(tree))
    }

    /// Wrap an existing document.
    pub fn load(self, document: Document) -> CodecResult {
        CodecResult {
            document,
            render_options: self.render_options,
        }
    }
}

/// A captured document with the render options to apply.
#[derive(Debug, Clone)]
pub struct CodecResult {
    /// The captured document
    pub document: Document,
    /// Render options to use
    render_options: RenderOptions,
}

impl CodecResult {
    /// Render to template source.
    pub fn to_source(&self) -> Result<String> {
        render::to_source(&self.document, &self.render_options)
    }

    /// Render to template source with statistics.
    pub fn to_source_with_stats(&self) -> Result<RenderResult> {
        render::to_source_with_stats(&self.document, &self.render_options)
    }

    /// Convert to a JSON template file.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// All text content in reading order.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
