//! Element-level types.

use super::Style;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tag used when an element carries no explicit tag name.
pub const DEFAULT_TAG: &str = "div";

/// Classification of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Literal text (headings, paragraphs, spans)
    Text,
    /// An image reference
    Image,
    /// A generic grouping node
    #[default]
    Container,
    /// A decorative or vector shape
    Shape,
}

impl ElementKind {
    /// Lowercase name as used in template files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Container => "container",
            ElementKind::Shape => "shape",
        }
    }
}

/// A node in a document page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Positional id, unique within its page
    pub id: String,

    /// Element classification
    pub kind: ElementKind,

    /// Underlying markup tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,

    /// Literal text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Image source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Image alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// Class list, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Remaining attributes, verbatim and in capture order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,

    /// Inline style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,

    /// Child elements in source order
    #[serde(default)]
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element of the given kind.
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            tag_name: None,
            content: None,
            src: None,
            alt: None,
            class_name: None,
            attributes: IndexMap::new(),
            style: None,
            children: Vec::new(),
        }
    }

    /// Create a text element.
    pub fn text(id: impl Into<String>, tag: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Text)
            .with_tag(tag)
            .with_content(content)
    }

    /// Create an image element.
    pub fn image(id: impl Into<String>, src: impl Into<String>) -> Self {
        let mut element = Self::new(id, ElementKind::Image).with_tag("img");
        element.src = Some(src.into());
        element
    }

    /// Create a container element.
    pub fn container(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Container)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = Some(tag.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name, falling back to [`DEFAULT_TAG`].
    pub fn tag(&self) -> &str {
        self.tag_name.as_deref().unwrap_or(DEFAULT_TAG)
    }

    /// Non-empty content, if any.
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.is_empty())
    }

    /// Non-empty style, if any.
    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref().filter(|s| !s.is_empty())
    }

    /// Whether the element has `position: absolute`.
    pub fn is_absolutely_positioned(&self) -> bool {
        self.style
            .as_ref()
            .is_some_and(Style::is_absolutely_positioned)
    }

    /// Number of elements in this subtree, including this one.
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_size).sum::<usize>()
    }

    /// Concatenated text content of this subtree.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(content) = self.content() {
            parts.push(content.to_string());
        }
        for child in &self.children {
            let text = child.plain_text();
            if !text.is_empty() {
                parts.push(text);
            }
        }
        parts.join("\n")
    }
}

/// Page id for the page at `page_index`.
pub fn page_id(page_index: usize) -> String {
    format!("page-{}", page_index)
}

/// Positional element id: `page-<p>-element-<e>[-<c>...]`.
pub fn element_id(page_index: usize, path: &[usize]) -> String {
    let mut id = format!("page-{}-element", page_index);
    for index in path {
        id.push('-');
        id.push_str(&index.to_string());
    }
    id
}
