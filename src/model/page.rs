//! Page-level types.

use super::{Element, Style};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Component name of a page in template source.
pub const PAGE_COMPONENT: &str = "Page";

/// Page padding: a bare number or a CSS length string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    /// Unit-less number (pixels)
    Number(f64),
    /// Any CSS length, e.g. `"1rem 2rem"`
    Text(String),
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Padding::Number(n) => write!(f, "{}", n),
            Padding::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Padding {
    fn from(value: f64) -> Self {
        Padding::Number(value)
    }
}

impl From<&str> for Padding {
    fn from(value: &str) -> Self {
        Padding::Text(value.to_string())
    }
}

/// A single page in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Positional page id
    pub id: String,

    /// CSS color or gradient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Inner padding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,

    /// Page-level style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,

    /// Elements, rendered in array order
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            background: None,
            padding: None,
            style: None,
            elements: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn with_padding(mut self, padding: impl Into<Padding>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Add an element to the page.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Check if the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements on the page, nested ones included.
    pub fn element_count(&self) -> usize {
        self.elements.iter().map(Element::subtree_size).sum()
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .map(Element::plain_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
