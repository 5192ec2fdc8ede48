//! Rendered component-tree capture.
//!
//! The tree is the JSON-serializable shape of a rendered element:
//! `{ "type": "div", "props": { ... }, "children": [ ... ] }`, where children
//! are nodes or literal strings and numbers.

use super::options::marker;
use super::{capture_children, parse_inline_style, CaptureOptions, ChildRef, TreeNode};
use crate::error::Result;
use crate::model::{page_id, Document, Padding, Page, Style};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::borrow::Cow;

/// Props that are never copied as attributes.
const STRUCTURAL_PROPS: &[&str] = &["children", "style", "key", "ref"];

/// A rendered component node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentNode {
    /// Tag or component type name
    #[serde(rename = "type")]
    pub element_type: String,

    #[serde(default)]
    pub props: Map<String, Value>,

    #[serde(default)]
    pub children: Vec<ComponentChild>,
}

/// Child of a [`ComponentNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComponentChild {
    Text(String),
    Number(Number),
    Node(ComponentNode),
    /// `null`, `true` or `false` left by conditional rendering; renders nothing
    Empty(Option<bool>),
}

impl ComponentNode {
    pub fn new(element_type: impl Into<String>) -> Self {
        Self {
            element_type: element_type.into(),
            props: Map::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(ComponentChild::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: ComponentNode) -> Self {
        self.children.push(ComponentChild::Node(child));
        self
    }

    /// Parse a serialized tree.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Prop as text; strings verbatim, numbers in decimal.
    pub fn prop_text(&self, name: &str) -> Option<String> {
        match self.props.get(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Child nodes, skipping literals.
    pub fn child_components(&self) -> impl Iterator<Item = &ComponentNode> {
        self.children.iter().filter_map(|child| match child {
            ComponentChild::Node(node) => Some(node),
            _ => None,
        })
    }

    fn has_content(&self) -> bool {
        self.children.iter().any(|child| match child {
            ComponentChild::Text(text) => !text.trim().is_empty(),
            ComponentChild::Empty(_) => false,
            _ => true,
        })
    }

    fn is_marked(&self, name: &str, options: &CaptureOptions) -> bool {
        matches!(
            self.props.get(&options.marker(name)),
            Some(value) if !matches!(value, Value::Null | Value::Bool(false))
        )
    }

    /// Reserved marker prop first, then the ordinary prop.
    fn reserved_or_plain(&self, name: &str, plain: &str, options: &CaptureOptions) -> Option<String> {
        self.prop_text(&options.marker(name))
            .or_else(|| self.prop_text(plain))
    }
}

impl TreeNode for ComponentNode {
    fn tag(&self) -> &str {
        &self.element_type
    }

    fn attributes(&self, options: &CaptureOptions) -> IndexMap<String, String> {
        let mut attributes = IndexMap::new();
        for (name, value) in &self.props {
            if STRUCTURAL_PROPS.contains(&name.as_str()) || options.marker_name(name).is_some() {
                continue;
            }
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(true) => "true".to_string(),
                _ => continue,
            };
            let name = if name == "class" { "className" } else { name.as_str() };
            attributes.insert(name.to_string(), text);
        }
        attributes
    }

    fn style(&self) -> Option<Style> {
        match self.props.get("style")? {
            Value::Object(map) => Some(map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
            Value::String(text) => Some(parse_inline_style(text)),
            _ => None,
        }
    }

    fn has_marker(&self, name: &str, options: &CaptureOptions) -> bool {
        self.is_marked(name, options)
    }

    fn child_nodes(&self) -> Vec<ChildRef<'_, Self>> {
        self.children
            .iter()
            .filter_map(|child| match child {
                ComponentChild::Text(text) => Some(ChildRef::Text(Cow::Borrowed(text.as_str()))),
                ComponentChild::Number(n) => Some(ChildRef::Text(Cow::Owned(n.to_string()))),
                ComponentChild::Node(node) => Some(ChildRef::Node(node)),
                ComponentChild::Empty(_) => None,
            })
            .collect()
    }
}

/// Capture a document from a rendered component tree.
///
/// The document node carries the reserved root marker and is either the tree
/// root or one of its direct children. Returns `None` when there is none.
pub fn capture_component_tree(root: &ComponentNode, options: &CaptureOptions) -> Option<Document> {
    let doc_root = if root.is_marked(marker::ROOT, options) {
        root
    } else {
        match root
            .child_components()
            .find(|child| child.is_marked(marker::ROOT, options))
        {
            Some(node) => node,
            None => {
                log::warn!(
                    "component capture failed: no {} node under <{}>",
                    options.marker(marker::ROOT),
                    root.element_type
                );
                return None;
            }
        }
    };

    let title = doc_root
        .reserved_or_plain(marker::TITLE, "title", options)
        .unwrap_or_else(|| options.default_title.clone());
    let doc_type = options.document_type(
        doc_root
            .reserved_or_plain(marker::TYPE, "type", options)
            .as_deref(),
    );
    let paper_size = doc_root
        .reserved_or_plain(marker::PAPER_SIZE, "paperSize", options)
        .unwrap_or_else(|| options.default_paper_size.clone());

    let mut doc = Document::new(title, doc_type, paper_size);
    doc.description = doc_root.reserved_or_plain(marker::DESCRIPTION, "description", options);

    let pages = doc_root.child_components().filter(|child| {
        child.is_marked(marker::PAGE, options)
            || (child.props.contains_key("background") && child.has_content())
    });
    for (index, node) in pages.enumerate() {
        doc.add_page(page_from_node(node, index, options));
    }

    log::debug!(
        "captured '{}' from component tree: {} pages, {} elements",
        doc.title,
        doc.page_count(),
        doc.element_count()
    );
    Some(doc)
}

fn page_from_node(node: &ComponentNode, page_index: usize, options: &CaptureOptions) -> Page {
    let mut page = Page::new(page_id(page_index));
    page.background = node.prop_text("background");
    page.padding = match node.props.get("padding") {
        Some(Value::Number(n)) => n.as_f64().map(Padding::Number),
        Some(Value::String(s)) => Some(Padding::Text(s.clone())),
        _ => None,
    };
    page.style = node.style().filter(|style| !style.is_empty());
    page.elements = capture_children(node.child_nodes(), page_index, &mut Vec::new(), options);
    page
}

/// Run a render closure and capture its output.
///
/// A render error is a capture failure: logged, and `None` is returned.
pub fn capture_rendered<F>(render: F, options: &CaptureOptions) -> Option<Document>
where
    F: FnOnce() -> Result<ComponentNode>,
{
    match render() {
        Ok(tree) => capture_component_tree(&tree, options),
        Err(e) => {
            log::warn!("component capture failed: render error: {}", e);
            None
        }
    }
}
