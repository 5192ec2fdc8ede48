//! Capture: rendered trees into the document IR.
//!
//! Two walkers share one element mapping:
//!
//! - [`markup`] reads a markup snapshot (an `outerHTML` dump or a hand-built
//!   [`MarkupNode`] tree), extracts [`MarkupRecord`]s, and maps them.
//! - [`component`] reads a rendered component tree ([`ComponentNode`]).
//!
//! Both go through [`CLASSIFICATION_RULES`] and assign positional ids, so
//! capturing an unchanged tree twice yields equal documents. Failure is an
//! absent result, never an error.

pub mod component;
pub mod markup;
mod options;
mod rules;

pub use component::{capture_component_tree, capture_rendered, ComponentChild, ComponentNode};
pub use markup::{
    capture_markup, kebab_to_camel, parse_inline_style, parse_markup, parse_style_value,
    record_from_node, MarkupNode, MarkupRecord, RecordChild,
};
pub use options::{
    marker, CaptureOptions, DEFAULT_PAPER_SIZE, DEFAULT_PRIVATE_PREFIX, DEFAULT_TITLE,
};
pub use rules::{
    classify, ClassificationRule, NodeFacts, CLASSIFICATION_RULES, IMAGE_TAGS, SHAPE_TAGS,
    TEXT_TAGS,
};

use crate::model::{element_id, Document, Element, ElementKind, Style, DEFAULT_TAG};
use indexmap::IndexMap;
use std::borrow::Cow;

/// A capture strategy over some input tree.
pub trait Capture {
    /// Tree type this strategy reads.
    type Input: ?Sized;

    /// Capture a document, or `None` when no document is recognizable.
    fn capture(&self, input: &Self::Input) -> Option<Document>;
}

/// Markup snapshot capture.
#[derive(Debug, Clone, Default)]
pub struct MarkupCapture {
    options: CaptureOptions,
}

impl MarkupCapture {
    pub fn new(options: CaptureOptions) -> Self {
        Self { options }
    }
}

impl Capture for MarkupCapture {
    type Input = MarkupNode;

    fn capture(&self, input: &MarkupNode) -> Option<Document> {
        capture_markup(input, &self.options)
    }
}

/// Rendered component-tree capture.
#[derive(Debug, Clone, Default)]
pub struct ComponentTreeCapture {
    options: CaptureOptions,
}

impl ComponentTreeCapture {
    pub fn new(options: CaptureOptions) -> Self {
        Self { options }
    }
}

impl Capture for ComponentTreeCapture {
    type Input = ComponentNode;

    fn capture(&self, input: &ComponentNode) -> Option<Document> {
        capture_component_tree(input, &self.options)
    }
}

/// Whichever representation is currently available.
#[derive(Debug, Clone, Copy)]
pub enum CaptureSource<'a> {
    /// A markup snapshot
    FromMarkup(&'a MarkupNode),
    /// A rendered component tree
    FromComponentTree(&'a ComponentNode),
}

impl CaptureSource<'_> {
    /// Capture the document from this source.
    pub fn capture(&self, options: &CaptureOptions) -> Option<Document> {
        match *self {
            CaptureSource::FromMarkup(node) => capture_markup(node, options),
            CaptureSource::FromComponentTree(node) => capture_component_tree(node, options),
        }
    }

    /// Source name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CaptureSource::FromMarkup(_) => "markup",
            CaptureSource::FromComponentTree(_) => "component-tree",
        }
    }
}

/// A child as seen by the element mapping.
pub(crate) enum ChildRef<'a, N> {
    Text(Cow<'a, str>),
    Node(&'a N),
}

/// Tree shape shared by both walkers.
pub(crate) trait TreeNode: Sized {
    /// Tag or component type.
    fn tag(&self) -> &str;

    /// Ordinary attributes in source order, `class` already renamed
    /// `className`. Excludes style and reserved attributes.
    fn attributes(&self, options: &CaptureOptions) -> IndexMap<String, String>;

    fn style(&self) -> Option<Style>;

    /// Whether a reserved marker (short name, e.g. `page`) is set.
    fn has_marker(&self, name: &str, options: &CaptureOptions) -> bool;

    fn child_nodes(&self) -> Vec<ChildRef<'_, Self>>;
}

/// Map child nodes to elements, skipping whitespace-only text.
///
/// `path` holds the indices leading to the parent; literal strings become
/// `span` text elements so no text is lost.
pub(crate) fn capture_children<N: TreeNode>(
    children: Vec<ChildRef<'_, N>>,
    page_index: usize,
    path: &mut Vec<usize>,
    options: &CaptureOptions,
) -> Vec<Element> {
    let children = significant(children);
    let mut elements = Vec::with_capacity(children.len());

    for (index, child) in children.into_iter().enumerate() {
        path.push(index);
        let element = match child {
            ChildRef::Node(node) => capture_element(node, page_index, path, options),
            ChildRef::Text(text) => {
                Element::text(element_id(page_index, path), "span", text.trim())
            }
        };
        path.pop();
        elements.push(element);
    }

    elements
}

/// Map one node, and its subtree, to an element at `path`.
pub(crate) fn capture_element<N: TreeNode>(
    node: &N,
    page_index: usize,
    path: &mut Vec<usize>,
    options: &CaptureOptions,
) -> Element {
    let tag = node.tag();
    let mut attributes = node.attributes(options);
    let class_name = attributes.shift_remove("className");

    let kind = classify(&NodeFacts {
        tag,
        class_name: class_name.as_deref(),
        shape_marker: node.has_marker(marker::SHAPE, options),
    });

    let mut element = Element::new(element_id(page_index, path), kind);
    if !tag.eq_ignore_ascii_case(DEFAULT_TAG) {
        element.tag_name = Some(tag.to_string());
    }
    element.class_name = class_name;
    if kind == ElementKind::Image {
        element.src = attributes.shift_remove("src");
        element.alt = attributes.shift_remove("alt");
    }
    element.style = node.style().filter(|style| !style.is_empty());

    let children = significant(node.child_nodes());
    let literal = match children.as_slice() {
        [ChildRef::Text(text)] if matches!(kind, ElementKind::Text | ElementKind::Container) => {
            Some(text.trim().to_string())
        }
        _ => None,
    };
    match literal {
        Some(content) => {
            element.kind = ElementKind::Text;
            element.content = Some(content);
        }
        None => element.children = capture_children(children, page_index, path, options),
    }
    element.attributes = attributes;

    log::trace!("captured {} as {}", element.id, element.kind.as_str());
    element
}

fn significant<N>(children: Vec<ChildRef<'_, N>>) -> Vec<ChildRef<'_, N>> {
    children
        .into_iter()
        .filter(|child| match child {
            ChildRef::Text(text) => !text.trim().is_empty(),
            ChildRef::Node(_) => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentType;

    fn sample_markup() -> MarkupNode {
        MarkupNode::element("div")
            .with_attribute("data-doc-title", "Sample")
            .with_child(
                MarkupNode::element("div")
                    .with_attribute("data-doc-page", "")
                    .with_child(MarkupNode::element("p").with_child(MarkupNode::text("Hi"))),
            )
    }

    fn sample_tree() -> ComponentNode {
        ComponentNode::new("div")
            .with_prop("data-doc-root", true)
            .with_prop("title", "Sample")
            .with_child(
                ComponentNode::new("div")
                    .with_prop("data-doc-page", true)
                    .with_child(ComponentNode::new("p").with_text("Hi")),
            )
    }

    #[test]
    fn test_capture_sources_agree() {
        let markup = sample_markup();
        let tree = sample_tree();
        let options = CaptureOptions::default();

        let from_markup = CaptureSource::FromMarkup(&markup).capture(&options).unwrap();
        let from_tree = CaptureSource::FromComponentTree(&tree).capture(&options).unwrap();

        assert_eq!(from_markup, from_tree);
        assert_eq!(from_markup.doc_type, DocumentType::Flyer);
        assert_eq!(from_markup.pages[0].elements[0].content(), Some("Hi"));
    }

    #[test]
    fn test_capture_strategies() {
        let markup = MarkupCapture::default().capture(&sample_markup());
        let tree = ComponentTreeCapture::default().capture(&sample_tree());
        assert!(markup.is_some());
        assert_eq!(markup, tree);
    }

    #[test]
    fn test_capture_source_name() {
        let tree = sample_tree();
        assert_eq!(CaptureSource::FromComponentTree(&tree).name(), "component-tree");
    }
}
