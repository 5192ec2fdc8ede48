//! Markup snapshot capture.
//!
//! A snapshot is first reduced to [`MarkupRecord`]s: tag, ordinary
//! attributes, parsed inline style, reserved markers, and ordered children.
//! Records carry no semantics; the element mapping in the parent module turns
//! them into IR.
//!
//! Document layout expected in a live snapshot:
//!
//! ```text
//! <div data-doc-title="Sale" data-doc-type="flyer" data-doc-paper-size="A4">
//!   <div data-doc-page style="background-color: #fff">
//!     <div data-doc-content style="padding: 24px"> ...elements... </div>
//!   </div>
//! </div>
//! ```
//!
//! The `<Document title type paperSize>` / `<Page background padding>`
//! scaffold of rendered template source is accepted as well.

use super::options::marker;
use super::{capture_children, CaptureOptions, ChildRef, TreeNode};
use crate::error::{Error, Result};
use crate::model::{page_id, Document, Padding, Page, Style, DOCUMENT_COMPONENT, PAGE_COMPONENT};
use crate::style::UNITLESS_PROPERTIES;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::borrow::Cow;

/// HTML elements that never have a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// A node of a markup snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MarkupNode {
    /// An element with attributes in source order
    Element {
        tag: String,
        #[serde(default)]
        attributes: IndexMap<String, String>,
        #[serde(default)]
        children: Vec<MarkupNode>,
    },
    /// Character data
    Text { content: String },
    /// A comment, ignored by capture
    Comment { content: String },
}

impl MarkupNode {
    pub fn element(tag: impl Into<String>) -> Self {
        MarkupNode::Element {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        MarkupNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        MarkupNode::Comment {
            content: content.into(),
        }
    }

    /// Add an attribute. No effect on text or comment nodes.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let MarkupNode::Element { attributes, .. } = &mut self {
            attributes.insert(name.into(), value.into());
        }
        self
    }

    /// Add a child. No effect on text or comment nodes.
    pub fn with_child(mut self, child: MarkupNode) -> Self {
        self.push_child(child);
        self
    }

    /// Tag name, for elements.
    pub fn tag(&self) -> Option<&str> {
        match self {
            MarkupNode::Element { tag, .. } => Some(tag.as_str()),
            _ => None,
        }
    }

    /// Attribute value, for elements.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            MarkupNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Child nodes; empty for text and comments.
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Element { children, .. } => children.as_slice(),
            _ => &[],
        }
    }

    fn push_child(&mut self, child: MarkupNode) {
        if let MarkupNode::Element { children, .. } = self {
            children.push(child);
        }
    }
}

/// Structural record extracted from a markup element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupRecord {
    pub tag: String,

    /// Ordinary attributes; `class` is stored as `className`
    pub attributes: IndexMap<String, String>,

    /// Parsed inline style
    pub style: Option<Style>,

    /// Reserved attributes keyed by marker name (prefix stripped)
    pub markers: IndexMap<String, String>,

    pub children: Vec<RecordChild>,
}

/// Child of a [`MarkupRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordChild {
    /// Trimmed, non-empty text
    Text(String),
    Record(MarkupRecord),
}

impl MarkupRecord {
    /// Whether the reserved marker is present.
    pub fn has_marker(&self, name: &str) -> bool {
        self.markers.contains_key(name)
    }

    /// Non-empty marker value.
    pub fn marker(&self, name: &str) -> Option<&str> {
        self.markers
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Element children, skipping text.
    pub fn child_records(&self) -> impl Iterator<Item = &MarkupRecord> {
        self.children.iter().filter_map(|child| match child {
            RecordChild::Record(record) => Some(record),
            RecordChild::Text(_) => None,
        })
    }
}

impl TreeNode for MarkupRecord {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attributes(&self, _options: &CaptureOptions) -> IndexMap<String, String> {
        self.attributes.clone()
    }

    fn style(&self) -> Option<Style> {
        self.style.clone()
    }

    fn has_marker(&self, name: &str, _options: &CaptureOptions) -> bool {
        MarkupRecord::has_marker(self, name)
    }

    fn child_nodes(&self) -> Vec<ChildRef<'_, Self>> {
        self.children
            .iter()
            .map(|child| match child {
                RecordChild::Text(text) => ChildRef::Text(Cow::Borrowed(text.as_str())),
                RecordChild::Record(record) => ChildRef::Node(record),
            })
            .collect()
    }
}

/// Parse an inline `style` attribute.
///
/// Pairs are `;`-separated `property: value`; property names become
/// camelCase. Pairs without a property or a value are skipped. A `;`
/// inside parentheses or quotes does not end a pair.
pub fn parse_inline_style(text: &str) -> Style {
    let mut style = Style::new();
    for declaration in split_declarations(text) {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let (property, value) = (property.trim(), value.trim());
        if property.is_empty() || value.is_empty() {
            continue;
        }
        let property = kebab_to_camel(property);
        let value = parse_style_value(&property, value);
        style.insert(property, value);
    }
    style
}

fn split_declarations(text: &str) -> Vec<&str> {
    let mut declarations = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                ';' if depth == 0 => {
                    declarations.push(&text[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    declarations.push(&text[start..]);
    declarations
}

/// `background-color` → `backgroundColor`, `-webkit-transform` →
/// `WebkitTransform`. Custom properties (`--accent`) are kept as written.
pub fn kebab_to_camel(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }

    let mut out = String::with_capacity(property.len());
    let mut upper = false;
    for c in property.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert a style value: numeric `px` lengths become bare numbers, as do
/// plain numbers of unit-less properties. Everything else stays a string.
pub fn parse_style_value(property: &str, value: &str) -> Value {
    let value = value.trim();
    if let Some(length) = value.strip_suffix("px") {
        if let Some(number) = parse_number(length) {
            return number;
        }
    }
    if UNITLESS_PROPERTIES.contains(&property) {
        if let Some(number) = parse_number(value) {
            return number;
        }
    }
    Value::String(value.to_string())
}

fn parse_number(text: &str) -> Option<Value> {
    let n: f64 = text.trim().parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return Some(Value::from(n as i64));
    }
    Number::from_f64(n).map(Value::Number)
}

/// Reduce a markup element to a structural record.
///
/// Returns `None` for text and comment nodes.
pub fn record_from_node(node: &MarkupNode, options: &CaptureOptions) -> Option<MarkupRecord> {
    let MarkupNode::Element {
        tag,
        attributes,
        children,
    } = node
    else {
        return None;
    };

    let mut record = MarkupRecord {
        tag: tag.clone(),
        ..MarkupRecord::default()
    };

    for (name, value) in attributes {
        if let Some(marker) = options.marker_name(name) {
            record.markers.insert(marker.to_string(), value.clone());
            continue;
        }
        match name.as_str() {
            "style" => {
                let style = parse_inline_style(value);
                if !style.is_empty() {
                    record.style = Some(style);
                }
            }
            "class" => {
                record.attributes.insert("className".to_string(), value.clone());
            }
            _ => {
                record.attributes.insert(name.clone(), value.clone());
            }
        }
    }

    for child in children {
        match child {
            MarkupNode::Text { content } => {
                let text = content.trim();
                if !text.is_empty() {
                    record.children.push(RecordChild::Text(text.to_string()));
                }
            }
            MarkupNode::Element { .. } => {
                if let Some(inner) = record_from_node(child, options) {
                    record.children.push(RecordChild::Record(inner));
                }
            }
            MarkupNode::Comment { .. } => {}
        }
    }

    Some(record)
}

/// Capture a document from a markup snapshot.
///
/// The document root is the snapshot root, or one of its element children,
/// carrying reserved document attributes or marked pages. Returns `None`
/// when no such node exists.
pub fn capture_markup(root: &MarkupNode, options: &CaptureOptions) -> Option<Document> {
    let Some(record) = record_from_node(root, options) else {
        log::warn!("markup capture failed: snapshot root is not an element");
        return None;
    };

    let Some(doc_root) = find_document_root(&record) else {
        log::warn!("markup capture failed: no document root in <{}>", record.tag);
        return None;
    };

    Some(document_from_record(doc_root, options))
}

fn is_document_root(record: &MarkupRecord) -> bool {
    record.tag == DOCUMENT_COMPONENT
        || [marker::ROOT, marker::TITLE, marker::TYPE, marker::PAPER_SIZE]
            .iter()
            .any(|name| record.has_marker(name))
        || record.child_records().any(is_page)
}

fn is_page(record: &MarkupRecord) -> bool {
    record.has_marker(marker::PAGE) || record.tag == PAGE_COMPONENT
}

/// Plain attribute of a scaffold component (`Document` or `Page`).
fn scaffold_attribute<'a>(record: &'a MarkupRecord, component: &str, name: &str) -> Option<&'a str> {
    if record.tag != component {
        return None;
    }
    record
        .attributes
        .get(name)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
}

/// Reserved marker first, then the plain `Document` attribute.
fn document_field<'a>(record: &'a MarkupRecord, name: &str, plain: &str) -> Option<&'a str> {
    record
        .marker(name)
        .or_else(|| scaffold_attribute(record, DOCUMENT_COMPONENT, plain))
}

fn find_document_root(record: &MarkupRecord) -> Option<&MarkupRecord> {
    if is_document_root(record) {
        return Some(record);
    }
    record.child_records().find(|child| is_document_root(child))
}

fn document_from_record(record: &MarkupRecord, options: &CaptureOptions) -> Document {
    let title = document_field(record, marker::TITLE, "title")
        .unwrap_or(options.default_title.as_str())
        .to_string();
    let doc_type = options.document_type(document_field(record, marker::TYPE, "type"));
    let paper_size = document_field(record, marker::PAPER_SIZE, "paperSize")
        .unwrap_or(options.default_paper_size.as_str())
        .to_string();

    let mut doc = Document::new(title, doc_type, paper_size);
    doc.description =
        document_field(record, marker::DESCRIPTION, "description").map(str::to_string);

    let marked: Vec<&MarkupRecord> = record.child_records().filter(|child| is_page(child)).collect();
    let pages = if marked.is_empty() {
        record.child_records().collect()
    } else {
        marked
    };

    for (index, page) in pages.into_iter().enumerate() {
        doc.add_page(page_from_record(page, index, options));
    }

    log::debug!(
        "captured '{}' from markup: {} pages, {} elements",
        doc.title,
        doc.page_count(),
        doc.element_count()
    );
    doc
}

fn page_from_record(record: &MarkupRecord, page_index: usize, options: &CaptureOptions) -> Page {
    let mut page = Page::new(page_id(page_index));

    let mut style = record.style.clone().unwrap_or_default();
    let background = style
        .remove("backgroundColor")
        .or_else(|| style.remove("background"));
    page.background = background
        .map(|value| value_text(&value))
        .or_else(|| scaffold_attribute(record, PAGE_COMPONENT, "background").map(str::to_string));
    if !style.is_empty() {
        page.style = Some(style);
    }

    let wrapper = match record.children.as_slice() {
        [RecordChild::Record(inner)] if inner.has_marker(marker::CONTENT) => Some(inner),
        _ => None,
    };
    let body = match wrapper {
        Some(inner) => {
            page.padding = inner
                .style
                .as_ref()
                .and_then(|style| style.get("padding"))
                .and_then(padding_from_value);
            inner
        }
        None => {
            page.padding =
                scaffold_attribute(record, PAGE_COMPONENT, "padding").and_then(padding_from_attribute);
            record
        }
    };

    page.elements = capture_children(body.child_nodes(), page_index, &mut Vec::new(), options);
    page
}

fn padding_from_value(value: &Value) -> Option<Padding> {
    match value {
        Value::Number(n) => n.as_f64().map(Padding::Number),
        Value::String(s) => Some(Padding::Text(s.clone())),
        _ => None,
    }
}

/// `{24}` is a number, anything else a CSS length.
fn padding_from_attribute(text: &str) -> Option<Padding> {
    match text.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')) {
        Some(expression) => expression.trim().parse().ok().map(Padding::Number),
        None => Some(Padding::Text(text.to_string())),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse serialized markup (an `outerHTML` snapshot) into a node tree.
///
/// HTML void elements need no closing tag, unmatched end tags are ignored, and
/// elements left open at the end of input are closed. Returns the first
/// top-level element.
pub fn parse_markup(text: &str) -> Result<MarkupNode> {
    let mut reader = Reader::from_str(text);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut stack: Vec<MarkupNode> = Vec::new();
    let mut roots: Vec<MarkupNode> = Vec::new();
    let mut buf_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                flush_text(&mut buf_text, &mut stack, &mut roots);
                let node = element_from_start(&e);
                if node.tag().is_some_and(is_void) {
                    attach(node, &mut stack, &mut roots);
                } else {
                    stack.push(node);
                }
            }
            Ok(Event::Empty(e)) => {
                flush_text(&mut buf_text, &mut stack, &mut roots);
                attach(element_from_start(&e), &mut stack, &mut roots);
            }
            Ok(Event::End(e)) => {
                flush_text(&mut buf_text, &mut stack, &mut roots);
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if is_void(&name) {
                    continue;
                }
                let open = stack
                    .iter()
                    .rposition(|node| node.tag() == Some(name.as_str()));
                if let Some(position) = open {
                    while stack.len() > position {
                        if let Some(node) = stack.pop() {
                            attach(node, &mut stack, &mut roots);
                        }
                    }
                } else {
                    log::debug!("ignoring unmatched </{}>", name);
                }
            }
            Ok(Event::Text(e)) => {
                buf_text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::CData(e)) => {
                buf_text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                match resolve_entity(&entity) {
                    Some(resolved) => buf_text.push_str(&resolved),
                    None => {
                        buf_text.push('&');
                        buf_text.push_str(&entity);
                        buf_text.push(';');
                    }
                }
            }
            Ok(Event::Comment(e)) => {
                flush_text(&mut buf_text, &mut stack, &mut roots);
                let content = String::from_utf8_lossy(e.as_ref()).to_string();
                attach(MarkupNode::comment(content), &mut stack, &mut roots);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    flush_text(&mut buf_text, &mut stack, &mut roots);
    while let Some(node) = stack.pop() {
        attach(node, &mut stack, &mut roots);
    }

    roots
        .into_iter()
        .find(|node| matches!(node, MarkupNode::Element { .. }))
        .ok_or_else(|| Error::Markup("no element in markup".to_string()))
}

fn is_void(tag: &str) -> bool {
    VOID_TAGS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

fn element_from_start(e: &BytesStart<'_>) -> MarkupNode {
    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut attributes = IndexMap::new();
    for attr in e.html_attributes().flatten() {
        let name = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = match quick_xml::escape::unescape(&raw) {
            Ok(value) => value.to_string(),
            Err(_) => raw.to_string(),
        };
        attributes.insert(name, value);
    }
    MarkupNode::Element {
        tag,
        attributes,
        children: Vec::new(),
    }
}

fn attach(node: MarkupNode, stack: &mut [MarkupNode], roots: &mut Vec<MarkupNode>) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(node),
        None => roots.push(node),
    }
}

fn flush_text(buf_text: &mut String, stack: &mut [MarkupNode], roots: &mut Vec<MarkupNode>) {
    if buf_text.is_empty() {
        return;
    }
    let content = std::mem::take(buf_text);
    attach(MarkupNode::text(content), stack, roots);
}

fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        "nbsp" => return Some("\u{a0}".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        None
    };
    code.and_then(char::from_u32).map(|c| c.to_string())
}
