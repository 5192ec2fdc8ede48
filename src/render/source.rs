//! Template source rendering.
//!
//! Walks the IR and emits a self-contained source block:
//!
//! ```text
//! import { Document, Page } from '@/components/document';
//!
//! export const OutletSaleFlyer = (
//!   <Document title="Outlet Sale Flyer" type="flyer" paperSize="A4">
//!     <Page background="#fff">
//!       <h1>SALE</h1>
//!     </Page>
//!   </Document>
//! );
//! ```
//!
//! Both policies share the walk; they differ in how style attributes are laid
//! out, how numbers are written, and where blank lines go.

use super::writer::SourceWriter;
use super::{FormatPolicy, RenderOptions, RenderResult, RenderStats};
use crate::error::Result;
use crate::ident::sanitize_identifier;
use crate::model::{Document, Element, Padding, Page, Style, DOCUMENT_COMPONENT, PAGE_COMPONENT};
use crate::style::format::{inline_object, style_entries};

/// Convert a document to template source.
pub fn to_source(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = SourceRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document to template source with statistics.
pub fn to_source_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = SourceRenderer::new(options);
    renderer.render_with_stats(doc)
}

enum StyleAttr {
    Inline(String),
    Block(Vec<String>),
}

/// Template source renderer.
pub struct SourceRenderer {
    options: RenderOptions,
    stats: RenderStats,
}

impl SourceRenderer {
    /// Create a new source renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: RenderStats::new(),
        }
    }

    /// Render a document to source.
    pub fn render(mut self, doc: &Document) -> Result<String> {
        Ok(self.render_internal(doc))
    }

    /// Render a document to source with statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> Result<RenderResult> {
        self.options.collect_stats = true;
        let source = self.render_internal(doc);
        self.stats.count_lines(&source);
        Ok(RenderResult::new(source, self.stats))
    }

    fn render_internal(&mut self, doc: &Document) -> String {
        let mut w = SourceWriter::new(self.options.indent_width);

        if !self.options.import_line.is_empty() {
            w.line(&self.options.import_line);
            w.blank_line();
        }

        w.line(&format!(
            "export const {} = (",
            sanitize_identifier(&doc.title)
        ));
        w.indent();
        w.line(&format!(
            "<{} title={} type={} paperSize={}>",
            DOCUMENT_COMPONENT,
            quote_attr(&doc.title),
            quote_attr(doc.doc_type.as_str()),
            quote_attr(&doc.paper_size)
        ));
        w.indent();

        for (i, page) in doc.pages.iter().enumerate() {
            if i > 0 && self.options.policy == FormatPolicy::Detailed {
                w.blank_line();
            }
            self.render_page(&mut w, page);
        }

        w.dedent();
        w.line(&format!("</{}>", DOCUMENT_COMPONENT));
        w.dedent();
        w.line(");");

        log::debug!(
            "rendered '{}' ({} pages, {} policy)",
            doc.title,
            doc.pages.len(),
            self.options.policy
        );
        w.finish()
    }

    fn render_page(&mut self, w: &mut SourceWriter, page: &Page) {
        if self.options.collect_stats {
            self.stats.add_page();
        }

        let mut attrs = Vec::new();
        if let Some(ref background) = page.background {
            attrs.push(format!("background={}", quote_attr(background)));
        }
        match page.padding {
            Some(Padding::Number(n)) => attrs.push(format!("padding={{{}}}", n)),
            Some(Padding::Text(ref s)) => attrs.push(format!("padding={}", quote_attr(s))),
            None => {}
        }

        let style = page.style.as_ref().filter(|s| !s.is_empty());
        self.render_tag(w, PAGE_COMPONENT, &attrs, style, None, &page.elements);
    }

    fn render_element(&mut self, w: &mut SourceWriter, element: &Element) {
        if self.options.collect_stats {
            self.stats.add_element(element.kind);
        }

        let mut attrs = Vec::new();
        if let Some(ref src) = element.src {
            attrs.push(format!("src={}", quote_attr(src)));
        }
        if let Some(ref alt) = element.alt {
            attrs.push(format!("alt={}", quote_attr(alt)));
        }
        if let Some(ref class_name) = element.class_name {
            attrs.push(format!("className={}", quote_attr(class_name)));
        }
        for (name, value) in &element.attributes {
            if matches!(name.as_str(), "style" | "src" | "alt" | "class" | "className") {
                continue;
            }
            attrs.push(format!("{}={}", name, quote_attr(value)));
        }

        self.render_tag(
            w,
            element.tag(),
            &attrs,
            element.style(),
            element.content(),
            &element.children,
        );
    }

    /// Emit one tag: attributes, style last, then content, then children.
    fn render_tag(
        &mut self,
        w: &mut SourceWriter,
        tag: &str,
        attrs: &[String],
        style: Option<&Style>,
        content: Option<&str>,
        children: &[Element],
    ) {
        let self_closing = content.is_none() && children.is_empty();

        match style.map(|s| self.style_attr(s)) {
            Some(StyleAttr::Block(entries)) => {
                if self.options.collect_stats {
                    self.stats.add_wrapped_style();
                }
                w.line(&format!("<{}", tag));
                w.indent();
                for attr in attrs {
                    w.line(attr);
                }
                w.line("style={{");
                w.indent();
                let last = entries.len().saturating_sub(1);
                for (i, entry) in entries.iter().enumerate() {
                    if i < last {
                        w.line(&format!("{},", entry));
                    } else {
                        w.line(entry);
                    }
                }
                w.dedent();
                w.line("}}");
                w.dedent();

                if self_closing {
                    w.line("/>");
                    return;
                }
                w.line(">");
                self.render_body(w, content, children);
                w.line(&format!("</{}>", tag));
            }
            inline => {
                let has_style = inline.is_some();
                let mut head = format!("<{}", tag);
                for attr in attrs {
                    head.push(' ');
                    head.push_str(attr);
                }
                if let Some(StyleAttr::Inline(style_attr)) = inline {
                    head.push(' ');
                    head.push_str(&style_attr);
                }

                if self_closing {
                    w.line(&format!("{} />", head));
                    return;
                }

                if children.is_empty() {
                    if let Some(text) = content {
                        if self.fits_on_one_line(text, has_style) {
                            w.line(&format!("{}>{}</{}>", head, escape_text(text), tag));
                            return;
                        }
                    }
                }

                w.line(&format!("{}>", head));
                self.render_body(w, content, children);
                w.line(&format!("</{}>", tag));
            }
        }
    }

    fn render_body(&mut self, w: &mut SourceWriter, content: Option<&str>, children: &[Element]) {
        w.indent();
        if let Some(text) = content {
            for line in text.lines() {
                if line.trim().is_empty() {
                    w.blank_line();
                } else {
                    w.line(&escape_text(line.trim_end()));
                }
            }
        }
        for (i, child) in children.iter().enumerate() {
            if i > 0 && self.needs_separator(&children[i - 1], child) {
                w.blank_line();
            }
            self.render_element(w, child);
        }
        w.dedent();
    }

    fn style_attr(&self, style: &Style) -> StyleAttr {
        let entries = style_entries(style, self.options.policy);
        match self.options.policy {
            FormatPolicy::Detailed if entries.len() > self.options.inline_style_limit => {
                StyleAttr::Block(entries)
            }
            _ => StyleAttr::Inline(format!("style={{{}}}", inline_object(entries))),
        }
    }

    fn fits_on_one_line(&self, text: &str, has_style: bool) -> bool {
        if text.contains('\n') || text.chars().count() >= self.options.inline_text_limit {
            return false;
        }
        match self.options.policy {
            FormatPolicy::Compact => !has_style,
            FormatPolicy::Detailed => true,
        }
    }

    /// Detailed policy groups siblings: a blank line between two absolutely
    /// positioned elements, or between elements with different tags.
    fn needs_separator(&self, prev: &Element, next: &Element) -> bool {
        if self.options.policy != FormatPolicy::Detailed {
            return false;
        }
        (prev.is_absolutely_positioned() && next.is_absolutely_positioned())
            || prev.tag() != next.tag()
    }
}

fn quote_attr(value: &str) -> String {
    format!("\"{}\"", value.replace('&', "&amp;").replace('"', "&quot;"))
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
