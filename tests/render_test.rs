//! Integration tests for source rendering.

use pagecodec::render::{to_source, to_source_with_stats, FormatPolicy, RenderOptions};
use pagecodec::{Document, DocumentType, Element, ElementKind, Page, Style};

fn outlet_sale_flyer() -> Document {
    Document::new("Outlet Sale Flyer", DocumentType::Flyer, "A4").with_page(
        Page::new("page-0")
            .with_background("#fff")
            .with_element(Element::text("page-0-element-0", "h1", "SALE")),
    )
}

fn single_element(element: Element) -> Document {
    Document::new("Sample", DocumentType::Flyer, "A4")
        .with_page(Page::new("page-0").with_element(element))
}

#[test]
fn test_outlet_sale_flyer_detailed() {
    let source = to_source(&outlet_sale_flyer(), &RenderOptions::detailed()).unwrap();

    let expected = "\
import { Document, Page } from '@/components/document';

export const OutletSaleFlyer = (
  <Document title=\"Outlet Sale Flyer\" type=\"flyer\" paperSize=\"A4\">
    <Page background=\"#fff\">
      <h1>SALE</h1>
    </Page>
  </Document>
);
";
    assert_eq!(source, expected);
    assert_eq!(source.matches("<Page ").count(), 1);
    assert_eq!(source.matches("</Document>").count(), 1);
}

#[test]
fn test_outlet_sale_flyer_compact_matches_detailed() {
    // No styles, one page: the policies agree.
    let doc = outlet_sale_flyer();
    assert_eq!(
        to_source(&doc, &RenderOptions::compact()).unwrap(),
        to_source(&doc, &RenderOptions::detailed()).unwrap()
    );
}

#[test]
fn test_page_count_and_order() {
    let mut doc = Document::new("Catalog", DocumentType::Booklet, "A5");
    for (i, color) in ["#111", "#222", "#333"].iter().enumerate() {
        doc.add_page(
            Page::new(format!("page-{}", i))
                .with_background(*color)
                .with_element(Element::text(format!("page-{}-element-0", i), "p", format!("Page {}", i))),
        );
    }

    for policy in [FormatPolicy::Compact, FormatPolicy::Detailed] {
        let source = to_source(&doc, &RenderOptions::new().with_policy(policy)).unwrap();
        assert_eq!(source.matches("<Page ").count(), 3);

        let first = source.find("#111").unwrap();
        let second = source.find("#222").unwrap();
        let third = source.find("#333").unwrap();
        assert!(first < second && second < third);
    }
}

#[test]
fn test_blank_line_between_pages_detailed_only() {
    let doc = Document::new("Two", DocumentType::Presentation, "16:9")
        .with_page(Page::new("page-0"))
        .with_page(Page::new("page-1"));

    let detailed = to_source(&doc, &RenderOptions::detailed()).unwrap();
    assert!(detailed.contains("    <Page />\n\n    <Page />\n"));

    let compact = to_source(&doc, &RenderOptions::compact()).unwrap();
    assert!(compact.contains("    <Page />\n    <Page />\n"));
}

#[test]
fn test_compact_numeric_units() {
    let doc = single_element(
        Element::text("e", "p", "Hi").with_style(Style::new().with("fontSize", 16).with("opacity", 0.5)),
    );
    let source = to_source(&doc, &RenderOptions::compact()).unwrap();
    assert!(source.contains("style={{ fontSize: '16px', opacity: 0.5 }}"));
}

#[test]
fn test_detailed_numbers_are_bare() {
    let doc = single_element(
        Element::text("e", "p", "Hi").with_style(Style::new().with("fontSize", 16).with("opacity", 0.5)),
    );
    let source = to_source(&doc, &RenderOptions::detailed()).unwrap();
    assert!(source.contains("style={{ fontSize: 16, opacity: 0.5 }}"));
    assert!(!source.contains("px"));
}

#[test]
fn test_hello_single_line_compact() {
    let doc = single_element(Element::text("e", "p", "Hello"));
    let source = to_source(&doc, &RenderOptions::compact()).unwrap();
    assert!(source.lines().any(|line| line.trim() == "<p>Hello</p>"));
}

#[test]
fn test_hello_three_entry_style_detailed() {
    let style = Style::new()
        .with("color", "#333")
        .with("fontSize", 16)
        .with("textAlign", "center");
    let doc = single_element(Element::text("e", "p", "Hello").with_style(style));
    let source = to_source(&doc, &RenderOptions::detailed()).unwrap();

    let lines: Vec<&str> = source.lines().map(str::trim).collect();
    let open = lines.iter().position(|line| *line == "<p").unwrap();
    assert_eq!(
        &lines[open..open + 9],
        &[
            "<p",
            "style={{",
            "color: '#333',",
            "fontSize: 16,",
            "textAlign: 'center'",
            "}}",
            ">",
            "Hello",
            "</p>",
        ]
    );
}

#[test]
fn test_attribute_order_style_last() {
    let element = Element::image("e", "hero.png")
        .with_alt("Hero")
        .with_class_name("cover")
        .with_attribute("loading", "lazy")
        .with_style(Style::new().with("width", 200));
    let source = to_source(&single_element(element), &RenderOptions::compact()).unwrap();
    assert!(source.contains(
        "<img src=\"hero.png\" alt=\"Hero\" className=\"cover\" loading=\"lazy\" style={{ width: '200px' }} />"
    ));
}

#[test]
fn test_nested_containers_indent() {
    let element = Element::container("e").with_child(
        Element::container("e-0").with_child(Element::new("e-0-0", ElementKind::Shape)),
    );
    let source = to_source(&single_element(element), &RenderOptions::compact()).unwrap();
    assert!(source.contains("      <div>\n        <div>\n          <div />\n        </div>\n      </div>\n"));
}

#[test]
fn test_custom_import_and_indent() {
    let options = RenderOptions::compact()
        .with_import_line("import { Document, Page } from 'kit';")
        .with_indent_width(4);
    let source = to_source(&outlet_sale_flyer(), &options).unwrap();
    assert!(source.starts_with("import { Document, Page } from 'kit';\n\n"));
    assert!(source.contains("\n            <h1>SALE</h1>\n"));
}

#[test]
fn test_stats() {
    let result = to_source_with_stats(&outlet_sale_flyer(), &RenderOptions::detailed()).unwrap();
    assert_eq!(result.stats.page_count, 1);
    assert_eq!(result.stats.text_count, 1);
    assert_eq!(result.stats.element_count(), 1);
    assert_eq!(result.stats.line_count, 9);
}

#[test]
fn test_title_sanitized_to_identifier() {
    let doc = Document::new("2024 plan: Q1!", DocumentType::Flyer, "A4");
    let source = to_source(&doc, &RenderOptions::compact()).unwrap();
    assert!(source.contains("export const Document2024PlanQ1 = ("));
    assert!(source.contains("title=\"2024 plan: Q1!\""));
}
