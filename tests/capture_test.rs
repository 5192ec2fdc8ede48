//! Integration tests for markup and component-tree capture.

use pagecodec::capture::{
    capture_component_tree, capture_markup, capture_rendered, parse_markup, CaptureOptions,
};
use pagecodec::render::{to_source, RenderOptions};
use pagecodec::{
    Capture, CaptureSource, ComponentNode, ComponentTreeCapture, Document, DocumentType, Element,
    ElementKind, Error, MarkupCapture, Page, Style,
};
use serde_json::json;

/// IR equivalent to both snapshots below.
fn spring_sale() -> Document {
    Document::new("Spring Sale", DocumentType::Flyer, "A4").with_page(
        Page::new("page-0")
            .with_background("#fef")
            .with_padding(24.0)
            .with_element(
                Element::text("page-0-element-0", "h1", "Spring Sale")
                    .with_style(Style::new().with("fontSize", 48).with("color", "#222")),
            )
            .with_element(Element::image("page-0-element-1", "hero.png").with_alt("Hero"))
            .with_element(
                Element::container("page-0-element-2")
                    .with_child(Element::text("page-0-element-2-0", "p", "Everything 20% off"))
                    .with_child(Element::text("page-0-element-2-1", "span", "Today only")),
            ),
    )
}

const SPRING_SALE_MARKUP: &str = r##"
<div data-doc-root data-doc-title="Spring Sale" data-doc-type="flyer" data-doc-paper-size="A4">
  <div data-doc-page style="background-color: #fef">
    <div data-doc-content style="padding: 24px">
      <h1 style="font-size: 48px; color: #222">Spring Sale</h1>
      <img src="hero.png" alt="Hero">
      <div>
        <p>Everything 20% off</p>
        <span>Today only</span>
      </div>
    </div>
  </div>
</div>
"##;

fn spring_sale_tree() -> ComponentNode {
    ComponentNode::new("Document")
        .with_prop("data-doc-root", true)
        .with_prop("title", "Spring Sale")
        .with_prop("type", "flyer")
        .with_prop("paperSize", "A4")
        .with_child(
            ComponentNode::new("Page")
                .with_prop("background", "#fef")
                .with_prop("padding", 24)
                .with_child(
                    ComponentNode::new("h1")
                        .with_prop("style", json!({ "fontSize": 48, "color": "#222" }))
                        .with_text("Spring Sale"),
                )
                .with_child(
                    ComponentNode::new("img")
                        .with_prop("src", "hero.png")
                        .with_prop("alt", "Hero"),
                )
                .with_child(
                    ComponentNode::new("div")
                        .with_child(ComponentNode::new("p").with_text("Everything 20% off"))
                        .with_child(ComponentNode::new("span").with_text("Today only")),
                ),
        )
}

#[test]
fn test_markup_round_trip_reproduces_ir() {
    let snapshot = parse_markup(SPRING_SALE_MARKUP).unwrap();
    let captured = capture_markup(&snapshot, &CaptureOptions::default()).unwrap();
    assert_eq!(captured, spring_sale());
}

#[test]
fn test_component_tree_reproduces_ir() {
    let captured = capture_component_tree(&spring_sale_tree(), &CaptureOptions::default()).unwrap();
    assert_eq!(captured, spring_sale());
}

#[test]
fn test_captured_ir_renders_like_built_ir() {
    let snapshot = parse_markup(SPRING_SALE_MARKUP).unwrap();
    let captured = MarkupCapture::default().capture(&snapshot).unwrap();

    for options in [RenderOptions::compact(), RenderOptions::detailed()] {
        assert_eq!(
            to_source(&captured, &options).unwrap(),
            to_source(&spring_sale(), &options).unwrap()
        );
    }
}

#[test]
fn test_policies_are_not_bit_identical() {
    // Known limitation: only structure round-trips, not layout.
    let doc = spring_sale();
    assert_ne!(
        to_source(&doc, &RenderOptions::compact()).unwrap(),
        to_source(&doc, &RenderOptions::detailed()).unwrap()
    );
}

#[test]
fn test_capture_is_idempotent() {
    let snapshot = parse_markup(SPRING_SALE_MARKUP).unwrap();
    let tree = spring_sale_tree();
    let options = CaptureOptions::default();

    assert_eq!(
        CaptureSource::FromMarkup(&snapshot).capture(&options),
        CaptureSource::FromMarkup(&snapshot).capture(&options)
    );
    assert_eq!(
        ComponentTreeCapture::default().capture(&tree),
        ComponentTreeCapture::default().capture(&tree)
    );
}

#[test]
fn test_capture_failures_are_absent() {
    let options = CaptureOptions::default();

    let markup = parse_markup("<section><p>Loose text</p></section>").unwrap();
    assert!(capture_markup(&markup, &options).is_none());

    let tree = ComponentNode::new("main").with_child(ComponentNode::new("p").with_text("x"));
    assert!(capture_component_tree(&tree, &options).is_none());

    let rendered = capture_rendered(|| Err(Error::Render("render threw".to_string())), &options);
    assert!(rendered.is_none());
}

#[test]
fn test_component_tree_from_json() {
    let json = r##"{
        "type": "div",
        "props": {},
        "children": [{
            "type": "Document",
            "props": { "data-doc-root": true, "data-doc-type": "presentation", "type": "flyer" },
            "children": [
                { "type": "Slide", "props": { "data-doc-page": true }, "children": [
                    { "type": "h2", "props": { "className": "title" }, "children": ["Agenda"] },
                    { "type": "circle", "props": { "r": 4 } }
                ]}
            ]
        }]
    }"##;

    let tree = ComponentNode::from_json_str(json).unwrap();
    let doc = capture_component_tree(&tree, &CaptureOptions::default()).unwrap();

    assert_eq!(doc.doc_type, DocumentType::Presentation);
    assert_eq!(doc.title, "Untitled Document");
    let elements = &doc.pages[0].elements;
    assert_eq!(elements[0].class_name.as_deref(), Some("title"));
    assert_eq!(elements[1].kind, ElementKind::Shape);
    assert_eq!(elements[1].attributes.get("r").map(String::as_str), Some("4"));
}

#[test]
fn test_custom_capture_options() {
    let options = CaptureOptions::new()
        .with_private_prefix("data-tpl-")
        .with_default_title("Draft")
        .with_default_paper_size("Letter")
        .with_default_type(DocumentType::Booklet);

    let snapshot = parse_markup(
        r#"<div data-tpl-root><div data-tpl-page data-doc-page="x"><p>Hi</p></div></div>"#,
    )
    .unwrap();
    let doc = capture_markup(&snapshot, &options).unwrap();

    assert_eq!(doc.title, "Draft");
    assert_eq!(doc.paper_size, "Letter");
    assert_eq!(doc.doc_type, DocumentType::Booklet);
    // Under a different prefix, data-doc-* is an ordinary attribute.
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(doc.pages[0].elements[0].content(), Some("Hi"));
}

#[test]
fn test_markup_snapshot_with_shapes_and_attributes() {
    let snapshot = parse_markup(concat!(
        r#"<div data-doc-title="Badge"><div data-doc-page>"#,
        r#"<div class="corner-shape" style="position: absolute; top: 0px; left: 0px"></div>"#,
        r#"<svg data-id="logo"><path d="M0 0"></path></svg>"#,
        r#"<a href="/shop">Shop now</a>"#,
        r#"</div></div>"#
    ))
    .unwrap();

    let doc = capture_markup(&snapshot, &CaptureOptions::default()).unwrap();
    let elements = &doc.pages[0].elements;

    assert_eq!(elements[0].kind, ElementKind::Shape);
    assert!(elements[0].is_absolutely_positioned());
    assert_eq!(elements[0].style().and_then(|s| s.get("top")), Some(&json!(0)));

    assert_eq!(elements[1].kind, ElementKind::Shape);
    assert_eq!(elements[1].attributes.get("data-id").map(String::as_str), Some("logo"));
    assert_eq!(elements[1].children[0].id, "page-0-element-1-0");
    assert_eq!(elements[1].children[0].kind, ElementKind::Shape);

    // A container with a single literal child becomes text.
    assert_eq!(elements[2].kind, ElementKind::Text);
    assert_eq!(elements[2].tag(), "a");
    assert_eq!(elements[2].content(), Some("Shop now"));
    assert_eq!(elements[2].attributes.get("href").map(String::as_str), Some("/shop"));
}

#[test]
fn test_rendered_source_captures_back() {
    let doc = Document::new("Outlet Sale Flyer", DocumentType::Booklet, "Letter")
        .with_page(
            Page::new("page-0")
                .with_background("#fff")
                .with_padding(24.0)
                .with_element(Element::text("page-0-element-0", "h1", "SALE"))
                .with_element(
                    Element::image("page-0-element-1", "hero.png")
                        .with_alt("Hero")
                        .with_class_name("cover"),
                )
                .with_element(Element::container("page-0-element-2").with_child(Element::text(
                    "page-0-element-2-0",
                    "p",
                    "Tom & Jerry {50%} < off",
                ))),
        )
        .with_page(Page::new("page-1").with_padding("1rem 2rem"));

    let source = to_source(&doc, &RenderOptions::compact()).unwrap();
    let snapshot = parse_markup(&source).unwrap();
    assert_eq!(snapshot.tag(), Some("Document"));

    let captured = capture_markup(&snapshot, &CaptureOptions::default());
    assert_eq!(captured, Some(doc));
}

#[test]
fn test_component_snapshot_with_conditional_children() {
    let json = r#"{
        "type": "Document",
        "props": { "data-doc-root": true, "title": "Promo" },
        "children": [
            { "type": "Page", "props": { "data-doc-page": true }, "children": [
                null,
                false,
                { "type": "p", "props": {}, "children": ["Shown"] }
            ]}
        ]
    }"#;

    let doc = pagecodec::capture_component_str(json).unwrap().unwrap();
    assert_eq!(doc.title, "Promo");
    assert_eq!(doc.pages[0].elements.len(), 1);
    assert_eq!(doc.pages[0].elements[0].content(), Some("Shown"));
}
