//! Element classification.
//!
//! Rules are tried in order and the first match decides the kind. Tag
//! comparisons ignore ASCII case.

use crate::model::ElementKind;

/// Tags captured as images.
pub const IMAGE_TAGS: &[&str] = &["img"];

/// Tags captured as text.
pub const TEXT_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "span"];

/// Vector tags captured as shapes.
pub const SHAPE_TAGS: &[&str] = &[
    "svg", "rect", "circle", "ellipse", "line", "polygon", "polyline", "path",
];

/// What a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct NodeFacts<'a> {
    /// Tag or component type name
    pub tag: &'a str,

    /// Class list, if any
    pub class_name: Option<&'a str>,

    /// Whether the node carries the reserved shape marker
    pub shape_marker: bool,
}

/// One entry of the classification table.
pub struct ClassificationRule {
    /// Rule name for logs
    pub name: &'static str,

    /// Kind assigned on match
    pub kind: ElementKind,

    /// Predicate
    pub matches: fn(&NodeFacts<'_>) -> bool,
}

/// Ordered classification table. Nodes matching nothing are containers.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "image-tag",
        kind: ElementKind::Image,
        matches: is_image_tag,
    },
    ClassificationRule {
        name: "text-tag",
        kind: ElementKind::Text,
        matches: is_text_tag,
    },
    ClassificationRule {
        name: "decorative-shape",
        kind: ElementKind::Shape,
        matches: is_shape,
    },
];

/// Classify a node.
pub fn classify(facts: &NodeFacts<'_>) -> ElementKind {
    match CLASSIFICATION_RULES.iter().find(|rule| (rule.matches)(facts)) {
        Some(rule) => {
            log::trace!("<{}> matched rule {}", facts.tag, rule.name);
            rule.kind
        }
        None => ElementKind::Container,
    }
}

fn tag_in(tag: &str, set: &[&str]) -> bool {
    set.iter().any(|candidate| candidate.eq_ignore_ascii_case(tag))
}

fn is_image_tag(facts: &NodeFacts<'_>) -> bool {
    tag_in(facts.tag, IMAGE_TAGS)
}

fn is_text_tag(facts: &NodeFacts<'_>) -> bool {
    tag_in(facts.tag, TEXT_TAGS)
}

fn is_shape(facts: &NodeFacts<'_>) -> bool {
    let shape_class = facts.class_name.is_some_and(|classes| {
        classes
            .split_whitespace()
            .any(|class| class.to_ascii_lowercase().contains("shape"))
    });
    shape_class || facts.shape_marker || tag_in(facts.tag, SHAPE_TAGS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(tag: &str) -> NodeFacts<'_> {
        NodeFacts {
            tag,
            class_name: None,
            shape_marker: false,
        }
    }

    #[test]
    fn test_tag_rules() {
        assert_eq!(classify(&facts("img")), ElementKind::Image);
        assert_eq!(classify(&facts("IMG")), ElementKind::Image);
        assert_eq!(classify(&facts("h3")), ElementKind::Text);
        assert_eq!(classify(&facts("span")), ElementKind::Text);
        assert_eq!(classify(&facts("circle")), ElementKind::Shape);
        assert_eq!(classify(&facts("section")), ElementKind::Container);
    }

    #[test]
    fn test_shape_class_and_marker() {
        let by_class = NodeFacts {
            class_name: Some("card decorative-Shape"),
            ..facts("div")
        };
        assert_eq!(classify(&by_class), ElementKind::Shape);

        let by_marker = NodeFacts {
            shape_marker: true,
            ..facts("div")
        };
        assert_eq!(classify(&by_marker), ElementKind::Shape);
    }

    #[test]
    fn test_first_match_wins() {
        // A shaped paragraph is still text.
        let shaped_text = NodeFacts {
            class_name: Some("shape"),
            ..facts("p")
        };
        assert_eq!(classify(&shaped_text), ElementKind::Text);
    }
}
