//! Tests for SVG tree construction.

use wombat_dom::{AttributesMap, DomTree, NodeId};
use wombat_xml::{ParseError, ParseOptions, XLINK_HREF, parse_svg, parse_svg_bytes, parse_svg_with};

/// Helper to parse a document that must be well-formed.
fn parse(text: &str) -> DomTree {
    parse_svg(text).expect("document should parse")
}

/// Tag names of the children of `id`, in order.
fn child_tags(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|&child| tree.element(child).unwrap().tag_name.clone())
        .collect()
}

#[test]
fn test_root_is_document_element() {
    let tree = parse(r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"/>"#);
    let root = tree.element(tree.root()).unwrap();
    assert_eq!(root.tag_name, "svg");
    assert_eq!(root.get("width"), Some("100"));
    assert_eq!(root.get("height"), Some("50"));
}

#[test]
fn test_children_in_document_order() {
    let tree = parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
            <circle r="1"/>
            <!-- comment -->
            <g><line/></g>
            <path d="M0 0"/>
        </svg>"#,
    );
    assert_eq!(child_tags(&tree, tree.root()), ["circle", "g", "path"]);
    let g = tree.children(tree.root())[1];
    assert_eq!(child_tags(&tree, g), ["line"]);
}

#[test]
fn test_doctype_is_accepted() {
    let tree = parse(
        r#"<?xml version="1.0"?>
        <!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
        <svg xmlns="http://www.w3.org/2000/svg"/>"#,
    );
    assert_eq!(tree.element(tree.root()).unwrap().tag_name, "svg");
}

#[test]
fn test_xlink_href_uses_namespace_key() {
    let tree = parse(
        r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
            <use xlink:href="other.svg#shape" x="3"/>
        </svg>"##,
    );
    let use_node = tree.element(tree.children(tree.root())[0]).unwrap();
    assert_eq!(use_node.tag_name, "use");
    assert_eq!(use_node.get(XLINK_HREF), Some("other.svg#shape"));
    assert_eq!(use_node.get("x"), Some("3"));
}

#[test]
fn test_style_overrides_attributes() {
    let tree = parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
            <rect fill="blue" style="fill: red; stroke-width :3 ; bogus"/>
        </svg>"#,
    );
    let rect = tree.element(tree.children(tree.root())[0]).unwrap();
    assert_eq!(rect.get("fill"), Some("red"));
    assert_eq!(rect.get("stroke-width"), Some("3"));
    assert!(!rect.has("bogus"));
}

#[test]
fn test_presentation_attributes_inherit() {
    let tree = parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
            <g fill="red" stroke="blue" transform="scale(2)" opacity="0.5" x="7">
                <circle r="1" stroke="green"/>
            </g>
        </svg>"#,
    );
    let g = tree.children(tree.root())[0];
    let circle = tree.element(tree.children(g)[0]).unwrap();
    assert_eq!(circle.get("fill"), Some("red"));
    assert_eq!(circle.get("stroke"), Some("green"));
    assert!(!circle.has("transform"));
    assert!(!circle.has("opacity"));
    assert!(!circle.has("x"));
}

#[test]
fn test_inherited_seed_applies_to_root() {
    let mut inherited = AttributesMap::new();
    let _ = inherited.insert("fill".to_string(), "purple".to_string());
    let _ = inherited.insert("width".to_string(), "100".to_string());
    let _ = inherited.insert("height".to_string(), "80".to_string());
    let _ = inherited.insert("transform".to_string(), "scale(2)".to_string());
    let _ = inherited.insert("opacity".to_string(), "0.5".to_string());
    let options = ParseOptions {
        inherited: Some(&inherited),
        element_id: None,
    };
    let tree = parse_svg_with(
        r#"<svg xmlns="http://www.w3.org/2000/svg" height="40"><g/></svg>"#,
        &options,
    )
    .unwrap();

    let root = tree.element(tree.root()).unwrap();
    assert_eq!(root.get("fill"), Some("purple"));
    assert_eq!(root.get("width"), Some("100"));
    assert_eq!(root.get("height"), Some("40"));
    assert!(!root.has("transform"));
    assert!(!root.has("opacity"));
    let g = tree.element(tree.children(tree.root())[0]).unwrap();
    assert_eq!(g.get("fill"), Some("purple"));
    assert!(!g.has("width"));
}

#[test]
fn test_text_content_and_tail_tspans() {
    let tree = parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><text font-size="20">Hello <tspan>big</tspan> world</text></svg>"#,
    );
    let text_id = tree.children(tree.root())[0];
    let text = tree.element(text_id).unwrap();
    assert_eq!(text.text.as_deref(), Some("Hello "));
    assert_eq!(child_tags(&tree, text_id), ["tspan", "tspan"]);

    let children = tree.children(text_id);
    let explicit = tree.element(children[0]).unwrap();
    assert_eq!(explicit.text.as_deref(), Some("big"));
    let anonymous = tree.element(children[1]).unwrap();
    assert_eq!(anonymous.text.as_deref(), Some(" world"));
    assert_eq!(anonymous.get("font-size"), Some("20"));
}

#[test]
fn test_tail_text_outside_text_is_dropped() {
    let tree = parse(r#"<svg xmlns="http://www.w3.org/2000/svg"><g><rect/> stray </g></svg>"#);
    let g = tree.children(tree.root())[0];
    assert_eq!(child_tags(&tree, g), ["rect"]);
}

#[test]
fn test_style_element_is_skipped() {
    let tree = parse(
        r#"<svg xmlns="http://www.w3.org/2000/svg"><style>rect { fill: red }</style><rect/></svg>"#,
    );
    assert_eq!(child_tags(&tree, tree.root()), ["rect"]);
}

#[test]
fn test_element_id_selects_root() {
    let source = r#"<svg xmlns="http://www.w3.org/2000/svg">
        <g id="first"><circle r="1"/></g>
        <g id="second"><line/><path/></g>
    </svg>"#;
    let options = ParseOptions {
        inherited: None,
        element_id: Some("second"),
    };
    let tree = parse_svg_with(source, &options).unwrap();
    let root = tree.element(tree.root()).unwrap();
    assert_eq!(root.id(), Some("second"));
    assert_eq!(child_tags(&tree, tree.root()), ["line", "path"]);
}

#[test]
fn test_missing_element_id_is_error() {
    let options = ParseOptions {
        inherited: None,
        element_id: Some("nope"),
    };
    let result = parse_svg_with(r#"<svg xmlns="http://www.w3.org/2000/svg"/>"#, &options);
    assert!(matches!(result, Err(ParseError::ElementNotFound(id)) if id == "nope"));
}

#[test]
fn test_malformed_xml_is_error() {
    assert!(matches!(parse_svg("<svg><g></svg>"), Err(ParseError::Xml(_))));
}

#[test]
fn test_invalid_utf8_is_error() {
    let result = parse_svg_bytes(&[b'<', 0xff, 0xfe], &ParseOptions::default());
    assert!(matches!(result, Err(ParseError::Encoding(_))));
}
