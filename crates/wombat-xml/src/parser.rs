//! Tree construction from XML source.
//!
//! [SVG 1.1 § 1.2 SVG MIME type, file name extension and Macintosh file type](https://www.w3.org/TR/SVG11/intro.html#MIMEType)
//!
//! SVG is an XML grammar, so the document is parsed by `roxmltree` and the
//! resulting element tree is copied into a [`DomTree`] with attributes
//! normalized on the way.

use roxmltree::{Document, ParsingOptions};
use thiserror::Error;
use wombat_common::warning::warn_once;
use wombat_dom::{AttributesMap, DomTree, ElementData, NodeId};

use crate::style::{expand_style, inherited_from, seeded_from};

/// Failure to turn source text into a node tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source is not well-formed XML.
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    /// The source bytes are not UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    /// `ParseOptions::element_id` names no element of the document.
    #[error("no element with id '{0}'")]
    ElementNotFound(String),
}

/// Options controlling tree construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions<'a> {
    /// Attributes of the referencing `use` element. The document element
    /// takes all of them except `transform` and `opacity`; its own
    /// attributes win.
    pub inherited: Option<&'a AttributesMap>,
    /// Use the element with this `id` as the document element.
    pub element_id: Option<&'a str>,
}

/// Parse SVG source text into a node tree.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] if the text is not well-formed XML.
pub fn parse_svg(text: &str) -> Result<DomTree, ParseError> {
    parse_svg_with(text, &ParseOptions::default())
}

/// Parse SVG source bytes into a node tree.
///
/// # Errors
///
/// Returns [`ParseError::Encoding`] for non UTF-8 input, otherwise as
/// [`parse_svg_with`].
pub fn parse_svg_bytes(bytes: &[u8], options: &ParseOptions<'_>) -> Result<DomTree, ParseError> {
    parse_svg_with(std::str::from_utf8(bytes)?, options)
}

/// Parse SVG source text into a node tree with explicit options.
///
/// # Errors
///
/// Returns [`ParseError::Xml`] if the text is not well-formed XML and
/// [`ParseError::ElementNotFound`] if `options.element_id` matches nothing.
pub fn parse_svg_with(text: &str, options: &ParseOptions<'_>) -> Result<DomTree, ParseError> {
    // Real-world SVG files routinely carry a DOCTYPE.
    let parsing = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(text, parsing)?;

    let root = match options.element_id {
        Some(id) => document
            .descendants()
            .find(|node| node.is_element() && node.attribute("id") == Some(id))
            .ok_or_else(|| ParseError::ElementNotFound(id.to_string()))?,
        None => document.root_element(),
    };

    let seed = options.inherited.map(seeded_from).unwrap_or_default();
    let mut tree = DomTree::new(element_data(root, seed));
    build_children(&mut tree, NodeId::ROOT, root);

    log::debug!(
        "[Wombat XML] parsed <{}> with {} nodes",
        root.tag_name().name(),
        tree.len()
    );
    Ok(tree)
}

/// Build the element data of `node`: inherited attributes first, then the
/// element's own attributes, then its `style` declarations.
fn element_data(node: roxmltree::Node<'_, '_>, inherited: AttributesMap) -> ElementData {
    let mut element = ElementData::new(node.tag_name().name());
    element.attrs = inherited;

    for attribute in node.attributes() {
        let key = match attribute.namespace() {
            Some(namespace) => format!("{{{namespace}}}{}", attribute.name()),
            None => attribute.name().to_string(),
        };
        let _ = element.attrs.insert(key, attribute.value().to_string());
    }

    if let Some(style) = node.attribute("style") {
        expand_style(style, &mut element.attrs);
    }

    element.text = node.text().map(str::to_string);
    element
}

/// Whether tail text after child elements is rendered content.
///
/// [SVG 1.1 § 10.2](https://www.w3.org/TR/SVG11/text.html#Introduction)
/// "Text that is to be rendered as part of an SVG document fragment is
/// specified using the 'text' element."
fn keeps_tail_text(tag_name: &str) -> bool {
    matches!(tag_name, "text" | "textPath")
}

/// Copy the element children of `node` below `parent`.
fn build_children(tree: &mut DomTree, parent: NodeId, node: roxmltree::Node<'_, '_>) {
    let Some(parent_element) = tree.element(parent) else {
        return;
    };
    let inherited = inherited_from(&parent_element.attrs);
    let text_content = keeps_tail_text(&parent_element.tag_name);

    for child in node.children().filter(roxmltree::Node::is_element) {
        if child.tag_name().name() == "style" {
            warn_once("XML", "<style> element stylesheets are ignored");
            continue;
        }

        let id = tree.append_element(parent, element_data(child, inherited.clone()));
        build_children(tree, id, child);

        if text_content && let Some(tail) = child.tail().filter(|tail| !tail.is_empty()) {
            let mut anonymous = ElementData::new("tspan").with_text(tail);
            anonymous.attrs = inherited.clone();
            let _ = tree.append_element(parent, anonymous);
        }
    }
}
