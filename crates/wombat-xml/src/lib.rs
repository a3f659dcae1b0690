//! SVG document parser for the Wombat converter.
//!
//! # Scope
//!
//! This crate turns SVG source text into a [`wombat_dom::DomTree`]:
//! - **XML parsing** via `roxmltree` (DTDs allowed, entities expanded)
//! - **Namespaces** - tags reduced to their local name, namespaced attributes
//!   keyed as `{namespace-uri}name`
//! - **Style attributes** - `style` declarations expanded into attributes
//! - **Inheritance** - inheritable presentation attributes copied down the tree,
//!   referencing attributes seeded into a referenced document element
//! - **Mixed text content** - tail text inside `text` becomes anonymous `tspan`s
//!
//! # Not Yet Implemented
//!
//! - `<style>` element stylesheets and selector matching
//! - `xml:space` handling

mod parser;
mod style;

pub use parser::{ParseError, ParseOptions, parse_svg, parse_svg_bytes, parse_svg_with};
pub use style::{INHERITED_ATTRIBUTES, NOT_SEEDED_ATTRIBUTES, expand_style};
pub use wombat_dom::XLINK_HREF;
