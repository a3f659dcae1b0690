//! SVG interpretation core for the Wombat converter.
//!
//! # Scope
//!
//! This crate turns a [`wombat_dom::DomTree`] into drawing calls on a
//! cairo-shaped [`Canvas`]:
//! - **Value resolution** ([§ 4 Basic Data Types](https://www.w3.org/TR/SVG11/types.html))
//!   - Lengths with absolute units, colors, coordinate pairs
//! - **Transforms** ([§ 7.6 The 'transform' attribute](https://www.w3.org/TR/SVG11/coords.html#TransformAttribute))
//!   - `scale`, `translate`, `matrix`
//! - **Path data** ([§ 8.3 Path data](https://www.w3.org/TR/SVG11/paths.html#PathData))
//!   - Move, line, horizontal/vertical line, cubic and smooth cubic, close
//! - **Rendering** ([§ 3 Rendering Model](https://www.w3.org/TR/SVG11/render.html))
//!   - Basic shapes, paths, text and `tspan`, `use` references
//!   - Stroke then fill, graphics state scoping per element
//! - **Canvas** backends
//!   - [`Context`] over a pixel [`Surface`], [`RecordingCanvas`] for traces
//!
//! # Not Yet Implemented
//!
//! - `em`, `ex` and percentage lengths (reported as [`SvgError::UnresolvedUnit`])
//! - `rotate`, `skewX`, `skewY` transforms
//! - Elliptical arc, quadratic and `H` path commands
//! - Gradients, patterns, clipping and masking

/// The drawing backend interface and its implementations.
pub mod canvas;
/// Error types.
pub mod error;
/// Path data lexer and interpreter per [§ 8.3](https://www.w3.org/TR/SVG11/paths.html#PathData).
pub mod path;
/// Tree rendering per [§ 3 Rendering Model](https://www.w3.org/TR/SVG11/render.html).
pub mod render;
/// Transform lists per [§ 7.6](https://www.w3.org/TR/SVG11/coords.html#TransformAttribute).
pub mod transform;
/// Attribute value resolution per [§ 4](https://www.w3.org/TR/SVG11/types.html).
pub mod values;
/// viewBox handling per [§ 7.7](https://www.w3.org/TR/SVG11/coords.html#ViewBoxAttribute).
pub mod viewbox;

// Re-exports for convenience
pub use canvas::{
    Canvas, CanvasOp, Context, FillRule, FixedMetrics, FontFace, FontSlant, FontWeight,
    PaintKind, PaintRecord, RecordingCanvas, Surface, TextExtents,
};
pub use error::SvgError;
pub use path::{PathCommand, PathInterpreter, draw_path, parse_path};
pub use render::{DocumentLoader, LoadedDocument, MAX_REFERENCE_DEPTH, Renderer, render_document};
pub use transform::{TransformOp, TransformParser, apply_transform, parse_transform};
pub use values::{
    Color, PointValue, Unit, normalize_number_list, resolve_color, resolve_length, resolve_number,
    resolve_point,
};
pub use viewbox::{ViewBox, apply_viewbox, document_size};
