//! The drawing backend interface.
//!
//! The renderer talks to a cairo-shaped [`Canvas`]: an implicit current path
//! and current point, a current transformation matrix, and a graphics state
//! stack manipulated with [`Canvas::save`] and [`Canvas::restore`]. The
//! current path is not part of the saved state.
//!
//! [`Context`] implements the interface over any pixel [`Surface`];
//! [`RecordingCanvas`] logs every call for tracing and tests.

mod context;
mod recording;

pub use context::{Context, Surface};
pub use recording::{CanvasOp, FixedMetrics, PaintKind, PaintRecord, RecordingCanvas};

use kurbo::{Affine, Point};
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::values::Color;

/// [SVG 1.1 § 11.3 'fill-rule'](https://www.w3.org/TR/SVG11/painting.html#FillRuleProperty)
///
/// "The 'fill-rule' property indicates the algorithm which is to be used to
/// determine what parts of the canvas are included inside the shape."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FillRule {
    /// "This rule determines the 'insideness' of a point on the canvas by
    /// drawing a ray from that point to infinity in any direction and then
    /// examining the places where a segment of the shape crosses the ray."
    #[default]
    NonZero,
    /// Inside when the ray crosses the path an odd number of times.
    EvenOdd,
}

/// [SVG 1.1 § 10.10 'font-style'](https://www.w3.org/TR/SVG11/text.html#FontStyleProperty)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FontSlant {
    /// Upright glyphs.
    #[default]
    Normal,
    /// Cursive glyphs.
    Italic,
    /// Slanted upright glyphs.
    Oblique,
}

/// [SVG 1.1 § 10.10 'font-weight'](https://www.w3.org/TR/SVG11/text.html#FontWeightProperty)
///
/// Only the two keyword weights are distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// A font selection: family name plus slant and weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FontFace {
    /// Family name as written in `font-family`.
    pub family: String,
    /// Slant.
    pub slant: FontSlant,
    /// Weight.
    pub weight: FontWeight,
}

impl Default for FontFace {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            slant: FontSlant::Normal,
            weight: FontWeight::Normal,
        }
    }
}

/// Ink and advance metrics of a string, in user units.
///
/// Same layout as cairo's `cairo_text_extents_t`: bearings are measured from
/// the text origin on the baseline, y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TextExtents {
    /// Distance from the origin to the left edge of the ink.
    pub x_bearing: f64,
    /// Distance from the origin to the top edge of the ink (negative above
    /// the baseline).
    pub y_bearing: f64,
    /// Ink width.
    pub width: f64,
    /// Ink height.
    pub height: f64,
    /// Horizontal pen advance.
    pub x_advance: f64,
    /// Vertical pen advance.
    pub y_advance: f64,
}

/// A 2D vector drawing backend with cairo semantics.
///
/// Coordinates passed in are user space coordinates, mapped through the
/// current transformation matrix when they are added to the path.
pub trait Canvas {
    /// Push a copy of the graphics state.
    fn save(&mut self);
    /// Pop the graphics state pushed by the matching [`Canvas::save`].
    fn restore(&mut self);

    /// Scale user space.
    fn scale(&mut self, sx: f64, sy: f64);
    /// Translate user space.
    fn translate(&mut self, tx: f64, ty: f64);
    /// Replace the current transformation matrix.
    fn set_matrix(&mut self, matrix: Affine);

    /// Start a new sub-path at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);
    /// Start a new sub-path relative to the current point.
    fn rel_move_to(&mut self, dx: f64, dy: f64);
    /// Add a line to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);
    /// Add a line relative to the current point.
    fn rel_line_to(&mut self, dx: f64, dy: f64);
    /// Add a cubic Bézier curve.
    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64);
    /// Add a cubic Bézier curve with all points relative to the current point.
    fn rel_curve_to(&mut self, dx1: f64, dy1: f64, dx2: f64, dy2: f64, dx3: f64, dy3: f64);
    /// Close the current sub-path; the current point returns to its start.
    fn close_path(&mut self);
    /// Forget the current point without closing, so the next segment starts
    /// a new sub-path.
    fn new_sub_path(&mut self);
    /// Add a circular arc, joined to the current point by a line if there is one.
    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64);
    /// The current point in user space, the origin if there is none.
    fn current_point(&self) -> Point;

    /// Set the stroke width in user units.
    fn set_line_width(&mut self, width: f64);
    /// Set the paint used by stroke, fill and text.
    fn set_source(&mut self, color: Color);
    /// Set the fill rule.
    fn set_fill_rule(&mut self, rule: FillRule);
    /// Stroke the current path and keep it.
    fn stroke_preserve(&mut self);
    /// Fill the current path and clear it.
    fn fill(&mut self);

    /// Select the font used by text operations.
    fn select_font_face(&mut self, face: FontFace);
    /// Set the font size in user units.
    fn set_font_size(&mut self, size: f64);
    /// Measure `text` with the current font.
    fn text_extents(&self, text: &str) -> TextExtents;
    /// Paint `text` at the current point and advance it.
    fn show_text(&mut self, text: &str);
    /// Add the outlines of `text` at the current point to the path and
    /// advance it.
    fn text_path(&mut self, text: &str);
}
