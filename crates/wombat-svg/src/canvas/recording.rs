//! A canvas that records every call.
//!
//! Used by `wombat --trace` and by tests that assert on the exact sequence
//! of drawing operations a document produces. Geometry state is still
//! tracked by a real [`Context`] so that current point queries answer
//! correctly.

use std::convert::Infallible;

use kurbo::{Affine, BezPath, Point, Rect, Shape};
use serde::Serialize;

use super::{Canvas, Context, FillRule, FontFace, Surface, TextExtents};
use crate::values::Color;

/// Advance of every glyph in [`FixedMetrics`], as a fraction of the font size.
const ADVANCE_RATIO: f64 = 0.6;

/// Ascent of every glyph in [`FixedMetrics`], as a fraction of the font size.
const ASCENT_RATIO: f64 = 0.7;

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CanvasOp {
    /// [`Canvas::save`].
    Save,
    /// [`Canvas::restore`].
    Restore,
    /// [`Canvas::scale`].
    Scale {
        /// Horizontal factor.
        sx: f64,
        /// Vertical factor.
        sy: f64,
    },
    /// [`Canvas::translate`].
    Translate {
        /// Horizontal offset.
        tx: f64,
        /// Vertical offset.
        ty: f64,
    },
    /// [`Canvas::set_matrix`].
    SetMatrix {
        /// Coefficients `[a, b, c, d, e, f]`.
        matrix: [f64; 6],
    },
    /// [`Canvas::move_to`].
    MoveTo {
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// [`Canvas::rel_move_to`].
    RelMoveTo {
        /// Offset x.
        dx: f64,
        /// Offset y.
        dy: f64,
    },
    /// [`Canvas::line_to`].
    LineTo {
        /// Target x.
        x: f64,
        /// Target y.
        y: f64,
    },
    /// [`Canvas::rel_line_to`].
    RelLineTo {
        /// Offset x.
        dx: f64,
        /// Offset y.
        dy: f64,
    },
    /// [`Canvas::curve_to`].
    CurveTo {
        /// First control point.
        ctrl1: (f64, f64),
        /// Second control point.
        ctrl2: (f64, f64),
        /// End point.
        to: (f64, f64),
    },
    /// [`Canvas::rel_curve_to`].
    RelCurveTo {
        /// First control point offset.
        ctrl1: (f64, f64),
        /// Second control point offset.
        ctrl2: (f64, f64),
        /// End point offset.
        to: (f64, f64),
    },
    /// [`Canvas::close_path`].
    ClosePath,
    /// [`Canvas::new_sub_path`].
    NewSubPath,
    /// [`Canvas::arc`].
    Arc {
        /// Center x.
        xc: f64,
        /// Center y.
        yc: f64,
        /// Radius.
        radius: f64,
        /// Start angle in radians.
        angle1: f64,
        /// End angle in radians.
        angle2: f64,
    },
    /// [`Canvas::set_line_width`].
    SetLineWidth {
        /// Width in user units.
        width: f64,
    },
    /// [`Canvas::set_source`].
    SetSource {
        /// Paint color.
        color: Color,
    },
    /// [`Canvas::set_fill_rule`].
    SetFillRule {
        /// Fill rule.
        rule: FillRule,
    },
    /// [`Canvas::stroke_preserve`].
    StrokePreserve,
    /// [`Canvas::fill`].
    Fill,
    /// [`Canvas::select_font_face`].
    SelectFontFace {
        /// Selected face.
        face: FontFace,
    },
    /// [`Canvas::set_font_size`].
    SetFontSize {
        /// Size in user units.
        size: f64,
    },
    /// [`Canvas::show_text`].
    ShowText {
        /// The painted string.
        text: String,
    },
    /// [`Canvas::text_path`].
    TextPath {
        /// The traced string.
        text: String,
    },
}

/// Which paint operation reached the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaintKind {
    /// A fill, including painted text.
    Fill,
    /// A stroke.
    Stroke,
}

/// A paint operation that reached the [`FixedMetrics`] surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaintRecord {
    /// Fill or stroke.
    pub kind: PaintKind,
    /// Paint color.
    pub color: Color,
    /// Device space bounds of the painted path, `[x0, y0, x1, y1]`.
    pub bounds: [f64; 4],
    /// Pen width in user units, `0` for fills.
    pub width: f64,
}

/// A surface with no pixels and deterministic monospace font metrics.
///
/// Every glyph advances `0.6 × size` and has a box outline rising
/// `0.7 × size` above the baseline.
#[derive(Debug, Default)]
pub struct FixedMetrics {
    paints: Vec<PaintRecord>,
}

impl FixedMetrics {
    /// Paint operations received so far.
    #[must_use]
    pub fn paints(&self) -> &[PaintRecord] {
        &self.paints
    }

    fn record(&mut self, kind: PaintKind, color: Color, bounds: Rect, width: f64) {
        self.paints.push(PaintRecord {
            kind,
            color,
            bounds: [bounds.x0, bounds.y0, bounds.x1, bounds.y1],
            width,
        });
    }
}

impl Surface for FixedMetrics {
    type Error = Infallible;

    fn fill(&mut self, path: &BezPath, color: Color, _rule: FillRule) {
        self.record(PaintKind::Fill, color, path.bounding_box(), 0.0);
    }

    fn stroke(&mut self, path: &BezPath, color: Color, width: f64, transform: Affine) {
        let device = transform * path.clone();
        self.record(PaintKind::Stroke, color, device.bounding_box(), width);
    }

    fn text_extents(&self, _face: &FontFace, size: f64, text: &str) -> TextExtents {
        if text.is_empty() {
            return TextExtents::default();
        }
        let glyphs = text.chars().count() as f64;
        TextExtents {
            x_bearing: 0.0,
            y_bearing: -ASCENT_RATIO * size,
            width: glyphs * ADVANCE_RATIO * size,
            height: ASCENT_RATIO * size,
            x_advance: glyphs * ADVANCE_RATIO * size,
            y_advance: 0.0,
        }
    }

    fn text_outline(&self, _face: &FontFace, size: f64, text: &str) -> BezPath {
        let mut outline = BezPath::new();
        for (index, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let left = index as f64 * ADVANCE_RATIO * size;
            let glyph = Rect::new(left, -ASCENT_RATIO * size, left + ADVANCE_RATIO * size, 0.0);
            outline.extend(glyph.path_elements(0.1));
        }
        outline
    }

    fn finish(self) -> Result<Vec<u8>, Self::Error> {
        Ok(Vec::new())
    }
}

/// A [`Canvas`] that logs every call as a [`CanvasOp`].
#[derive(Debug)]
pub struct RecordingCanvas {
    ops: Vec<CanvasOp>,
    context: Context<FixedMetrics>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    /// Create an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            context: Context::new(FixedMetrics::default()),
        }
    }

    /// The recorded calls, in order.
    #[must_use]
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Consume the recording and return the calls.
    #[must_use]
    pub fn into_ops(self) -> Vec<CanvasOp> {
        self.ops
    }

    /// Paint operations that produced visible output.
    #[must_use]
    pub fn paints(&self) -> &[PaintRecord] {
        self.context.surface().paints()
    }

    /// The current transformation matrix.
    #[must_use]
    pub const fn matrix(&self) -> Affine {
        self.context.matrix()
    }

    /// Number of unmatched saves.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.context.depth()
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.ops.push(CanvasOp::Save);
        self.context.save();
    }

    fn restore(&mut self) {
        self.ops.push(CanvasOp::Restore);
        self.context.restore();
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.ops.push(CanvasOp::Scale { sx, sy });
        self.context.scale(sx, sy);
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.ops.push(CanvasOp::Translate { tx, ty });
        self.context.translate(tx, ty);
    }

    fn set_matrix(&mut self, matrix: Affine) {
        self.ops.push(CanvasOp::SetMatrix {
            matrix: matrix.as_coeffs(),
        });
        self.context.set_matrix(matrix);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(CanvasOp::MoveTo { x, y });
        self.context.move_to(x, y);
    }

    fn rel_move_to(&mut self, dx: f64, dy: f64) {
        self.ops.push(CanvasOp::RelMoveTo { dx, dy });
        self.context.rel_move_to(dx, dy);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(CanvasOp::LineTo { x, y });
        self.context.line_to(x, y);
    }

    fn rel_line_to(&mut self, dx: f64, dy: f64) {
        self.ops.push(CanvasOp::RelLineTo { dx, dy });
        self.context.rel_line_to(dx, dy);
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.ops.push(CanvasOp::CurveTo {
            ctrl1: (x1, y1),
            ctrl2: (x2, y2),
            to: (x3, y3),
        });
        self.context.curve_to(x1, y1, x2, y2, x3, y3);
    }

    fn rel_curve_to(&mut self, dx1: f64, dy1: f64, dx2: f64, dy2: f64, dx3: f64, dy3: f64) {
        self.ops.push(CanvasOp::RelCurveTo {
            ctrl1: (dx1, dy1),
            ctrl2: (dx2, dy2),
            to: (dx3, dy3),
        });
        self.context.rel_curve_to(dx1, dy1, dx2, dy2, dx3, dy3);
    }

    fn close_path(&mut self) {
        self.ops.push(CanvasOp::ClosePath);
        self.context.close_path();
    }

    fn new_sub_path(&mut self) {
        self.ops.push(CanvasOp::NewSubPath);
        self.context.new_sub_path();
    }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        self.ops.push(CanvasOp::Arc {
            xc,
            yc,
            radius,
            angle1,
            angle2,
        });
        self.context.arc(xc, yc, radius, angle1, angle2);
    }

    fn current_point(&self) -> Point {
        self.context.current_point()
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(CanvasOp::SetLineWidth { width });
        self.context.set_line_width(width);
    }

    fn set_source(&mut self, color: Color) {
        self.ops.push(CanvasOp::SetSource { color });
        self.context.set_source(color);
    }

    fn set_fill_rule(&mut self, rule: FillRule) {
        self.ops.push(CanvasOp::SetFillRule { rule });
        self.context.set_fill_rule(rule);
    }

    fn stroke_preserve(&mut self) {
        self.ops.push(CanvasOp::StrokePreserve);
        self.context.stroke_preserve();
    }

    fn fill(&mut self) {
        self.ops.push(CanvasOp::Fill);
        self.context.fill();
    }

    fn select_font_face(&mut self, face: FontFace) {
        self.ops.push(CanvasOp::SelectFontFace { face: face.clone() });
        self.context.select_font_face(face);
    }

    fn set_font_size(&mut self, size: f64) {
        self.ops.push(CanvasOp::SetFontSize { size });
        self.context.set_font_size(size);
    }

    fn text_extents(&self, text: &str) -> TextExtents {
        self.context.text_extents(text)
    }

    fn show_text(&mut self, text: &str) {
        self.ops.push(CanvasOp::ShowText {
            text: text.to_string(),
        });
        self.context.show_text(text);
    }

    fn text_path(&mut self, text: &str) {
        self.ops.push(CanvasOp::TextPath {
            text: text.to_string(),
        });
        self.context.text_path(text);
    }
}
