//! A [`Canvas`] keeping cairo graphics state over a pluggable pixel surface.

use std::f64::consts::TAU;

use kurbo::{Affine, Arc, BezPath, PathEl, Point, Vec2};
use wombat_common::warning::warn_once;

use super::{Canvas, FillRule, FontFace, TextExtents};
use crate::values::Color;

/// Flattening tolerance for arcs, in device units.
const ARC_TOLERANCE: f64 = 0.1;

/// A pixel target the [`Context`] paints into.
///
/// Paths handed to a surface are in device space unless stated otherwise;
/// paint colors carry straight alpha and are always visible.
pub trait Surface {
    /// Error raised when the surface is finalized.
    type Error;

    /// Fill `path` with `color`.
    fn fill(&mut self, path: &BezPath, color: Color, rule: FillRule);

    /// Stroke `path`, given in user space, with a pen `width` user units wide,
    /// then map the result to device space with `transform`.
    fn stroke(&mut self, path: &BezPath, color: Color, width: f64, transform: Affine);

    /// Measure `text` set in `face` at `size` user units.
    fn text_extents(&self, face: &FontFace, size: f64, text: &str) -> TextExtents;

    /// Glyph outlines of `text` with the origin on the baseline, in user
    /// units, y growing downwards.
    fn text_outline(&self, face: &FontFace, size: f64, text: &str) -> BezPath;

    /// Finalize the surface and return its encoded bytes.
    ///
    /// # Errors
    ///
    /// Any error of the surface's encoder.
    fn finish(self) -> Result<Vec<u8>, Self::Error>;
}

/// The state [`Canvas::save`] pushes.
#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: Affine,
    line_width: f64,
    source: Color,
    fill_rule: FillRule,
    font: FontFace,
    font_size: f64,
}

impl Default for GraphicsState {
    /// cairo's initial state.
    fn default() -> Self {
        Self {
            ctm: Affine::IDENTITY,
            line_width: 2.0,
            source: Color::BLACK,
            fill_rule: FillRule::NonZero,
            font: FontFace::default(),
            font_size: 10.0,
        }
    }
}

/// Path, transform and paint state over a [`Surface`].
///
/// The current path is kept in device space so that transform changes in
/// the middle of a path only affect the segments added afterwards.
/// Consecutive moves collapse into the last one.
#[derive(Debug)]
pub struct Context<S> {
    surface: S,
    state: GraphicsState,
    stack: Vec<GraphicsState>,
    /// Current path, device space.
    path: Vec<PathEl>,
    /// Current point, device space.
    current: Option<Point>,
    /// Start of the current sub-path, device space.
    subpath_start: Point,
    /// A `close_path` was the last element; the next segment needs a move.
    reopen: bool,
}

impl<S: Surface> Context<S> {
    /// Create a context with cairo's initial state over `surface`.
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: GraphicsState::default(),
            stack: Vec::new(),
            path: Vec::new(),
            current: None,
            subpath_start: Point::ORIGIN,
            reopen: false,
        }
    }

    /// The surface being painted.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// The current transformation matrix.
    pub const fn matrix(&self) -> Affine {
        self.state.ctm
    }

    /// Number of unmatched [`Canvas::save`] calls.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The current path, in device space.
    pub fn path(&self) -> &[PathEl] {
        &self.path
    }

    /// Finalize the surface and return its bytes.
    ///
    /// # Errors
    ///
    /// Any error of [`Surface::finish`].
    pub fn finish(self) -> Result<Vec<u8>, S::Error> {
        if !self.stack.is_empty() {
            log::debug!("[Wombat Canvas] finishing with {} unrestored saves", self.stack.len());
        }
        self.surface.finish()
    }

    fn to_device(&self, x: f64, y: f64) -> Point {
        self.state.ctm * Point::new(x, y)
    }

    /// Re-open the last sub-path after a close.
    fn ensure_open(&mut self) {
        if self.reopen {
            self.path.push(PathEl::MoveTo(self.subpath_start));
            self.reopen = false;
        }
    }

    /// Whether the path has anything to paint besides moves.
    fn has_segments(&self) -> bool {
        self.path
            .iter()
            .any(|element| !matches!(element, PathEl::MoveTo(_)))
    }

    /// The user space point `(dx, dy)` away from the current point.
    fn relative(&self, dx: f64, dy: f64) -> Point {
        self.current_point() + Vec2::new(dx, dy)
    }

    fn advance(&mut self, extents: &TextExtents) {
        let end = self.relative(extents.x_advance, extents.y_advance);
        self.current = Some(self.to_device(end.x, end.y));
    }

    /// Glyph outlines of `text` at the current point, device space.
    fn text_outline_at_current(&self, text: &str) -> BezPath {
        let origin = self.current_point();
        let outline = self
            .surface
            .text_outline(&self.state.font, self.state.font_size, text);
        self.state.ctm * Affine::translate(origin.to_vec2()) * outline
    }
}

impl<S: Surface> Canvas for Context<S> {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => warn_once("Canvas", "restore without matching save"),
        }
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.state.ctm = self.state.ctm * Affine::scale_non_uniform(sx, sy);
    }

    fn translate(&mut self, tx: f64, ty: f64) {
        self.state.ctm = self.state.ctm * Affine::translate((tx, ty));
    }

    fn set_matrix(&mut self, matrix: Affine) {
        self.state.ctm = matrix;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let point = self.to_device(x, y);
        if matches!(self.path.last(), Some(PathEl::MoveTo(_))) {
            let _ = self.path.pop();
        }
        self.path.push(PathEl::MoveTo(point));
        self.current = Some(point);
        self.subpath_start = point;
        self.reopen = false;
    }

    fn rel_move_to(&mut self, dx: f64, dy: f64) {
        let target = self.relative(dx, dy);
        self.move_to(target.x, target.y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.current.is_none() {
            self.move_to(x, y);
            return;
        }
        self.ensure_open();
        let point = self.to_device(x, y);
        self.path.push(PathEl::LineTo(point));
        self.current = Some(point);
    }

    fn rel_line_to(&mut self, dx: f64, dy: f64) {
        let target = self.relative(dx, dy);
        self.line_to(target.x, target.y);
    }

    fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        if self.current.is_none() {
            self.move_to(x1, y1);
        }
        self.ensure_open();
        let (p1, p2, end) = (
            self.to_device(x1, y1),
            self.to_device(x2, y2),
            self.to_device(x3, y3),
        );
        self.path.push(PathEl::CurveTo(p1, p2, end));
        self.current = Some(end);
    }

    fn rel_curve_to(&mut self, dx1: f64, dy1: f64, dx2: f64, dy2: f64, dx3: f64, dy3: f64) {
        let origin = self.current_point();
        self.curve_to(
            origin.x + dx1,
            origin.y + dy1,
            origin.x + dx2,
            origin.y + dy2,
            origin.x + dx3,
            origin.y + dy3,
        );
    }

    fn close_path(&mut self) {
        if self.current.is_none() {
            return;
        }
        self.path.push(PathEl::ClosePath);
        self.current = Some(self.subpath_start);
        self.reopen = true;
    }

    fn new_sub_path(&mut self) {
        self.current = None;
        self.reopen = false;
    }

    fn arc(&mut self, xc: f64, yc: f64, radius: f64, angle1: f64, angle2: f64) {
        let mut sweep = angle2 - angle1;
        while sweep < 0.0 {
            sweep += TAU;
        }
        let start = Point::new(xc + radius * angle1.cos(), yc + radius * angle1.sin());
        self.line_to(start.x, start.y);

        let arc = Arc {
            center: Point::new(xc, yc),
            radii: Vec2::new(radius, radius),
            start_angle: angle1,
            sweep_angle: sweep,
            x_rotation: 0.0,
        };
        let ctm = self.state.ctm;
        let mut end = self.current;
        for element in arc.append_iter(ARC_TOLERANCE) {
            let element = ctm * element;
            if let PathEl::CurveTo(_, _, p3) = element {
                end = Some(p3);
            }
            self.path.push(element);
        }
        self.current = end;
    }

    fn current_point(&self) -> Point {
        self.current
            .map_or(Point::ORIGIN, |point| self.state.ctm.inverse() * point)
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_source(&mut self, color: Color) {
        self.state.source = color;
    }

    fn set_fill_rule(&mut self, rule: FillRule) {
        self.state.fill_rule = rule;
    }

    fn stroke_preserve(&mut self) {
        let state = &self.state;
        if !state.source.is_visible() || state.line_width <= 0.0 || !self.has_segments() {
            return;
        }
        if state.ctm.determinant().abs() <= f64::EPSILON {
            return;
        }
        let mut user_path = BezPath::from_vec(self.path.clone());
        user_path.apply_affine(state.ctm.inverse());
        self.surface
            .stroke(&user_path, state.source, state.line_width, state.ctm);
    }

    fn fill(&mut self) {
        if self.state.source.is_visible() && self.has_segments() {
            let path = BezPath::from_vec(std::mem::take(&mut self.path));
            self.surface.fill(&path, self.state.source, self.state.fill_rule);
        }
        self.path.clear();
        self.current = None;
        self.reopen = false;
    }

    fn select_font_face(&mut self, face: FontFace) {
        self.state.font = face;
    }

    fn set_font_size(&mut self, size: f64) {
        self.state.font_size = size;
    }

    fn text_extents(&self, text: &str) -> TextExtents {
        self.surface
            .text_extents(&self.state.font, self.state.font_size, text)
    }

    fn show_text(&mut self, text: &str) {
        let extents = self.text_extents(text);
        if self.state.source.is_visible() {
            let glyphs = self.text_outline_at_current(text);
            if !glyphs.is_empty() {
                self.surface.fill(&glyphs, self.state.source, FillRule::NonZero);
            }
        }
        self.advance(&extents);
    }

    fn text_path(&mut self, text: &str) {
        let extents = self.text_extents(text);
        let glyphs = self.text_outline_at_current(text);
        self.path.extend(glyphs.elements().iter().copied());
        self.advance(&extents);
        if let Some(current) = self.current {
            self.subpath_start = current;
            self.reopen = true;
        }
    }
}
