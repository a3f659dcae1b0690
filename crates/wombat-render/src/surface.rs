//! A [`Surface`] rasterizing into a tiny-skia pixmap.

use kurbo::{Affine, BezPath, PathEl};
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};
use wombat_svg::{Color, FillRule, FontFace, Surface, TextExtents};

use crate::encode::{OutputFormat, encode};
use crate::error::ConvertError;
use crate::fonts::FontSet;

/// cairo's default miter limit.
const MITER_LIMIT: f32 = 10.0;

/// Anti-aliased rasterization of paths and text.
#[derive(Debug)]
pub struct SkiaSurface {
    pixmap: Pixmap,
    fonts: FontSet,
    format: OutputFormat,
}

impl SkiaSurface {
    /// Create a `width` × `height` surface cleared to `background`.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Allocation`] for a zero or oversized pixmap.
    pub fn new(
        width: u32,
        height: u32,
        background: Color,
        fonts: FontSet,
        format: OutputFormat,
    ) -> Result<Self, ConvertError> {
        let mut pixmap = Pixmap::new(width, height).ok_or(ConvertError::Allocation { width, height })?;
        if background.is_visible() {
            pixmap.fill(skia_color(background));
        }
        Ok(Self {
            pixmap,
            fonts,
            format,
        })
    }

    /// The pixels painted so far.
    #[must_use]
    pub const fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Consume the surface and return its pixels.
    #[must_use]
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba(
        color.r.clamp(0.0, 1.0) as f32,
        color.g.clamp(0.0, 1.0) as f32,
        color.b.clamp(0.0, 1.0) as f32,
        color.a.clamp(0.0, 1.0) as f32,
    )
    .unwrap_or(tiny_skia::Color::TRANSPARENT)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color));
    paint.anti_alias = true;
    paint
}

fn skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

/// Convert a kurbo path. `None` when nothing is left to draw.
fn skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(q, p) => builder.quad_to(q.x as f32, q.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

impl Surface for SkiaSurface {
    type Error = ConvertError;

    fn fill(&mut self, path: &BezPath, color: Color, rule: FillRule) {
        let Some(path) = skia_path(path) else {
            return;
        };
        let rule = match rule {
            FillRule::NonZero => tiny_skia::FillRule::Winding,
            FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        };
        self.pixmap
            .fill_path(&path, &paint(color), rule, Transform::identity(), None);
    }

    fn stroke(&mut self, path: &BezPath, color: Color, width: f64, transform: Affine) {
        let Some(path) = skia_path(path) else {
            return;
        };
        let stroke = Stroke {
            width: width as f32,
            miter_limit: MITER_LIMIT,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &paint(color),
            &stroke,
            skia_transform(transform),
            None,
        );
    }

    fn text_extents(&self, face: &FontFace, size: f64, text: &str) -> TextExtents {
        self.fonts
            .select(face)
            .map(|font| font.extents(size, text))
            .unwrap_or_default()
    }

    fn text_outline(&self, face: &FontFace, size: f64, text: &str) -> BezPath {
        self.fonts
            .select(face)
            .map(|font| font.outline(size, text))
            .unwrap_or_default()
    }

    fn finish(self) -> Result<Vec<u8>, Self::Error> {
        encode(&self.pixmap, self.format).map_err(ConvertError::Encode)
    }
}
