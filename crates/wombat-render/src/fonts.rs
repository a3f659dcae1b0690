//! Font discovery, metrics and glyph outlines.
//!
//! Metrics come from fontdue, outlines from ttf-parser. Both read the same
//! font file, so advances agree.

use std::path::{Path, PathBuf};

use fontdue::{Font, FontSettings};
use kurbo::{BezPath, Point};
use ttf_parser::{Face, GlyphId, OutlineBuilder};
use wombat_common::warning::warn_once;
use wombat_svg::{FontFace, FontSlant, FontWeight, TextExtents};

use crate::error::ConvertError;

/// System font paths searched for the regular face.
const REGULAR_SEARCH_PATHS: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    // macOS
    "/System/Library/Fonts/Helvetica.ttc",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    // Windows
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

/// System font paths searched for the bold face.
const BOLD_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// System font paths searched for the italic face.
const ITALIC_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Oblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Italic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansOblique.ttf",
    "/System/Library/Fonts/Supplemental/Arial Italic.ttf",
    "/Library/Fonts/Arial Italic.ttf",
    "C:\\Windows\\Fonts\\ariali.ttf",
];

/// System font paths searched for the bold italic face.
const BOLD_ITALIC_SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-BoldOblique.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-BoldItalic.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSansBoldOblique.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold Italic.ttf",
    "/Library/Fonts/Arial Bold Italic.ttf",
    "C:\\Windows\\Fonts\\arialbi.ttf",
];

/// A font file with its fontdue metrics.
pub struct FontFile {
    path: PathBuf,
    data: Vec<u8>,
    metrics: Font,
}

impl std::fmt::Debug for FontFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFile").field("path", &self.path).finish_non_exhaustive()
    }
}

impl FontFile {
    /// Read and parse a TrueType or OpenType font.
    ///
    /// # Errors
    ///
    /// [`ConvertError::Io`] if the file cannot be read,
    /// [`ConvertError::Font`] if neither parser accepts it.
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let data = std::fs::read(path).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(path, data)
    }

    fn from_bytes(path: &Path, data: Vec<u8>) -> Result<Self, ConvertError> {
        let rejected = |reason: String| ConvertError::Font {
            path: path.to_path_buf(),
            reason,
        };
        let _ = Face::parse(&data, 0).map_err(|error| rejected(error.to_string()))?;
        let metrics = Font::from_bytes(data.as_slice(), FontSettings::default())
            .map_err(|error| rejected(error.to_string()))?;
        Ok(Self {
            path: path.to_path_buf(),
            data,
            metrics,
        })
    }

    /// Where the font was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn face(&self) -> Option<Face<'_>> {
        Face::parse(&self.data, 0).ok()
    }

    /// Measure `text` at `size` pixels, y growing downwards.
    #[must_use]
    pub fn extents(&self, size: f64, text: &str) -> TextExtents {
        let px = size as f32;
        let mut pen = 0.0_f32;
        let mut ink: Option<[f32; 4]> = None;

        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let glyph = self.metrics.metrics(ch, px);
            let bounds = glyph.bounds;
            if bounds.width > 0.0 && bounds.height > 0.0 {
                let glyph_ink = [
                    pen + bounds.xmin,
                    -(bounds.ymin + bounds.height),
                    pen + bounds.xmin + bounds.width,
                    -bounds.ymin,
                ];
                ink = Some(ink.map_or(glyph_ink, |[x0, y0, x1, y1]| {
                    [
                        x0.min(glyph_ink[0]),
                        y0.min(glyph_ink[1]),
                        x1.max(glyph_ink[2]),
                        y1.max(glyph_ink[3]),
                    ]
                }));
            }
            pen += glyph.advance_width;
        }

        let [x0, y0, x1, y1] = ink.unwrap_or_default();
        TextExtents {
            x_bearing: f64::from(x0),
            y_bearing: f64::from(y0),
            width: f64::from(x1 - x0),
            height: f64::from(y1 - y0),
            x_advance: f64::from(pen),
            y_advance: 0.0,
        }
    }

    /// Glyph outlines of `text` at `size` pixels, origin on the baseline,
    /// y growing downwards.
    #[must_use]
    pub fn outline(&self, size: f64, text: &str) -> BezPath {
        let Some(face) = self.face() else {
            return BezPath::new();
        };
        let mut pen = OutlinePath {
            path: BezPath::new(),
            origin: 0.0,
            scale: size / f64::from(face.units_per_em()),
        };
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let glyph = face.glyph_index(ch).unwrap_or(GlyphId(0));
            let _ = face.outline_glyph(glyph, &mut pen);
            pen.origin += f64::from(face.glyph_hor_advance(glyph).unwrap_or(0)) * pen.scale;
        }
        pen.path
    }
}

/// Collects a glyph outline into a [`BezPath`], scaling font units and
/// flipping the y axis.
struct OutlinePath {
    path: BezPath,
    /// Pen position along the baseline, pixels.
    origin: f64,
    /// Pixels per font unit.
    scale: f64,
}

impl OutlinePath {
    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(
            self.origin + f64::from(x) * self.scale,
            -f64::from(y) * self.scale,
        )
    }
}

impl OutlineBuilder for OutlinePath {
    fn move_to(&mut self, x: f32, y: f32) {
        let point = self.point(x, y);
        self.path.move_to(point);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let point = self.point(x, y);
        self.path.line_to(point);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (control, end) = (self.point(x1, y1), self.point(x, y));
        self.path.quad_to(control, end);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (first, second, end) = (self.point(x1, y1), self.point(x2, y2), self.point(x, y));
        self.path.curve_to(first, second, end);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

/// The faces text can be set in.
///
/// Missing variants fall back to the closest loaded one, then to regular.
/// The `font-family` is not matched: every family maps to the same set.
#[derive(Debug, Default)]
pub struct FontSet {
    regular: Option<FontFile>,
    bold: Option<FontFile>,
    italic: Option<FontFile>,
    bold_italic: Option<FontFile>,
}

impl FontSet {
    /// Load the first readable font of each system search list.
    #[must_use]
    pub fn system() -> Self {
        let set = Self {
            regular: first_readable(REGULAR_SEARCH_PATHS),
            bold: first_readable(BOLD_SEARCH_PATHS),
            italic: first_readable(ITALIC_SEARCH_PATHS),
            bold_italic: first_readable(BOLD_ITALIC_SEARCH_PATHS),
        };
        if set.regular.is_none() {
            warn_once("Render", "no system font found, text is not drawn");
        }
        set
    }

    /// Use one font file for every face.
    ///
    /// # Errors
    ///
    /// Any error of [`FontFile::load`].
    pub fn from_file(path: &Path) -> Result<Self, ConvertError> {
        Ok(Self {
            regular: Some(FontFile::load(path)?),
            ..Self::default()
        })
    }

    /// Whether any font was loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.regular.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.bold_italic.is_none()
    }

    /// The font used for `face`.
    #[must_use]
    pub fn select(&self, face: &FontFace) -> Option<&FontFile> {
        let bold = face.weight == FontWeight::Bold;
        let italic = face.slant != FontSlant::Normal;
        let variant = match (bold, italic) {
            (true, true) => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref()),
            (true, false) => self.bold.as_ref(),
            (false, true) => self.italic.as_ref(),
            (false, false) => None,
        };
        variant.or(self.regular.as_ref())
    }
}

fn first_readable(paths: &[&str]) -> Option<FontFile> {
    paths.iter().find_map(|path| {
        let font = FontFile::load(Path::new(path)).ok()?;
        log::debug!("[Wombat Render] loaded font {path}");
        Some(font)
    })
}
