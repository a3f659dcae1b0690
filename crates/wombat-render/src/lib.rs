//! Conversion of SVG documents to raster images.
//!
//! # Scope
//!
//! This crate provides:
//! - **Raster Surface** - anti-aliased fills, strokes and text on a tiny-skia pixmap
//! - **Fonts** - system font discovery with fontdue metrics and ttf-parser outlines
//! - **Encoding** - PNG, JPEG and BMP output through `image`
//! - **Document Loading** - `use` references to files and `data:` URLs
//!
//! # Not Yet Implemented
//!
//! - Remote (`http`/`https`) references
//! - Font family matching; every family maps to the same face set
//! - Vector output formats

mod encode;
mod error;
mod fonts;
mod loader;
mod surface;

pub use encode::{OutputFormat, encode, to_rgba_image};
pub use error::ConvertError;
pub use fonts::{FontFile, FontSet};
pub use loader::FileLoader;
pub use surface::SkiaSurface;

use std::path::{Path, PathBuf};

use serde::Serialize;
use wombat_common::warning::clear_warnings;
use wombat_dom::DomTree;
use wombat_svg::{Canvas, Color, Context, document_size, render_document};
use wombat_xml::{ParseOptions, parse_svg, parse_svg_bytes};

/// How a document is rasterized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderOptions {
    /// Encoding of the output.
    pub format: OutputFormat,
    /// Pixels per user unit.
    pub scale: f64,
    /// Color the image is cleared to. `None` leaves it transparent.
    pub background: Option<Color>,
    /// Font file used for all text instead of the system fonts.
    pub font: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            scale: 1.0,
            background: None,
            font: None,
        }
    }
}

impl RenderOptions {
    /// The fonts these options select.
    ///
    /// # Errors
    ///
    /// Any error of loading the explicit font file.
    pub fn fonts(&self) -> Result<FontSet, ConvertError> {
        match &self.font {
            Some(path) => FontSet::from_file(path),
            None => Ok(FontSet::system()),
        }
    }
}

/// Output size in pixels of a document, after `scale`.
///
/// # Errors
///
/// [`ConvertError::NoSize`] when the document has no positive size,
/// [`ConvertError::Render`] for a malformed size or viewBox.
pub fn output_size(tree: &DomTree, scale: f64) -> Result<(u32, u32), ConvertError> {
    let root = tree.element(tree.root()).ok_or(ConvertError::NoSize)?;
    let (width, height) = document_size(root)?;
    let (width, height) = ((width * scale).ceil(), (height * scale).ceil());
    if !width.is_finite() || !height.is_finite() || width < 1.0 || height < 1.0 {
        return Err(ConvertError::NoSize);
    }
    Ok((width as u32, height as u32))
}

/// Rasterize a parsed document and encode it.
///
/// `base` is the document's location, against which `use` references are
/// resolved.
///
/// # Errors
///
/// The first error of sizing, font loading, rendering or encoding.
pub fn render_tree(
    tree: &DomTree,
    base: Option<&Path>,
    options: &RenderOptions,
) -> Result<Vec<u8>, ConvertError> {
    clear_warnings();
    let (width, height) = output_size(tree, options.scale)?;
    log::debug!(
        "[Wombat Render] {width}x{height} {} at scale {}",
        options.format,
        options.scale
    );

    let surface = SkiaSurface::new(
        width,
        height,
        options.background.unwrap_or(Color::TRANSPARENT),
        options.fonts()?,
        options.format,
    )?;
    let mut context = Context::new(surface);
    context.scale(options.scale, options.scale);
    render_document(&mut context, tree, &FileLoader, base)?;
    context.finish()
}

/// Parse SVG text and rasterize it.
///
/// # Errors
///
/// Any parse error, then any error of [`render_tree`].
pub fn render_str(text: &str, options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
    let tree = parse_svg(text)?;
    render_tree(&tree, None, options)
}

/// Read an SVG file and rasterize it.
///
/// # Errors
///
/// [`ConvertError::Io`] if the file cannot be read, then any error of
/// [`render_tree`].
pub fn render_file(path: &Path, options: &RenderOptions) -> Result<Vec<u8>, ConvertError> {
    let bytes = std::fs::read(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tree = parse_svg_bytes(&bytes, &ParseOptions::default())?;
    render_tree(&tree, Some(path), options)
}
