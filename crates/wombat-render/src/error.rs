//! Errors raised while converting a document to an image.

use std::path::PathBuf;

use thiserror::Error;
use wombat_svg::SvgError;
use wombat_xml::ParseError;

/// Errors of the conversion pipeline.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source is not a well-formed SVG document.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Rendering the tree failed.
    #[error(transparent)]
    Render(#[from] SvgError),
    /// Neither `width`/`height` nor a `viewBox` give the document a size.
    #[error("document has no size: set width and height or a viewBox")]
    NoSize,
    /// The output does not fit a pixmap.
    #[error("cannot allocate a {width}x{height} image")]
    Allocation {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// A file could not be read.
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// A font file could not be used.
    #[error("cannot use font '{}': {reason}", path.display())]
    Font {
        /// The font file.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },
    /// The image encoder failed.
    #[error("encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
