//! Image encoding of finished pixmaps.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, RgbaImage};
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};
use tiny_skia::Pixmap;

/// Output image formats.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Portable Network Graphics, with alpha.
    #[default]
    Png,
    /// JPEG. Transparent pixels are flattened onto white.
    #[strum(to_string = "jpeg", serialize = "jpg")]
    Jpeg,
    /// Windows bitmap, with alpha.
    Bmp,
}

impl OutputFormat {
    /// File extension for the format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
        }
    }

    /// Guess the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }

    const fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Convert a premultiplied pixmap to straight RGBA.
#[must_use]
pub fn to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (pixel, source) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = source.demultiply();
        pixel.0 = [color.red(), color.green(), color.blue(), color.alpha()];
    }
    image
}

/// Composite straight RGBA over opaque white.
fn flatten(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = u32::from(a);
        let over_white = |channel: u8| ((u32::from(channel) * alpha + 255 * (255 - alpha)) / 255) as u8;
        Rgb([over_white(r), over_white(g), over_white(b)])
    })
}

/// Encode `pixmap` as `format`.
///
/// # Errors
///
/// Any error of the `image` encoder.
pub fn encode(pixmap: &Pixmap, format: OutputFormat) -> Result<Vec<u8>, image::ImageError> {
    let rgba = to_rgba_image(pixmap);
    let image = match format {
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(flatten(&rgba)),
        OutputFormat::Png | OutputFormat::Bmp => DynamicImage::ImageRgba8(rgba),
    };
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format.image_format())?;
    log::debug!(
        "[Wombat Render] encoded {}x{} {format} ({} bytes)",
        pixmap.width(),
        pixmap.height(),
        bytes.len()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_name_and_path() {
        assert_eq!("PNG".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("jpg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!(
            OutputFormat::from_path(Path::new("out/picture.BMP")),
            Some(OutputFormat::Bmp)
        );
        assert_eq!(OutputFormat::from_path(Path::new("picture")), None);
        assert_eq!(OutputFormat::from_path(Path::new("picture.gif")), None);
    }

    #[test]
    fn test_flatten_onto_white() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, image::Rgba([0, 0, 0, 0]));
        image.put_pixel(1, 0, image::Rgba([255, 0, 0, 255]));
        let flat = flatten(&image);
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(flat.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
