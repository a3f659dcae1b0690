//! Paint colors.
//!
//! [SVG 1.1 § 4.2 Basic data types: color](https://www.w3.org/TR/SVG11/types.html#DataTypeColor)

use serde::Serialize;

use crate::error::SvgError;
use crate::values::keywords::color_keyword;

/// sRGB color with straight (non-premultiplied) alpha, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Color {
    /// Red channel.
    pub r: f64,
    /// Green channel.
    pub g: f64,
    /// Blue channel.
    pub b: f64,
    /// Alpha channel, the product of every opacity source.
    pub a: f64,
}

impl Color {
    /// Fully transparent black, the value of `none`.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);

    /// Opaque white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Build a color from its channels.
    #[must_use]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Whether painting with this color changes anything.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.a > 0.0
    }
}

/// Resolve a paint value to a color with `opacity` folded into its alpha.
///
/// [§ 4.2](https://www.w3.org/TR/SVG11/types.html#DataTypeColor)
/// "The format of an RGB value in hexadecimal notation is a '#' immediately
/// followed by either three or six hexadecimal characters. The three-digit
/// RGB notation (#rgb) is converted into six-digit form (#rrggbb) by
/// replicating digits, not by adding zeros."
///
/// # Algorithm
///
/// STEP 1: Absent, blank and `none` are transparent.
///
/// STEP 2: Lower-case and substitute color keywords by their hex form.
///
/// STEP 3: Expand `#rgb` and `#rgba` by doubling each digit.
///
/// STEP 4: An `#rrggbbaa` alpha byte multiplies into `opacity`.
///
/// # Errors
///
/// [`SvgError::MalformedAttributeValue`] for anything that is not a keyword
/// or a 3, 4, 6 or 8 digit hex color.
pub fn resolve_color(text: Option<&str>, opacity: f64) -> Result<Color, SvgError> {
    // STEP 1
    let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(Color::TRANSPARENT);
    };
    let lowered = text.to_ascii_lowercase();
    if lowered == "none" {
        return Ok(Color::TRANSPARENT);
    }

    // STEP 2
    let hex = color_keyword(&lowered).unwrap_or(&lowered);
    let digits = hex
        .strip_prefix('#')
        .filter(|digits| digits.bytes().all(|byte| byte.is_ascii_hexdigit()))
        .ok_or_else(|| SvgError::malformed(text, "expected a color keyword or hex color"))?;

    // STEP 3
    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|digit| [digit, digit]).collect(),
        6 | 8 => digits.to_string(),
        _ => return Err(SvgError::malformed(text, "expected 3, 4, 6 or 8 hex digits")),
    };

    // STEP 4
    let channel = |index: usize| {
        u8::from_str_radix(&expanded[index..index + 2], 16)
            .map(|byte| f64::from(byte) / 255.0)
            .map_err(|_| SvgError::malformed(text, "invalid hex digit"))
    };
    let alpha = if expanded.len() == 8 { channel(6)? } else { 1.0 };

    Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, opacity * alpha))
}
