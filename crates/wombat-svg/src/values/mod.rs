//! Resolution of textual attribute values.
//!
//! [SVG 1.1 § 4 Basic Data Types and Interfaces](https://www.w3.org/TR/SVG11/types.html)
//!
//! Stateless conversions from attribute strings to lengths, colors and
//! coordinate pairs.

mod color;
mod keywords;
mod length;
mod point;

pub use color::{Color, resolve_color};
pub use keywords::color_keyword;
pub use length::{Unit, resolve_length};
pub use point::{PointValue, resolve_point};

pub(crate) use length::parse_finite;

use crate::error::SvgError;

/// Normalize a list of numbers so that it splits on single spaces.
///
/// [§ 4.2 Basic data types](https://www.w3.org/TR/SVG11/types.html#BasicDataTypes)
/// "Lists of numbers may be separated by whitespace, a comma, or both. A
/// minus sign also starts a new number."
///
/// A space is inserted before each `-` that does not belong to an exponent,
/// commas become spaces and whitespace runs collapse to one space.
#[must_use]
pub fn normalize_number_list(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len() + 8);
    let mut previous = None;

    for ch in text.chars() {
        let ch = match ch {
            ',' => ' ',
            ch if ch.is_whitespace() => ' ',
            ch => ch,
        };
        if ch == '-' && !matches!(previous, Some('e' | 'E' | ' ') | None) {
            normalized.push(' ');
            previous = Some(' ');
        }
        if ch == ' ' && previous == Some(' ') {
            continue;
        }
        normalized.push(ch);
        previous = Some(ch);
    }

    normalized
}

/// Resolve a unitless number such as `opacity`, with `default` when absent.
///
/// # Errors
///
/// [`SvgError::MalformedAttributeValue`] if the text is not a finite number.
pub fn resolve_number(text: Option<&str>, default: f64) -> Result<f64, SvgError> {
    match text.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => parse_finite(text).ok_or_else(|| SvgError::malformed(text, "expected a number")),
        None => Ok(default),
    }
}
