//! Coordinate pairs read from the front of a number list.

use crate::error::SvgError;
use crate::values::resolve_length;

/// A resolved `(x, y)` pair and the text that follows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointValue<'a> {
    /// Horizontal coordinate in device units.
    pub x: f64,
    /// Vertical coordinate in device units.
    pub y: f64,
    /// Unconsumed text after the pair's separator.
    pub rest: &'a str,
}

/// Read two space-separated lengths from the front of `text`.
///
/// `text` is expected to be normalized (see
/// [`normalize_number_list`](crate::values::normalize_number_list)). Absent
/// or blank text yields `(0, 0, "")`.
///
/// # Errors
///
/// [`SvgError::MalformedAttributeValue`] when fewer than two tokens remain,
/// or any error from [`resolve_length`].
pub fn resolve_point(text: Option<&str>) -> Result<PointValue<'_>, SvgError> {
    let Some(text) = text.map(str::trim_start).filter(|text| !text.is_empty()) else {
        return Ok(PointValue {
            x: 0.0,
            y: 0.0,
            rest: "",
        });
    };

    let mut parts = text.splitn(3, ' ');
    let (Some(x), Some(y)) = (parts.next(), parts.next()) else {
        return Err(SvgError::malformed(text, "expected two coordinates"));
    };
    if y.is_empty() {
        return Err(SvgError::malformed(text, "expected two coordinates"));
    }

    Ok(PointValue {
        x: resolve_length(Some(x))?,
        y: resolve_length(Some(y))?,
        rest: parts.next().unwrap_or(""),
    })
}
