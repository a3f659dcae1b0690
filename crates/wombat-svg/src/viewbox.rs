//! Viewport establishment from `viewBox`.
//!
//! [SVG 1.1 § 7.7 The 'viewBox' attribute](https://www.w3.org/TR/SVG11/coords.html#ViewBoxAttribute)

use wombat_dom::ElementData;

use crate::canvas::Canvas;
use crate::error::SvgError;
use crate::values::{normalize_number_list, resolve_length};

/// [§ 7.7](https://www.w3.org/TR/SVG11/coords.html#ViewBoxAttribute)
///
/// "The value of the 'viewBox' attribute is a list of four numbers <min-x>,
/// <min-y>, <width> and <height>, separated by whitespace and/or a comma."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    /// Left edge in user units.
    pub min_x: f64,
    /// Top edge in user units.
    pub min_y: f64,
    /// Width in user units.
    pub width: f64,
    /// Height in user units.
    pub height: f64,
}

impl ViewBox {
    /// Parse a `viewBox` attribute.
    ///
    /// # Errors
    ///
    /// [`SvgError::MalformedAttributeValue`] unless there are exactly four
    /// values with a non-zero width and height.
    pub fn parse(text: &str) -> Result<Self, SvgError> {
        let values = normalize_number_list(text)
            .split(' ')
            .filter(|token| !token.is_empty())
            .map(|token| resolve_length(Some(token)))
            .collect::<Result<Vec<_>, _>>()?;
        let &[min_x, min_y, width, height] = values.as_slice() else {
            return Err(SvgError::malformed(text, "viewBox takes 4 values"));
        };
        // "A value of zero disables rendering of the element."
        if width == 0.0 || height == 0.0 {
            return Err(SvgError::malformed(text, "viewBox has a zero extent"));
        }
        Ok(Self {
            min_x,
            min_y,
            width,
            height,
        })
    }
}

/// Scale and translate the canvas so that `viewbox` fills `width` × `height`.
///
/// A zero `width` or `height` defaults to the viewBox extent. Without a
/// viewBox nothing changes.
///
/// # Errors
///
/// Any error of [`ViewBox::parse`].
pub fn apply_viewbox<C: Canvas + ?Sized>(
    canvas: &mut C,
    width: f64,
    height: f64,
    viewbox: Option<&str>,
) -> Result<(), SvgError> {
    let Some(viewbox) = viewbox else {
        return Ok(());
    };
    let viewbox = ViewBox::parse(viewbox)?;
    let width = if width == 0.0 { viewbox.width } else { width };
    let height = if height == 0.0 { viewbox.height } else { height };
    canvas.scale(width / viewbox.width, height / viewbox.height);
    canvas.translate(-viewbox.min_x, -viewbox.min_y);
    Ok(())
}

/// The `width` and `height` of an outermost element in device units.
///
/// A side that is absent, zero, or in a unit with no absolute size falls back
/// to the viewBox extent; `0` if there is no viewBox either.
///
/// # Errors
///
/// Malformed `width`, `height` or `viewBox` values.
pub fn document_size(element: &ElementData) -> Result<(f64, f64), SvgError> {
    let side = |name: &str| match resolve_length(element.get(name)) {
        Ok(value) => Ok(value),
        Err(SvgError::UnresolvedUnit { .. }) => Ok(0.0),
        Err(error) => Err(error),
    };
    let (mut width, mut height) = (side("width")?, side("height")?);

    if (width == 0.0 || height == 0.0)
        && let Some(viewbox) = element.get("viewBox")
    {
        let viewbox = ViewBox::parse(viewbox)?;
        if width == 0.0 {
            width = viewbox.width;
        }
        if height == 0.0 {
            height = viewbox.height;
        }
    }
    Ok((width, height))
}
