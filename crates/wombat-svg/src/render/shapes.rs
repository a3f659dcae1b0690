//! Basic shapes.
//!
//! [SVG 1.1 § 9 Basic Shapes](https://www.w3.org/TR/SVG11/shapes.html)

use std::f64::consts::TAU;

use kurbo::{Ellipse, PathEl, Point, Rect, RoundedRect, Shape};
use wombat_common::warning::warn_once;
use wombat_dom::ElementData;

use super::Geometry;
use crate::canvas::Canvas;
use crate::error::SvgError;
use crate::values::{normalize_number_list, resolve_length, resolve_point};

/// Tolerance passed to kurbo when a shape is turned into path elements.
const SHAPE_TOLERANCE: f64 = 0.1;

/// Resolve a length attribute.
fn length(element: &ElementData, name: &str) -> Result<f64, SvgError> {
    resolve_length(element.get(name))
}

/// Replay kurbo path elements as canvas calls.
fn append_elements<C: Canvas + ?Sized>(canvas: &mut C, elements: impl IntoIterator<Item = PathEl>) {
    for element in elements {
        match element {
            PathEl::MoveTo(p) => canvas.move_to(p.x, p.y),
            PathEl::LineTo(p) => canvas.line_to(p.x, p.y),
            PathEl::QuadTo(q, p) => {
                // Degree elevation to a cubic.
                let p0 = canvas.current_point();
                let c1 = p0 + (q - p0) * (2.0 / 3.0);
                let c2 = p + (q - p) * (2.0 / 3.0);
                canvas.curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
            }
            PathEl::CurveTo(c1, c2, p) => canvas.curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathEl::ClosePath => canvas.close_path(),
        }
    }
}

/// [§ 9.3 The 'circle' element](https://www.w3.org/TR/SVG11/shapes.html#CircleElement)
///
/// The center is offset by the element's `x` and `y`. A new sub-path is
/// started so the arc is not joined to the current point.
pub(super) fn circle<C: Canvas + ?Sized>(
    canvas: &mut C,
    element: &ElementData,
) -> Result<Geometry, SvgError> {
    let xc = length(element, "x")? + length(element, "cx")?;
    let yc = length(element, "y")? + length(element, "cy")?;
    let radius = length(element, "r")?;
    // "A value of zero disables rendering of the element."
    if radius > 0.0 {
        canvas.new_sub_path();
        canvas.arc(xc, yc, radius, 0.0, TAU);
    }
    Ok(Geometry::default())
}

/// [§ 9.4 The 'ellipse' element](https://www.w3.org/TR/SVG11/shapes.html#EllipseElement)
pub(super) fn ellipse<C: Canvas + ?Sized>(
    canvas: &mut C,
    element: &ElementData,
) -> Result<Geometry, SvgError> {
    let center = Point::new(
        length(element, "x")? + length(element, "cx")?,
        length(element, "y")? + length(element, "cy")?,
    );
    let (rx, ry) = (length(element, "rx")?, length(element, "ry")?);
    if rx > 0.0 && ry > 0.0 {
        let ellipse = Ellipse::new(center, (rx, ry), 0.0);
        append_elements(canvas, ellipse.path_elements(SHAPE_TOLERANCE));
    }
    Ok(Geometry::default())
}

/// [§ 9.5 The 'line' element](https://www.w3.org/TR/SVG11/shapes.html#LineElement)
pub(super) fn line<C: Canvas + ?Sized>(
    canvas: &mut C,
    element: &ElementData,
) -> Result<Geometry, SvgError> {
    canvas.move_to(length(element, "x1")?, length(element, "y1")?);
    canvas.line_to(length(element, "x2")?, length(element, "y2")?);
    Ok(Geometry::default())
}

/// [§ 9.2 The 'rect' element](https://www.w3.org/TR/SVG11/shapes.html#RectElement)
///
/// "If a properly specified value is provided for 'rx' but not for 'ry',
/// then the user agent processes the 'rect' element with the effective
/// value for 'ry' as equal to 'rx'."
pub(super) fn rect<C: Canvas + ?Sized>(
    canvas: &mut C,
    element: &ElementData,
) -> Result<Geometry, SvgError> {
    let (x, y) = (length(element, "x")?, length(element, "y")?);
    let (width, height) = (length(element, "width")?, length(element, "height")?);
    if width <= 0.0 || height <= 0.0 {
        return Ok(Geometry::default());
    }

    let (rx, ry) = match (element.has("rx"), element.has("ry")) {
        (true, false) => {
            let rx = length(element, "rx")?;
            (rx, rx)
        }
        (false, true) => {
            let ry = length(element, "ry")?;
            (ry, ry)
        }
        _ => (length(element, "rx")?, length(element, "ry")?),
    };
    let rx = rx.clamp(0.0, width / 2.0);
    let ry = ry.clamp(0.0, height / 2.0);

    let bounds = Rect::new(x, y, x + width, y + height);
    if rx > 0.0 && ry > 0.0 {
        if (rx - ry).abs() > f64::EPSILON {
            warn_once("SVG", "elliptical rect corners are drawn circular");
        }
        let rounded = RoundedRect::from_rect(bounds, rx.min(ry));
        append_elements(canvas, rounded.path_elements(SHAPE_TOLERANCE));
    } else {
        append_elements(canvas, bounds.path_elements(SHAPE_TOLERANCE));
    }
    Ok(Geometry::default())
}

/// [§ 9.6 The 'polyline' element](https://www.w3.org/TR/SVG11/shapes.html#PolylineElement)
/// and [§ 9.7 The 'polygon' element](https://www.w3.org/TR/SVG11/shapes.html#PolygonElement)
///
/// A polygon closes its last point back to the first.
pub(super) fn polyline<C: Canvas + ?Sized>(
    canvas: &mut C,
    element: &ElementData,
    close: bool,
) -> Result<Geometry, SvgError> {
    let points = normalize_number_list(element.get("points").unwrap_or(""));
    let mut rest = points.trim();
    let mut started = false;

    while !rest.is_empty() {
        let point = resolve_point(Some(rest))?;
        if started {
            canvas.line_to(point.x, point.y);
        } else {
            canvas.move_to(point.x, point.y);
            started = true;
        }
        rest = point.rest.trim_start();
    }

    if close && started {
        canvas.close_path();
    }
    Ok(Geometry::default())
}
