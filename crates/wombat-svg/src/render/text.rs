//! Text painting and the sibling text cursor.
//!
//! [SVG 1.1 § 10 Text](https://www.w3.org/TR/SVG11/text.html)

use kurbo::Point;
use wombat_dom::ElementData;

use super::{Geometry, Renderer};
use crate::canvas::{Canvas, FontFace};
use crate::error::SvgError;
use crate::values::{Color, resolve_color, resolve_length, resolve_number};

/// Font size when `font-size` is absent.
const DEFAULT_FONT_SIZE: &str = "12pt";

/// Family when `font-family` is absent.
const DEFAULT_FONT_FAMILY: &str = "Sans";

/// Text fill when `fill` is absent.
const DEFAULT_TEXT_FILL: &str = "#000000";

impl<C: Canvas + ?Sized> Renderer<'_, C> {
    /// [§ 10.4 The 'text' element](https://www.w3.org/TR/SVG11/text.html#TextElement)
    ///
    /// Paint the element's text at `position`, then trace it as the current
    /// path so that the generic stroke can outline the glyphs. The generic
    /// fill is replaced by transparent: the glyphs are already filled.
    pub(super) fn draw_text(
        &mut self,
        element: &ElementData,
        position: Point,
    ) -> Result<Geometry, SvgError> {
        let content = element
            .text
            .as_deref()
            .unwrap_or("")
            .trim_matches(['\n', '\r']);

        let face = FontFace {
            family: element
                .get("font-family")
                .unwrap_or(DEFAULT_FONT_FAMILY)
                .to_string(),
            slant: element
                .get("font-style")
                .and_then(|style| style.trim().parse().ok())
                .unwrap_or_default(),
            weight: element
                .get("font-weight")
                .and_then(|weight| weight.trim().parse().ok())
                .unwrap_or_default(),
        };
        let size = resolve_length(Some(element.get("font-size").unwrap_or(DEFAULT_FONT_SIZE)))?;
        self.canvas.select_font_face(face);
        self.canvas.set_font_size(size);

        // [§ 10.9.1 'text-anchor'](https://www.w3.org/TR/SVG11/text.html#TextAnchorProperty)
        let extents = self.canvas.text_extents(content);
        let x = match element.get("text-anchor") {
            // "The rendered characters are aligned such that the geometric
            // middle of the resulting rendered text is at the initial current
            // text position."
            Some("middle") => position.x - (extents.width / 2.0 + extents.x_bearing),
            // "The rendered characters are aligned such that the end of the
            // resulting rendered text is at the initial current text position."
            Some("end") => position.x - (extents.width + extents.x_bearing),
            _ => position.x,
        };

        let opacity = resolve_number(element.get("opacity"), 1.0)?
            * resolve_number(element.get("fill-opacity"), 1.0)?;
        let fill = element
            .get("fill")
            .filter(|fill| !fill.trim().is_empty())
            .unwrap_or(DEFAULT_TEXT_FILL);

        self.canvas.move_to(x, position.y);
        self.canvas.set_source(resolve_color(Some(fill), opacity)?);
        self.canvas.show_text(content);
        self.canvas.move_to(x, position.y);
        self.canvas.text_path(content);
        self.cursor = self.canvas.current_point();

        Ok(Geometry {
            stroke_width: None,
            fill: Some(Color::TRANSPARENT),
        })
    }

    /// [§ 10.5 The 'tspan' element](https://www.w3.org/TR/SVG11/text.html#TSpanElement)
    ///
    /// Continue from the end of the previous text unless `x` or `y` is given,
    /// then shift by `dx` and `dy`.
    pub(super) fn tspan(&mut self, element: &ElementData) -> Result<Geometry, SvgError> {
        let x = if element.has("x") {
            resolve_length(element.get("x"))?
        } else {
            self.cursor.x
        };
        let y = if element.has("y") {
            resolve_length(element.get("y"))?
        } else {
            self.cursor.y
        };
        let position = Point::new(
            x + resolve_length(element.get("dx"))?,
            y + resolve_length(element.get("dy"))?,
        );
        self.draw_text(element, position)
    }
}
