//! SVG lengths and their resolution to device units.
//!
//! [SVG 1.1 § 7.10 Units](https://www.w3.org/TR/SVG11/coords.html#Units)

use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::error::SvgError;

/// [§ 7.10 Units](https://www.w3.org/TR/SVG11/coords.html#Units)
///
/// "The supported length unit identifiers are: em, ex, px, pt, pc, cm, mm,
/// in, and percentages."
///
/// Variants are declared in matching order: the first unit whose symbol
/// occurs in a length wins, so `mm` is tried before `em`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr, Serialize)]
pub enum Unit {
    /// Millimetres.
    #[strum(serialize = "mm")]
    Mm,
    /// Centimetres.
    #[strum(serialize = "cm")]
    Cm,
    /// Inches.
    #[strum(serialize = "in")]
    In,
    /// Points, the device unit.
    #[strum(serialize = "pt")]
    Pt,
    /// Picas.
    #[strum(serialize = "pc")]
    Pc,
    /// Pixels, treated as user units.
    #[strum(serialize = "px")]
    Px,
    /// Font size of the element.
    #[strum(serialize = "em")]
    Em,
    /// x-height of the element's font.
    #[strum(serialize = "ex")]
    Ex,
    /// Percentage of the viewport.
    #[strum(serialize = "%")]
    Percent,
}

impl Unit {
    /// The unit suffix as written in documents.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        self.into()
    }

    /// Device units (points at 72 DPI) per unit, or `None` when the unit
    /// depends on font or viewport context.
    #[must_use]
    pub const fn factor(self) -> Option<f64> {
        match self {
            Self::Mm => Some(72.0 / 25.4),
            Self::Cm => Some(72.0 / 2.54),
            Self::In => Some(72.0),
            Self::Pt | Self::Px => Some(1.0),
            Self::Pc => Some(12.0),
            Self::Em | Self::Ex | Self::Percent => None,
        }
    }
}

/// Resolve a length attribute to device units.
///
/// Absent or blank text is `0`. A plain number is taken as user units.
/// Otherwise the first unit of [`Unit`] whose symbol occurs in the text is
/// stripped and the remaining number scaled by its factor. Negative values
/// pass through.
///
/// # Errors
///
/// [`SvgError::UnresolvedUnit`] for `em`, `ex` and `%`;
/// [`SvgError::MalformedAttributeValue`] when no number can be read.
pub fn resolve_length(text: Option<&str>) -> Result<f64, SvgError> {
    let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(0.0);
    };

    if let Some(value) = parse_finite(text) {
        return Ok(value);
    }

    let unit = Unit::iter()
        .find(|unit| text.contains(unit.symbol()))
        .ok_or_else(|| SvgError::malformed(text, "expected a number with an optional unit"))?;
    let Some(factor) = unit.factor() else {
        return Err(SvgError::UnresolvedUnit {
            unit,
            value: text.to_string(),
        });
    };

    let numeral = text.replace(unit.symbol(), "");
    parse_finite(numeral.trim())
        .map(|value| value * factor)
        .ok_or_else(|| SvgError::malformed(text, "expected a number before the unit"))
}

/// Parse a finite floating point number.
pub(crate) fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}
