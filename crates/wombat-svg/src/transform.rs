//! The `transform` attribute.
//!
//! [SVG 1.1 § 7.6 The 'transform' attribute](https://www.w3.org/TR/SVG11/coords.html#TransformAttribute)
//!
//! "The value of the 'transform' attribute is a <transform-list>, which is
//! defined as a list of transform definitions, which are applied in the order
//! provided."

use kurbo::Affine;
use serde::Serialize;
use strum_macros::{EnumString, IntoStaticStr};
use wombat_common::warning::warn_once;

use crate::canvas::Canvas;
use crate::error::SvgError;
use crate::values::{normalize_number_list, resolve_length};

/// One transform definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TransformOp {
    /// `scale(sx [sy])`, `sy` defaulting to `sx`.
    Scale {
        /// Horizontal factor.
        sx: f64,
        /// Vertical factor.
        sy: f64,
    },
    /// `translate(tx [ty])`, `ty` defaulting to `tx`.
    Translate {
        /// Horizontal offset.
        tx: f64,
        /// Vertical offset.
        ty: f64,
    },
    /// `matrix(a b c d e f)`.
    ///
    /// Applied by replacing the current transformation matrix, not by
    /// composing with it.
    Matrix([f64; 6]),
}

impl TransformOp {
    /// Apply the operation to the canvas transform.
    pub fn apply<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        match *self {
            Self::Scale { sx, sy } => canvas.scale(sx, sy),
            Self::Translate { tx, ty } => canvas.translate(tx, ty),
            Self::Matrix(coefficients) => canvas.set_matrix(Affine::new(coefficients)),
        }
    }
}

/// Transform function names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
enum TransformName {
    Matrix,
    Translate,
    Scale,
    Rotate,
    SkewX,
    SkewY,
}

/// Lexer over a transform list yielding one operation per definition.
///
/// Unsupported definitions (`rotate`, `skewX`, `skewY`) are skipped with a
/// warning.
#[derive(Debug, Clone)]
pub struct TransformParser<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> TransformParser<'a> {
    /// Create a parser over a transform attribute value.
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    /// Skip whitespace and commas between definitions.
    fn skip_separators(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start_matches(|ch: char| ch.is_whitespace() || ch == ',');
        self.pos += rest.len() - trimmed.len();
    }

    /// Consume the next `name(args)` definition.
    fn definition(&mut self) -> Result<(&'a str, &'a str), SvgError> {
        let rest = self.rest();
        let name_len = rest
            .find(|ch: char| !ch.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        let after_name = rest[name_len..].trim_start();
        let arguments = after_name
            .strip_prefix('(')
            .filter(|_| !name.is_empty())
            .ok_or_else(|| SvgError::malformed(rest, "expected a transform function"))?;
        let Some(close) = arguments.find(')') else {
            return Err(SvgError::malformed(rest, "unterminated transform function"));
        };
        let consumed = rest.len() - arguments.len() + close + 1;
        self.pos += consumed;
        Ok((name, &arguments[..close]))
    }

    fn next_op(&mut self) -> Result<Option<TransformOp>, SvgError> {
        loop {
            self.skip_separators();
            if self.rest().is_empty() {
                return Ok(None);
            }

            let (name, arguments) = self.definition()?;
            let Ok(kind) = name.parse::<TransformName>() else {
                return Err(SvgError::malformed(name, "unknown transform function"));
            };
            let values = normalize_number_list(arguments)
                .split(' ')
                .filter(|token| !token.is_empty())
                .map(|token| resolve_length(Some(token)))
                .collect::<Result<Vec<_>, _>>()?;

            let op = match (kind, values.as_slice()) {
                (TransformName::Matrix, &[xx, yx, xy, yy, x0, y0]) => {
                    TransformOp::Matrix([xx, yx, xy, yy, x0, y0])
                }
                (TransformName::Matrix, _) => {
                    return Err(SvgError::malformed(arguments, "matrix takes 6 values"));
                }
                (TransformName::Scale, &[sx]) => TransformOp::Scale { sx, sy: sx },
                (TransformName::Scale, &[sx, sy]) => TransformOp::Scale { sx, sy },
                (TransformName::Translate, &[tx]) => TransformOp::Translate { tx, ty: tx },
                (TransformName::Translate, &[tx, ty]) => TransformOp::Translate { tx, ty },
                (TransformName::Scale | TransformName::Translate, _) => {
                    return Err(SvgError::malformed(arguments, "expected 1 or 2 values"));
                }
                (TransformName::Rotate | TransformName::SkewX | TransformName::SkewY, _) => {
                    let name: &'static str = kind.into();
                    warn_once("SVG", &format!("transform '{name}' is not supported"));
                    continue;
                }
            };
            return Ok(Some(op));
        }
    }
}

impl Iterator for TransformParser<'_> {
    type Item = Result<TransformOp, SvgError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_op() {
            Ok(op) => op.map(Ok),
            Err(error) => {
                // Stop after the first error.
                self.pos = self.source.len();
                Some(Err(error))
            }
        }
    }
}

/// Parse a transform list into operations without applying them.
///
/// # Errors
///
/// The first error met while parsing.
pub fn parse_transform(text: &str) -> Result<Vec<TransformOp>, SvgError> {
    TransformParser::new(text).collect()
}

/// Parse a transform list and apply each operation as soon as it is read.
///
/// Operations before a malformed definition have already been applied when
/// the error is returned.
///
/// # Errors
///
/// [`SvgError::MalformedAttributeValue`] for a bad definition or value count.
pub fn apply_transform<C: Canvas + ?Sized>(canvas: &mut C, text: &str) -> Result<(), SvgError> {
    for op in TransformParser::new(text) {
        let op = op?;
        log::trace!("[Wombat SVG] transform {op:?}");
        op.apply(canvas);
    }
    Ok(())
}
